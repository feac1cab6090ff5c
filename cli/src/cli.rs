//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::infra::config::YamlConfigStore;
use crate::output::{OutputContext, Renderer};

/// Manage launchd daemons, agents and login items
#[derive(Parser)]
#[command(
    name = "launchkit",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log each launchctl invocation to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Domain for bare service names: gui, system, gui/<uid>, user/<uid>, ...
    #[arg(short, long, global = true, env = "LAUNCHKIT_DOMAIN")]
    pub domain: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List services loaded in the domain
    List,

    /// Show what launchd knows about a service
    Info(commands::ServiceArgs),

    /// Print the raw launchctl dump of a service or the domain
    Print(commands::print::PrintArgs),

    /// Load a service from its property list
    Bootstrap(commands::lifecycle::BootstrapArgs),

    /// Unload a service
    Bootout(commands::lifecycle::BootoutArgs),

    /// Allow a service to be loaded
    Enable(commands::ServiceArgs),

    /// Prevent a service from being loaded
    Disable(commands::ServiceArgs),

    /// Start a service now
    Kickstart(commands::lifecycle::KickstartArgs),

    /// Send a signal to a running service
    Kill(commands::lifecycle::KillArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be built or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            domain,
            command,
        } = self;

        let flags = AppFlags {
            no_color,
            quiet,
            json,
            domain,
        };
        let app = || AppContext::new(&flags);

        match command {
            Command::List => commands::list::run(&app()?).await,
            Command::Info(args) => commands::info::run(&app()?, &args).await,
            Command::Print(args) => commands::print::run(&app()?, &args).await,
            Command::Bootstrap(args) => commands::lifecycle::bootstrap(&app()?, &args).await,
            Command::Bootout(args) => commands::lifecycle::bootout(&app()?, &args).await,
            Command::Enable(args) => commands::lifecycle::enable(&app()?, &args).await,
            Command::Disable(args) => commands::lifecycle::disable(&app()?, &args).await,
            Command::Kickstart(args) => commands::lifecycle::kickstart(&app()?, &args).await,
            Command::Kill(args) => commands::lifecycle::kill(&app()?, &args).await,
            Command::Config(cmd) => {
                let output = OutputContext::new(no_color, quiet);
                commands::config::run(&YamlConfigStore, &Renderer::new(json, &output), cmd)
            }
            Command::Version => {
                let output = OutputContext::new(no_color, quiet);
                commands::version::run(&Renderer::new(json, &output))
            }
        }
    }
}
