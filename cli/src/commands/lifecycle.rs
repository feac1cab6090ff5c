//! Lifecycle commands: bootstrap, bootout, enable, disable, kickstart, kill.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::ServiceArgs;
use crate::output::Renderer;

/// Arguments for the bootstrap command.
#[derive(Args)]
pub struct BootstrapArgs {
    /// Property list defining the service
    pub plist: PathBuf,
}

/// Arguments for the bootout command.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct BootoutArgs {
    /// Service to unload
    pub service: Option<String>,

    /// Unload the service defined by this property list instead
    #[arg(long)]
    pub plist: Option<PathBuf>,
}

/// Arguments for the kickstart command.
#[derive(Args)]
pub struct KickstartArgs {
    /// Kill a running instance before starting
    #[arg(short, long)]
    pub kill: bool,

    /// Service name (uses --domain) or full target
    pub service: String,
}

/// Arguments for the kill command.
#[derive(Args)]
pub struct KillArgs {
    /// Signal number or name (TERM, SIGKILL, ...)
    #[arg(value_parser = parse_signal)]
    pub signal: i32,

    /// Service name (uses --domain) or full target
    pub service: String,
}

fn done(app: &AppContext, action: &str, target: &str) -> Result<ExitCode> {
    match app.renderer() {
        Renderer::Json(r) => r.render_done(action, target)?,
        Renderer::Human(_) => app.output.success(&format!("{action} {target}")),
    }
    Ok(ExitCode::SUCCESS)
}

/// Load a service from its property list into the selected domain.
///
/// # Errors
///
/// Returns an error if the plist has no label or `launchctl` fails.
pub async fn bootstrap(app: &AppContext, args: &BootstrapArgs) -> Result<ExitCode> {
    let target = app
        .launchctl
        .domain(app.domain)
        .bootstrap(&args.plist)
        .await?;
    done(app, "Bootstrapped", &target.to_string())
}

/// Unload a service by name or by property list.
///
/// # Errors
///
/// Returns an error if the target is invalid or `launchctl` fails.
pub async fn bootout(app: &AppContext, args: &BootoutArgs) -> Result<ExitCode> {
    if let Some(plist) = &args.plist {
        app.launchctl
            .domain(app.domain)
            .bootout_plist(plist)
            .await?;
        return done(app, "Booted out", &plist.display().to_string());
    }
    let service = args.service.as_deref().unwrap_or_default();
    let target = app.service_target(service)?;
    app.launchctl.service(target.clone()).bootout().await?;
    done(app, "Booted out", &target.to_string())
}

/// # Errors
///
/// Returns an error if the target is invalid or `launchctl` fails.
pub async fn enable(app: &AppContext, args: &ServiceArgs) -> Result<ExitCode> {
    let target = app.service_target(&args.service)?;
    app.launchctl.service(target.clone()).enable().await?;
    done(app, "Enabled", &target.to_string())
}

/// # Errors
///
/// Returns an error if the target is invalid or `launchctl` fails.
pub async fn disable(app: &AppContext, args: &ServiceArgs) -> Result<ExitCode> {
    let target = app.service_target(&args.service)?;
    app.launchctl.service(target.clone()).disable().await?;
    done(app, "Disabled", &target.to_string())
}

/// # Errors
///
/// Returns an error if the target is invalid or `launchctl` fails.
pub async fn kickstart(app: &AppContext, args: &KickstartArgs) -> Result<ExitCode> {
    let target = app.service_target(&args.service)?;
    app.launchctl.service(target.clone()).kickstart(args.kill).await?;
    done(app, "Kickstarted", &target.to_string())
}

/// # Errors
///
/// Returns an error if the target is invalid or `launchctl` fails.
pub async fn kill(app: &AppContext, args: &KillArgs) -> Result<ExitCode> {
    let target = app.service_target(&args.service)?;
    app.launchctl.service(target.clone()).kill(args.signal).await?;
    done(app, &format!("Sent signal {} to", args.signal), &target.to_string())
}

/// Accept a signal number or a name with or without the `SIG` prefix.
fn parse_signal(value: &str) -> Result<i32, String> {
    if let Ok(number) = value.parse::<i32>() {
        return if number > 0 {
            Ok(number)
        } else {
            Err(format!("invalid signal number {number}"))
        };
    }
    signal_by_name(value)
}

#[cfg(unix)]
fn signal_by_name(value: &str) -> Result<i32, String> {
    use std::str::FromStr as _;

    let upper = value.to_ascii_uppercase();
    let name = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{upper}")
    };
    nix::sys::signal::Signal::from_str(&name)
        .map(|signal| signal as i32)
        .map_err(|_| format!("unknown signal '{value}'"))
}

#[cfg(not(unix))]
fn signal_by_name(value: &str) -> Result<i32, String> {
    Err(format!("unknown signal '{value}'; pass a number"))
}
