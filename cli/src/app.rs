//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the global flags and the stored
//! configuration, then handed to every command as `&AppContext`.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::application::services::Launchctl;
use crate::domain::config::{CURRENT_GUI, LaunchkitConfig, validate_config};
use crate::domain::target::{DomainTarget, ServiceTarget};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Domain override for bare service names.
    pub domain: Option<String>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// `launchctl` client built from the loaded configuration.
    pub launchctl: Launchctl<TokioCommandRunner>,
    /// Domain used for bare service names and domain-scoped commands.
    pub domain: DomainTarget,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, holds a value
    /// that `config set` would reject, or the selected domain is not a valid
    /// domain target.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let config = YamlConfigStore.load()?;
        Self::with_config(flags, &config)
    }

    fn with_config(flags: &AppFlags, config: &LaunchkitConfig) -> Result<Self> {
        validate_config(config)?;
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let domain = resolve_domain(flags.domain.as_deref().unwrap_or(&config.domain.default))?;
        let runner =
            TokioCommandRunner::new(Duration::from_secs(config.launchctl.timeout_secs));

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            launchctl: Launchctl::new(runner, &config.launchctl.path, &config.plutil.path),
            domain,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Address a service given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if `arg` looks like a full target but does not parse.
    pub fn service_target(&self, arg: &str) -> Result<ServiceTarget> {
        resolve_service(self.domain, arg)
    }
}

/// Parse a domain argument, expanding `gui` to the current user's session.
///
/// # Errors
///
/// Returns an error if `arg` is not a domain target.
pub fn resolve_domain(arg: &str) -> Result<DomainTarget> {
    if arg == CURRENT_GUI {
        return current_gui();
    }
    arg.parse()
        .with_context(|| format!("invalid domain '{arg}'"))
}

#[cfg(unix)]
fn current_gui() -> Result<DomainTarget> {
    Ok(DomainTarget::current_gui())
}

#[cfg(not(unix))]
fn current_gui() -> Result<DomainTarget> {
    anyhow::bail!("the gui domain needs a user id here; pass gui/<uid>")
}

/// A bare name is placed in `domain`; anything with a `/` must be a full
/// service target.
///
/// # Errors
///
/// Returns an error if `arg` contains `/` but is not a service target.
pub fn resolve_service(domain: DomainTarget, arg: &str) -> Result<ServiceTarget> {
    if arg.contains('/') {
        return arg
            .parse()
            .with_context(|| format!("invalid service target '{arg}'"));
    }
    if arg.is_empty() {
        anyhow::bail!("service name must not be empty");
    }
    Ok(domain.service(arg))
}
