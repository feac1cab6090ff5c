//! Output formatting module

pub mod human;
pub mod json;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

use crate::domain::config::LaunchkitConfig;
use crate::domain::service::ServiceInfo;
use crate::domain::target::ServiceTarget;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Human or JSON rendering, chosen once per invocation.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl<'a> Renderer<'a> {
    /// Pick the renderer for the `--json` flag without building an `AppContext`.
    #[must_use]
    pub fn new(json: bool, ctx: &'a OutputContext) -> Self {
        if json {
            Self::Json(JsonRenderer)
        } else {
            Self::Human(HumanRenderer::new(ctx))
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_service_info(&self, target: &ServiceTarget, info: &ServiceInfo) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_service_info(target, info);
                Ok(())
            }
            Self::Json(r) => r.render_service_info(target, info),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_service_list(&self, services: &[ServiceTarget]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_service_list(services);
                Ok(())
            }
            Self::Json(r) => r.render_service_list(services),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_dump(&self, target: &str, output: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_dump(output);
                Ok(())
            }
            Self::Json(r) => r.render_dump(target, output),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &LaunchkitConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// Confirm a `config set`; JSON mode prints the whole updated config.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_set(
        &self,
        key: &str,
        value: &str,
        config: &LaunchkitConfig,
        path: &Path,
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config_set(key, value);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }
}
