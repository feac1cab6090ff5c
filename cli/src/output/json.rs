//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed JSON document
//! on stdout, including failures.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

use crate::domain::config::LaunchkitConfig;
use crate::domain::error::LaunchctlError;
use crate::domain::service::ServiceInfo;
use crate::domain::target::ServiceTarget;

/// Renders domain types as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_json(&json!({ "version": version }))
    }

    /// Render the mapped state of one service.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_service_info(&self, target: &ServiceTarget, info: &ServiceInfo) -> Result<()> {
        print_json(&json!({
            "target": target.to_string(),
            "info": info,
        }))
    }

    /// Render a list of services.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_service_list(&self, services: &[ServiceTarget]) -> Result<()> {
        let targets: Vec<String> = services.iter().map(ToString::to_string).collect();
        print_json(&json!({ "services": targets }))
    }

    /// Render the outcome of a command that only reports success.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_done(&self, action: &str, target: &str) -> Result<()> {
        print_json(&json!({ "ok": true, "action": action, "target": target }))
    }

    /// Render the raw dump of a service or domain.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_dump(&self, target: &str, output: &str) -> Result<()> {
        print_json(&json!({ "target": target, "output": output }))
    }

    /// Render the current configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &LaunchkitConfig, path: &std::path::Path) -> Result<()> {
        print_json(&json!({ "path": path.display().to_string(), "config": config }))
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Format a JSON error object for a failed command.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": 113,
///   "description": "..."
/// }
/// ```
///
/// `code` and `description` are present only for `launchctl` failures.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(err: &anyhow::Error) -> Result<String> {
    let obj = match err.downcast_ref::<LaunchctlError>() {
        Some(launchctl) => json!({
            "error": true,
            "message": format!("{err:#}"),
            "code": launchctl.code(),
            "description": launchctl.description(),
            "diagnostic": launchctl.diagnostic(),
        }),
        None => json!({
            "error": true,
            "message": format!("{err:#}"),
        }),
    };
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
