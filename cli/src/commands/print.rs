//! `launchkit print`: raw `launchctl print` dump of a service or domain.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;

/// Arguments for the print command.
#[derive(Args)]
pub struct PrintArgs {
    /// Service to print; the whole domain is printed when omitted
    pub service: Option<String>,
}

/// Run the print command.
///
/// # Errors
///
/// Returns an error if the target is invalid or `launchctl` fails.
pub async fn run(app: &AppContext, args: &PrintArgs) -> Result<ExitCode> {
    let (target, output) = match &args.service {
        Some(service) => {
            let target = app.service_target(service)?;
            let output = app.launchctl.service(target.clone()).print().await?;
            (target.to_string(), output)
        }
        None => {
            let output = app.launchctl.domain(app.domain).print().await?;
            (app.domain.to_string(), output)
        }
    };
    app.renderer().render_dump(&target, &output)?;
    Ok(ExitCode::SUCCESS)
}
