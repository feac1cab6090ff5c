//! `launchkit list`: services loaded in a domain.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;

/// Run the list command against the selected domain.
///
/// # Errors
///
/// Returns an error if `launchctl` fails or its output has no services block.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let services = app.launchctl.domain(app.domain).list().await?;
    app.renderer().render_service_list(&services)?;
    Ok(ExitCode::SUCCESS)
}
