//! `launchkit info`: structured view of one service.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::ServiceArgs;

/// Run the info command.
///
/// # Errors
///
/// Returns an error if the target is invalid, `launchctl` fails, or the dump
/// is neither a daemon nor a login item.
pub async fn run(app: &AppContext, args: &ServiceArgs) -> Result<ExitCode> {
    let target = app.service_target(&args.service)?;
    let service = app.launchctl.service(target);
    let info = service.info().await?;
    app.renderer().render_service_info(service.target(), &info)?;
    Ok(ExitCode::SUCCESS)
}
