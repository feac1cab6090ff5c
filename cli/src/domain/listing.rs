//! Service names from a domain dump (`launchctl print <domain>`).

use crate::domain::error::ParseError;
use crate::domain::extract;

/// Names listed in the domain's `services` block, in dump order.
///
/// Each line is `<pid> <status> <name>`; only the last column is kept.
///
/// # Errors
///
/// Returns [`ParseError::FieldNotFound`] if the dump has no `services` block.
pub fn parse_service_names(text: &str) -> Result<Vec<String>, ParseError> {
    Ok(extract::list(text, "services")?
        .into_iter()
        .filter_map(|line| line.split_whitespace().last())
        .map(str::to_string)
        .collect())
}
