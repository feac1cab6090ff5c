//! `launchctl` exit-code classification.
//!
//! Codes below 107 are plain errno values; 107..160 are launchd's own
//! conditions. Errno constants are the Darwin values since that is the only
//! platform `launchctl` runs on.

/// Operation not permitted.
pub const EPERM: i32 = 1;
/// Input/output error.
pub const EIO: i32 = 5;
/// Invalid argument.
pub const EINVAL: i32 = 22;
/// Operation now in progress. `launchctl` returns it for asynchronous success.
pub const EINPROGRESS: i32 = 36;
/// Operation timed out.
pub const ETIMEDOUT: i32 = 60;

/// Output could not be understood.
pub const INVALID_PROPERTY_LIST: i32 = 109;
/// Operation blocked by System Integrity Protection.
pub const SIP_ENGAGED: i32 = 150;

/// Exit statuses that count as success.
pub const ACCEPTED: &[i32] = &[0, EINPROGRESS];

const FIRST_LAUNCHD_CODE: i32 = 107;

const LAUNCHD_DESCRIPTIONS: [&str; 53] = [
    "Malformed bundle",
    "Invalid path",
    "Invalid property list",
    "Invalid or missing service identifier",
    "Invalid or missing Program/ProgramArguments",
    "Could not find specified domain",
    "Could not find specified service",
    "The specified username does not exist",
    "The specified group does not exist",
    "Routine not yet implemented",
    "(n/a)",
    "Bad response from server",
    "Service is disabled",
    "Bad subsystem destination for request",
    "Path not searched for services",
    "Path had bad ownership/permissions",
    "Path is whitelisted for domain",
    "Domain is tearing down",
    "Domain does not support specified action",
    "Request type is no longer supported",
    "The specified service did not ship with the operating system",
    "The specified path is not a bundle",
    "The service was superseded by a later later version",
    "The system encountered a condition where behavior was undefined",
    "Out of order requests",
    "Request for stale data",
    "Multiple errors were returned; see stderr",
    "Service cannot load in requested session",
    "Process is not managed",
    "Action not allowed on singleton service",
    "Service does not support the specified action",
    "Service cannot be loaded on this hardware",
    "Service cannot presently execute",
    "Service name is reserved or invalid",
    "Reentrancy avoided",
    "Operation only supported on development",
    "Requested entry was cached",
    "Requestor lacks required entitlement",
    "Endpoint is hidden",
    "Domain is in on-demand-only mode",
    "The specified service did not ship in the requestor",
    "The specified service path was not in the service cache",
    "Could not find a bundle of the given identifier through LaunchServices",
    "Operation not permitted while System Integrity Protection is engaged",
    "A complete hack",
    "Service cannot load in current boot environment",
    "Completely unexpected error",
    "Requestor is not a platform binary",
    "Refusing to execute/trust quarantined program/file",
    "Domain creation with that UID is not allowed anymore",
    "System service is not in system service whitelist",
    "Service cannot be loaded on current os variant",
    "Unknown error",
];

/// Whether `code` is a successful `launchctl` exit status.
#[must_use]
pub fn is_accepted(code: i32) -> bool {
    ACCEPTED.contains(&code)
}

/// Human description of a `launchctl` exit code.
#[must_use]
pub fn describe(code: i32) -> String {
    match code {
        0..FIRST_LAUNCHD_CODE => strerror(code),
        FIRST_LAUNCHD_CODE..160 => {
            // Range pattern guarantees a non-negative index below 53.
            #[allow(clippy::cast_sign_loss)]
            let idx = (code - FIRST_LAUNCHD_CODE) as usize;
            LAUNCHD_DESCRIPTIONS[idx].to_string()
        }
        _ => "unknown error code".to_string(),
    }
}

/// Platform errno text without the `(os error N)` suffix std appends.
fn strerror(code: i32) -> String {
    let text = std::io::Error::from_raw_os_error(code).to_string();
    match text.rfind(" (os error ") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}
