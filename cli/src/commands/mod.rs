//! Command implementations

pub mod config;
pub mod info;
pub mod lifecycle;
pub mod list;
pub mod print;
pub mod version;

use clap::Args;

/// A service given as a bare name or a full `<domain>/<name>` target.
#[derive(Args)]
pub struct ServiceArgs {
    /// Service name (uses --domain) or full target such as gui/501/com.example.agent
    pub service: String,
}
