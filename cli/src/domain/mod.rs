//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod exit_code;
pub mod extract;
pub mod listing;
pub mod service;
pub mod target;

pub use config::{LaunchkitConfig, apply_config_value, validate_config_key, validate_config_value};
pub use error::{ConfigError, LaunchctlError, ParseError, TargetParseError};
pub use listing::parse_service_names;
pub use service::{
    DaemonInfo, Environment, ExitReason, LoginItemInfo, ServiceInfo, ServiceKind,
    parse_service_info,
};
pub use target::{DomainTarget, ServiceTarget};
