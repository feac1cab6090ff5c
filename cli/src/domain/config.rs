//! Domain types and validators for launchkit configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::target::DomainTarget;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "launchctl.path",
    "launchctl.timeout_secs",
    "plutil.path",
    "domain.default",
];

/// Shorthand for the `gui` domain of the current user.
pub const CURRENT_GUI: &str = "gui";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.launchkit/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LaunchkitConfig {
    pub launchctl: LaunchctlConfig,
    pub plutil: PlutilConfig,
    pub domain: DomainConfig,
}

/// How to run `launchctl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchctlConfig {
    pub path: String,
    /// Seconds before a hung invocation is killed.
    pub timeout_secs: u64,
}

impl Default for LaunchctlConfig {
    fn default() -> Self {
        Self {
            path: "/bin/launchctl".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Property-list tool used to read a plist's `Label`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlutilConfig {
    pub path: String,
}

impl Default for PlutilConfig {
    fn default() -> Self {
        Self {
            path: "/usr/bin/plutil".to_string(),
        }
    }
}

/// Domain used when a command names a bare service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// `gui` for the current user's session, or any domain target string.
    pub default: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            default: CURRENT_GUI.to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    match key {
        "launchctl.timeout_secs" => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => {}
            _ => return Err(invalid("Expected a positive number of seconds").into()),
        },
        "launchctl.path" | "plutil.path" => {
            if !value.starts_with('/') {
                return Err(invalid("Expected an absolute path").into());
            }
        }
        "domain.default" => {
            if value != CURRENT_GUI && value.parse::<DomainTarget>().is_err() {
                return Err(invalid(
                    "Expected gui, system, gui/<uid>, user/<uid>, pid/<pid>, login/<asid> or session/<asid>",
                )
                .into());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Check a loaded configuration with the same rules `config set` applies.
///
/// A hand-edited file can hold values no `config set` would accept, such as
/// a zero timeout. `domain.default` is checked where it is resolved, so a
/// `--domain` flag can still override a broken default.
///
/// # Errors
///
/// Returns an error naming the first invalid setting.
pub fn validate_config(config: &LaunchkitConfig) -> Result<()> {
    validate_config_value("launchctl.path", &config.launchctl.path)?;
    validate_config_value(
        "launchctl.timeout_secs",
        &config.launchctl.timeout_secs.to_string(),
    )?;
    validate_config_value("plutil.path", &config.plutil.path)
}

/// Apply a validated `key = value` to `config`.
///
/// # Errors
///
/// Returns an error if the key or value is invalid.
pub fn apply_config_value(config: &mut LaunchkitConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "launchctl.path" => config.launchctl.path = value.to_string(),
        "launchctl.timeout_secs" => config.launchctl.timeout_secs = value.parse()?,
        "plutil.path" => config.plutil.path = value.to_string(),
        "domain.default" => config.domain.default = value.to_string(),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
