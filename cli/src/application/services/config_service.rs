//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{LaunchkitConfig, apply_config_value};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read.
pub fn load_config(store: &impl ConfigStore) -> Result<LaunchkitConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &LaunchkitConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist one `key = value` setting.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or on I/O failure.
/// Nothing is written when validation fails.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<LaunchkitConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
