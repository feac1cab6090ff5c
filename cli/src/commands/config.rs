//! `launchkit config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::output::Renderer;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// Only the store and renderer are needed, so a broken domain setting never
/// blocks reading or repairing the configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated or saved.
pub fn run(
    store: &impl ConfigStore,
    renderer: &Renderer<'_>,
    cmd: ConfigCommand,
) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(store, renderer),
        ConfigCommand::Set { key, value } => set_config(store, renderer, &key, &value),
    }
}

fn show_config(store: &impl ConfigStore, renderer: &Renderer<'_>) -> Result<ExitCode> {
    let config = config_service::load_config(store)?;
    renderer.render_config(&config, &store.path()?)?;
    Ok(ExitCode::SUCCESS)
}

fn set_config(
    store: &impl ConfigStore,
    renderer: &Renderer<'_>,
    key: &str,
    value: &str,
) -> Result<ExitCode> {
    let config = config_service::set_config_value(store, key, value)?;
    renderer.render_config_set(key, value, &config, &store.path()?)?;
    Ok(ExitCode::SUCCESS)
}
