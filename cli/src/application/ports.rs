//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

use crate::domain::config::LaunchkitConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or outlives the
    /// runner's deadline. On timeout the child must be killed (not left
    /// orphaned) and the error must be a [`TimedOut`].
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

/// Returned by a [`CommandRunner`] when a child outlives its deadline.
#[derive(Debug, Error)]
#[error("{program} timed out after {}s", timeout.as_secs())]
pub struct TimedOut {
    pub program: String,
    pub timeout: Duration,
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    fn load(&self) -> Result<LaunchkitConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &LaunchkitConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
