//! Application service: the `launchctl` client.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Every operation issues exactly one `launchctl` invocation through the
//! injected [`CommandRunner`] and waits for it; nothing is cached between
//! calls.

use std::path::Path;

use tracing::{debug, warn};

use crate::application::ports::{CommandRunner, TimedOut};
use crate::domain::error::LaunchctlError;
use crate::domain::exit_code::{self, EINVAL, EIO, ETIMEDOUT};
use crate::domain::listing::parse_service_names;
use crate::domain::service::{ServiceInfo, parse_service_info};
use crate::domain::target::{DomainTarget, ServiceTarget};

/// Message used when a plist carries no `Label`.
pub const MISSING_LABEL: &str = "Provided file does not contain service label.";

/// Client for one `launchctl` binary.
pub struct Launchctl<R: CommandRunner> {
    runner: R,
    program: String,
    plutil: String,
}

impl<R: CommandRunner> Launchctl<R> {
    /// Create a client running `program` (usually `/bin/launchctl`) and
    /// reading plists with `plutil`.
    pub fn new(runner: R, program: impl Into<String>, plutil: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            plutil: plutil.into(),
        }
    }

    /// Operations scoped to one domain.
    #[must_use]
    pub fn domain(&self, target: DomainTarget) -> Domain<'_, R> {
        Domain {
            launchctl: self,
            target,
        }
    }

    /// Operations on one service.
    #[must_use]
    pub fn service(&self, target: ServiceTarget) -> Service<'_, R> {
        Service {
            launchctl: self,
            target,
        }
    }

    /// Run `launchctl <args>` and return stdout on an accepted exit status.
    async fn run(&self, args: &[&str]) -> Result<String, LaunchctlError> {
        debug!(program = %self.program, ?args, "invoking launchctl");
        let output = self
            .runner
            .run(&self.program, args)
            .await
            .map_err(|e| invocation_error(&self.program, e))?;

        // `None` means the child was killed by a signal.
        let code = output.status.code().unwrap_or(-1);
        debug!(code, "launchctl exited");
        if !exit_code::is_accepted(code) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LaunchctlError::process(code, stderr.trim_end()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// The `Label` declared in a property-list file.
    async fn read_label(&self, plist: &Path) -> Result<String, LaunchctlError> {
        let path = plist.to_string_lossy();
        let output = self
            .runner
            .run(&self.plutil, &["-extract", "Label", "raw", "-o", "-", &*path])
            .await
            .map_err(|e| invocation_error(&self.plutil, e))?;

        let label = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() || label.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(path = %path, stderr = %stderr.trim_end(), "plist has no label");
            return Err(LaunchctlError::Configuration {
                code: EINVAL,
                message: MISSING_LABEL.to_string(),
            });
        }
        Ok(label)
    }
}

fn invocation_error(program: &str, source: anyhow::Error) -> LaunchctlError {
    let code = if source.downcast_ref::<TimedOut>().is_some() {
        warn!(program, "invocation timed out");
        ETIMEDOUT
    } else {
        source
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::raw_os_error)
            .unwrap_or(EIO)
    };
    LaunchctlError::Invocation {
        program: program.to_string(),
        code,
        source,
    }
}

// ── Domain ────────────────────────────────────────────────────────────────────

/// A `launchctl` client bound to one domain target.
pub struct Domain<'a, R: CommandRunner> {
    launchctl: &'a Launchctl<R>,
    target: DomainTarget,
}

impl<R: CommandRunner> Domain<'_, R> {
    #[must_use]
    pub fn target(&self) -> DomainTarget {
        self.target
    }

    /// Load the service defined by `plist` and return its address.
    ///
    /// The plist's `Label` is read first so an unlabeled file is rejected
    /// before anything is loaded.
    ///
    /// # Errors
    ///
    /// `Configuration` if the plist has no label, otherwise any
    /// [`LaunchctlError`] from the invocation.
    pub async fn bootstrap(&self, plist: &Path) -> Result<ServiceTarget, LaunchctlError> {
        let label = self.launchctl.read_label(plist).await?;
        let domain = self.target.to_string();
        let path = plist.to_string_lossy();
        self.launchctl
            .run(&["bootstrap", domain.as_str(), &*path])
            .await?;
        Ok(self.target.service(label))
    }

    /// Unload the service defined by `plist`.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn bootout_plist(&self, plist: &Path) -> Result<(), LaunchctlError> {
        let domain = self.target.to_string();
        let path = plist.to_string_lossy();
        self.launchctl
            .run(&["bootout", domain.as_str(), &*path])
            .await
            .map(drop)
    }

    /// Unload the service called `label` in this domain.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn bootout_label(&self, label: &str) -> Result<(), LaunchctlError> {
        self.launchctl
            .service(self.target.service(label))
            .bootout()
            .await
    }

    /// Services loaded into this domain, in dump order.
    ///
    /// # Errors
    ///
    /// `MalformedOutput` if the dump has no `services` block.
    pub async fn list(&self) -> Result<Vec<ServiceTarget>, LaunchctlError> {
        let output = self.print().await?;
        let names = parse_service_names(&output)
            .map_err(|e| LaunchctlError::malformed("No services dict found.", output.as_str(), e))?;
        Ok(names
            .into_iter()
            .map(|name| self.target.service(name))
            .collect())
    }

    /// Raw domain dump.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn print(&self) -> Result<String, LaunchctlError> {
        let domain = self.target.to_string();
        self.launchctl.run(&["print", domain.as_str()]).await
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// A `launchctl` client bound to one service target.
pub struct Service<'a, R: CommandRunner> {
    launchctl: &'a Launchctl<R>,
    target: ServiceTarget,
}

impl<R: CommandRunner> Service<'_, R> {
    #[must_use]
    pub fn target(&self) -> &ServiceTarget {
        &self.target
    }

    async fn run(&self, verb: &str) -> Result<(), LaunchctlError> {
        let target = self.target.to_string();
        self.launchctl.run(&[verb, target.as_str()]).await.map(drop)
    }

    /// Unload the service.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn bootout(&self) -> Result<(), LaunchctlError> {
        self.run("bootout").await
    }

    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn enable(&self) -> Result<(), LaunchctlError> {
        self.run("enable").await
    }

    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn disable(&self) -> Result<(), LaunchctlError> {
        self.run("disable").await
    }

    /// Force the service to start, killing a running instance first if `kill`.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn kickstart(&self, kill: bool) -> Result<(), LaunchctlError> {
        let target = self.target.to_string();
        let mut args = vec!["kickstart"];
        if kill {
            args.push("-k");
        }
        args.push(target.as_str());
        self.launchctl.run(&args).await.map(drop)
    }

    /// Send `signal` to the service's process.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn kill(&self, signal: i32) -> Result<(), LaunchctlError> {
        let target = self.target.to_string();
        let signal = signal.to_string();
        self.launchctl
            .run(&["kill", signal.as_str(), target.as_str()])
            .await
            .map(drop)
    }

    /// Raw service dump.
    ///
    /// # Errors
    ///
    /// Any [`LaunchctlError`] from the invocation.
    pub async fn print(&self) -> Result<String, LaunchctlError> {
        let target = self.target.to_string();
        self.launchctl.run(&["print", target.as_str()]).await
    }

    /// Structured view of the service dump.
    ///
    /// # Errors
    ///
    /// `MalformedOutput` if the dump is not a daemon or login item, otherwise
    /// any [`LaunchctlError`] from the invocation.
    pub async fn info(&self) -> Result<ServiceInfo, LaunchctlError> {
        let output = self.print().await?;
        parse_service_info(&output).map_err(|e| {
            LaunchctlError::malformed(
                format!("Unsupported description of {}.", self.target),
                output.as_str(),
                e,
            )
        })
    }
}
