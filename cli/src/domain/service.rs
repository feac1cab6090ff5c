//! Typed view of one service's `launchctl print` dump.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::ParseError;
use crate::domain::extract::{self, DICT_SEPARATOR};

#[allow(clippy::expect_used)] // static regex literals are compile-time constants
static SIGNAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"last terminating signal = .*: (.*)").expect("valid regex")
});

#[allow(clippy::expect_used)] // static regex literals are compile-time constants
static PROGRAM_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)program identifier = (.*?)(?: |$)").expect("valid regex")
});

/// Everything we understand about one loaded service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub pid: Option<i32>,
    pub kind: ServiceKind,
    /// Names of the Mach endpoints the service registers.
    pub endpoints: Option<BTreeSet<String>>,
    pub environment: Environment,
    pub last_exit_reason: Option<ExitReason>,
}

impl ServiceInfo {
    #[must_use]
    pub fn daemon(&self) -> Option<&DaemonInfo> {
        match &self.kind {
            ServiceKind::Daemon(daemon) => Some(daemon),
            ServiceKind::LoginItem(_) => None,
        }
    }

    #[must_use]
    pub fn login_item(&self) -> Option<&LoginItemInfo> {
        match &self.kind {
            ServiceKind::LoginItem(item) => Some(item),
            ServiceKind::Daemon(_) => None,
        }
    }
}

/// The two service shapes we recognise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Daemon(DaemonInfo),
    LoginItem(LoginItemInfo),
}

/// A service launched directly from a program path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonInfo {
    pub plist_path: String,
    pub program: String,
    pub arguments: Option<Vec<String>>,
    pub bundle_id: Option<String>,
}

/// A service registered as a login item of a parent application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginItemInfo {
    pub identifier: String,
    pub parent_identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub generic: Option<BTreeMap<String, String>>,
    pub default: Option<BTreeMap<String, String>>,
    pub inherited: Option<BTreeMap<String, String>>,
}

/// How the last run of the service ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    Signal(i32),
    ExitCode(i32),
}

/// Read an optional field: any extraction failure makes it `None`.
///
/// Failures other than plain absence are logged so unreadable sections stay
/// visible under `--verbose`.
fn optional<T>(field: &str, result: Result<T, ParseError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if !e.is_absence() {
                debug!(field, error = %e, "unreadable optional field");
            }
            None
        }
    }
}

/// Map a service dump to [`ServiceInfo`].
///
/// A daemon needs `path` and `program`, a login item needs `program
/// identifier` and `parent bundle identifier`; when both shapes are present
/// the daemon wins. All other fields are optional, and a section that cannot
/// be read is reported as absent.
///
/// # Errors
///
/// Returns [`ParseError::UnrecognizedShape`] when neither shape is present.
pub fn parse_service_info(text: &str) -> Result<ServiceInfo, ParseError> {
    let kind = match (daemon_info(text), login_item_info(text)) {
        (Some(daemon), _) => ServiceKind::Daemon(daemon),
        (None, Some(item)) => ServiceKind::LoginItem(item),
        (None, None) => return Err(ParseError::UnrecognizedShape),
    };

    Ok(ServiceInfo {
        pid: optional("pid", extract::scalar(text, "pid"))
            .and_then(|pid| pid.trim().parse().ok()),
        kind,
        endpoints: endpoints(text),
        environment: environment(text),
        last_exit_reason: exit_reason(text),
    })
}

fn daemon_info(text: &str) -> Option<DaemonInfo> {
    let plist_path = optional("path", extract::scalar(text, "path"))?;
    let program = optional("program", extract::scalar(text, "program"))?;
    let arguments = optional("arguments", extract::list(text, "arguments"))
        .map(|args| args.into_iter().map(str::to_string).collect());
    let bundle_id = optional("bundle id", extract::scalar(text, "bundle id")).map(str::to_string);

    Some(DaemonInfo {
        plist_path: plist_path.to_string(),
        program: program.to_string(),
        arguments,
        bundle_id,
    })
}

fn login_item_info(text: &str) -> Option<LoginItemInfo> {
    let identifier = optional(
        "program identifier",
        extract::capture(text, &PROGRAM_IDENTIFIER_RE),
    )?;
    let parent = optional(
        "parent bundle identifier",
        extract::scalar(text, "parent bundle identifier"),
    )?;
    Some(LoginItemInfo {
        identifier: identifier.to_string(),
        parent_identifier: parent.to_string(),
    })
}

fn endpoints(text: &str) -> Option<BTreeSet<String>> {
    let names = extract::extract_container(text, "endpoints")
        .and_then(|body| extract::extract_containers(body, None));
    optional("endpoints", names).map(|names| names.into_keys().map(str::to_string).collect())
}

fn environment(text: &str) -> Environment {
    let section = |key: &str| optional(key, extract::dictionary(text, key, DICT_SEPARATOR));
    Environment {
        generic: section("environment"),
        default: section("default environment"),
        inherited: section("inherited environment"),
    }
}

fn exit_reason(text: &str) -> Option<ExitReason> {
    if let Some(signal) = extract::capture(text, &SIGNAL_RE)
        .ok()
        .and_then(|value| value.trim().parse().ok())
    {
        return Some(ExitReason::Signal(signal));
    }
    // "(never exited)" does not parse and maps to None.
    extract::scalar(text, "last exit code")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .map(ExitReason::ExitCode)
}
