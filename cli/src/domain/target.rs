//! Addressing model: where a service lives and what it is called.
//!
//! Pure value types. `Display` renders the exact argument strings `launchctl`
//! expects; `FromStr` is its inverse so the same strings can be accepted on
//! the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::TargetParseError;

/// A scope of services: system-wide, a user session, a process, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum DomainTarget {
    /// System-wide daemons, privileged helpers, system extensions.
    System,
    /// Per-user agents and login items of a GUI login session.
    Gui(u32),
    Pid(i32),
    User(u32),
    Login(i32),
    Session(i32),
}

impl DomainTarget {
    /// The `gui` domain of the user running this process.
    #[cfg(unix)]
    #[must_use]
    pub fn current_gui() -> Self {
        Self::Gui(nix::unistd::getuid().as_raw())
    }

    /// Qualify `name` with this domain.
    #[must_use]
    pub fn service(self, name: impl Into<String>) -> ServiceTarget {
        ServiceTarget::new(self, name)
    }
}

impl fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("system"),
            Self::Gui(uid) => write!(f, "gui/{uid}"),
            Self::Pid(pid) => write!(f, "pid/{pid}"),
            Self::User(uid) => write!(f, "user/{uid}"),
            Self::Login(asid) => write!(f, "login/{asid}"),
            Self::Session(asid) => write!(f, "session/{asid}"),
        }
    }
}

impl FromStr for DomainTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "system" {
            return Ok(Self::System);
        }
        let (kind, id) = s
            .split_once('/')
            .ok_or_else(|| TargetParseError::UnknownDomain(s.to_string()))?;
        let invalid = || TargetParseError::InvalidId {
            domain: kind.to_string(),
            id: id.to_string(),
        };
        match kind {
            "gui" => id.parse().map(Self::Gui).map_err(|_| invalid()),
            "pid" => id.parse().map(Self::Pid).map_err(|_| invalid()),
            "user" => id.parse().map(Self::User).map_err(|_| invalid()),
            "login" => id.parse().map(Self::Login).map_err(|_| invalid()),
            "session" => id.parse().map(Self::Session).map_err(|_| invalid()),
            _ => Err(TargetParseError::UnknownDomain(s.to_string())),
        }
    }
}

/// Fully qualified address of one service: `<domain>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceTarget {
    pub domain: DomainTarget,
    pub name: String,
}

impl ServiceTarget {
    #[must_use]
    pub fn new(domain: DomainTarget, name: impl Into<String>) -> Self {
        Self {
            domain,
            name: name.into(),
        }
    }
}

impl fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.name)
    }
}

impl FromStr for ServiceTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `system` has no id segment; every other domain has exactly one.
        let (domain, name) = if let Some(name) = s.strip_prefix("system/") {
            (DomainTarget::System, name)
        } else {
            let mut parts = s.splitn(3, '/');
            let (Some(kind), Some(id), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(TargetParseError::MissingName(s.to_string()));
            };
            (format!("{kind}/{id}").parse()?, name)
        };
        if name.is_empty() {
            return Err(TargetParseError::MissingName(s.to_string()));
        }
        Ok(Self::new(domain, name))
    }
}
