//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::exit_code;

// ── Extraction errors ─────────────────────────────────────────────────────────

/// Failures of the container/field extractor and the service mapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// One named scalar, container or pattern is absent from the dump.
    #[error("{what} '{key}' not found")]
    FieldNotFound { what: &'static str, key: String },

    /// A dictionary line lacks the key/value separator.
    #[error("entry '{line}' in '{key}' has no '{separator}' separator")]
    MalformedEntry {
        key: String,
        line: String,
        separator: String,
    },

    /// Depth counting and indentation disagree about where a block ends.
    #[error("ambiguous nesting in block '{name}' opened at line {line}")]
    AmbiguousNesting { name: String, line: usize },

    /// Neither a daemon nor a login item could be recognised.
    #[error("service information has unsupported format")]
    UnrecognizedShape,
}

impl ParseError {
    #[must_use]
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::FieldNotFound {
            what,
            key: key.into(),
        }
    }

    /// Whether this error only means "the optional thing is not there".
    ///
    /// Structural errors such as `AmbiguousNesting` are not absence.
    #[must_use]
    pub fn is_absence(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. } | Self::MalformedEntry { .. })
    }
}

// ── Addressing errors ─────────────────────────────────────────────────────────

/// Errors parsing domain/service target strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetParseError {
    #[error("Unknown domain target '{0}'. Expected system, gui/<uid>, pid/<pid>, user/<uid>, login/<asid> or session/<asid>")]
    UnknownDomain(String),

    #[error("Invalid {domain} id '{id}': must be numeric")]
    InvalidId { domain: String, id: String },

    #[error("Service target '{0}' has no service name")]
    MissingName(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

// ── launchctl errors ──────────────────────────────────────────────────────────

/// The one error shape callers of the `Launchctl` client see.
///
/// Every variant carries a numeric code, its description and diagnostic text.
/// Output that could not be understood is reported under
/// [`exit_code::INVALID_PROPERTY_LIST`] so it can be told apart from ordinary
/// tool failures by code alone.
#[derive(Debug, Error)]
pub enum LaunchctlError {
    /// `launchctl` exited with a status outside the accepted set.
    #[error("launchctl failed ({code}): {description}")]
    Process {
        code: i32,
        description: String,
        stderr: String,
    },

    /// `launchctl` succeeded but its output is not a recognised shape.
    #[error("{message} ({}: {})", exit_code::INVALID_PROPERTY_LIST, exit_code::describe(exit_code::INVALID_PROPERTY_LIST))]
    MalformedOutput {
        message: String,
        output: String,
        #[source]
        source: ParseError,
    },

    /// A caller-supplied input is itself invalid.
    #[error("{message} ({code}: {})", exit_code::describe(*code))]
    Configuration { code: i32, message: String },

    /// The external tool could not be run to completion.
    #[error("failed to run {program} ({code}): {source}")]
    Invocation {
        program: String,
        code: i32,
        #[source]
        source: anyhow::Error,
    },
}

impl LaunchctlError {
    /// Build a `Process` error from an exit code and captured stderr.
    #[must_use]
    pub fn process(code: i32, stderr: impl Into<String>) -> Self {
        Self::Process {
            code,
            description: exit_code::describe(code),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>, output: impl Into<String>, source: ParseError) -> Self {
        Self::MalformedOutput {
            message: message.into(),
            output: output.into(),
            source,
        }
    }

    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Process { code, .. }
            | Self::Configuration { code, .. }
            | Self::Invocation { code, .. } => *code,
            Self::MalformedOutput { .. } => exit_code::INVALID_PROPERTY_LIST,
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Process { description, .. } => description.clone(),
            _ => exit_code::describe(self.code()),
        }
    }

    /// Raw diagnostic text: the tool's stderr, or the message we attached.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Process { stderr, .. } => stderr.clone(),
            Self::MalformedOutput { message, .. } | Self::Configuration { message, .. } => {
                message.clone()
            }
            Self::Invocation { source, .. } => format!("{source:#}"),
        }
    }
}
