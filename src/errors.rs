//! Error types for threat store loading, rendering and remote export.
//!
//! Every failure in the pipeline is fatal: components return a
//! [`ThreatError`] and the driver in `main` is the only place the process
//! terminates. Each variant carries a stable [`ErrorCode`] so diagnostics can
//! be matched programmatically.
//!
//! # Error Codes
//!
//! - E001-E009: I/O and filesystem errors
//! - E010-E019: Parse and key errors
//! - E020-E029: Configuration errors
//! - E030-E039: Remote issue tracker errors
//! - E040-E049: Credential errors
//!
//! # Example
//!
//! ```rust
//! use threatutil::errors::{ErrorCode, ThreatError};
//!
//! let err = ThreatError::malformed_key("BADKEY", "PREFIX-<digits>");
//! assert_eq!(err.code(), ErrorCode::MALFORMED_KEY);
//! assert!(err.to_string().contains("BADKEY"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - input or output could not be accessed
    pub const IO: ErrorCode = ErrorCode("E001");
    /// Parse error - malformed structured input
    pub const PARSE: ErrorCode = ErrorCode("E010");
    /// Parse error - identifier does not match `PREFIX-<digits>`
    pub const MALFORMED_KEY: ErrorCode = ErrorCode("E011");
    /// Config error - invalid configuration file
    pub const CONFIG: ErrorCode = ErrorCode("E020");
    /// Remote error - custom field holds an unexpected type
    pub const UNEXPECTED_TYPE: ErrorCode = ErrorCode("E030");
    /// Remote error - transport or HTTP status failure
    pub const REMOTE: ErrorCode = ErrorCode("E031");
    /// Credential error - no entry for the requested host
    pub const CREDENTIAL_NOT_FOUND: ErrorCode = ErrorCode("E040");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for threatutil operations
#[derive(Debug, Error)]
pub enum ThreatError {
    /// Input file unreadable or output not writable
    #[error("I/O error{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Structured input is malformed or does not match the record shape
    #[error("Parse error{}: {message}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// Identifier does not match the expected key pattern
    #[error("Malformed key '{key}': expected {expected}")]
    MalformedKey { key: String, expected: String },

    /// Remote custom field holds something other than a string
    #[error("Unexpected type for field '{field}' on issue {issue}: found {found}")]
    UnexpectedType {
        issue: String,
        field: String,
        found: &'static str,
    },

    /// No credentials entry matches the host
    #[error("No credentials for host '{host}' in {}", .path.display())]
    CredentialNotFound { host: String, path: PathBuf },

    /// Transport failure or non-success response from the issue tracker
    #[error("Remote error: {message}")]
    Remote {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Configuration file errors
    #[error("Configuration error{}: {message}", display_path(.path))]
    Config {
        path: Option<PathBuf>,
        message: String,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl ThreatError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a parse error without a source path (e.g. from a reader).
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            path: None,
            message: message.into(),
        }
    }

    /// Create a malformed key error; `expected` describes the accepted shape.
    pub fn malformed_key(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.into(),
            expected: expected.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
            source: None,
        }
    }

    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            path,
            message: message.into(),
        }
    }

    /// Attach a path to errors that can carry one and do not have it yet.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io { path: None, source } => Self::Io {
                path: Some(path.into()),
                source,
            },
            Self::Parse {
                path: None,
                message,
            } => Self::Parse {
                path: Some(path.into()),
                message,
            },
            other => other,
        }
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::IO,
            Self::Parse { .. } => ErrorCode::PARSE,
            Self::MalformedKey { .. } => ErrorCode::MALFORMED_KEY,
            Self::UnexpectedType { .. } => ErrorCode::UNEXPECTED_TYPE,
            Self::CredentialNotFound { .. } => ErrorCode::CREDENTIAL_NOT_FOUND,
            Self::Remote { .. } => ErrorCode::REMOTE,
            Self::Config { .. } => ErrorCode::CONFIG,
        }
    }
}

impl From<std::io::Error> for ThreatError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

impl From<reqwest::Error> for ThreatError {
    fn from(source: reqwest::Error) -> Self {
        Self::Remote {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ThreatError>;
