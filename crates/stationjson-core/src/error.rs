//! Error types for the StationJSON core library
//!
//! Conversion failures are fatal for the whole document: an absent optional
//! tag is never an error (it maps to `null`), but a missing required tag or a
//! malformed numeric value aborts the conversion. The HTTP and I/O variants
//! belong to the fetch layer.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for StationJSON operations
#[derive(Error, Debug)]
pub enum Error {
    /// A structurally mandatory tag is absent
    #[error("Missing required element '{tag}' at {path}")]
    MissingRequired {
        path: String,
        tag: String,
    },

    /// A tag is present but its text cannot be coerced to the expected type
    #[error("Malformed value '{value}' at {path}: {reason}")]
    MalformedScalar {
        path: String,
        value: String,
        reason: String,
    },

    /// The input is not well-formed XML
    #[error("Malformed XML at byte {position}: {message}")]
    MalformedXml {
        message: String,
        position: u64,
    },

    /// The document root is not a StationXML root element
    #[error("Unexpected document root: {found} (expected FDSNStationXML in namespace {expected})")]
    UnexpectedRoot {
        found: String,
        expected: String,
    },

    /// HTTP/Network related errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of conversion errors, following the mapping's
/// error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Required element absent
    MissingRequired,
    /// Present but not coercible
    MalformedScalar,
    /// Input could not be parsed or is not StationXML
    MalformedDocument,
    /// Fetching the document failed
    Transport,
    /// Everything else
    Other,
}

impl Error {
    /// Create a malformed scalar error
    pub fn malformed(path: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedScalar {
            path: path.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing required element error
    pub fn missing(path: impl Into<String>, tag: impl Into<String>) -> Self {
        Error::MissingRequired {
            path: path.into(),
            tag: tag.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingRequired { .. } => ErrorKind::MissingRequired,
            Error::MalformedScalar { .. } => ErrorKind::MalformedScalar,
            Error::MalformedXml { .. } | Error::UnexpectedRoot { .. } => ErrorKind::MalformedDocument,
            Error::Http { .. } => ErrorKind::Transport,
            _ => ErrorKind::Other,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingRequired => write!(f, "missing-required"),
            ErrorKind::MalformedScalar => write!(f, "malformed-scalar"),
            ErrorKind::MalformedDocument => write!(f, "malformed-document"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
