//! Error types for listfeed
//!
//! Every failure in a fetch attempt funnels into [`Error`] and is classified
//! by [`Error::failure_kind`] at the fetch-loop boundary. Nothing here is
//! fatal to the loop itself: all variants are converted into a retry cycle.

use thiserror::Error;

/// Result type alias for listfeed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for listfeed
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint")
        key: Option<String>,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON payload or failed record decode
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Failure classes distinguished by the fetch loop
///
/// Only the class matters to a consumer: network failures get a specific
/// user-facing status message, everything else gets the generic one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Connectivity or I/O failure reaching or reading from the remote host
    Network,
    /// Malformed JSON or a record that failed validation
    Parse,
    /// Anything else
    Unknown,
}

impl Error {
    /// Classify this error for status-message selection
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Network(_) | Error::Io(_) => FailureKind::Network,
            Error::Parse(_) => FailureKind::Parse,
            Error::Config { .. } | Error::Other(_) => FailureKind::Unknown,
        }
    }
}
