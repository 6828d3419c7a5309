//! Error types for the rolodex database
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy splits caller mistakes (bad cursor, unsupported query filter,
//! invalid record fields) from backend failures so that the API layer can map
//! them to different responses. `Error::is_usage` is the classifier.

use thiserror::Error;

/// Result type alias for rolodex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the rolodex database
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied an unsupported parameter or malformed input
    #[error("usage error: {0}")]
    Usage(String),

    /// Cursor token could not be decoded
    #[error("invalid cursor: {0:?}")]
    InvalidCursor(String),

    /// Store rejected a scan continuation token
    #[error("invalid continuation token: {0:?}")]
    InvalidContinuation(String),

    /// Search layer rejected a stored query string
    ///
    /// Smart-group queries are validated when the caller supplies them, so
    /// hitting this during a page or stream means bad stored data, which is
    /// not the paging caller's fault.
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    /// Record not found
    #[error("{entity} not found: {key:?}")]
    NotFound {
        /// Kind of record ("contact" or "group")
        entity: &'static str,
        /// Key that was looked up
        key: String,
    },

    /// Storage layer error
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Build a `Usage` error from anything displayable
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    /// Whether this error is the caller's fault (versus a backend failure)
    ///
    /// Usage errors are reported to the caller and never retried; everything
    /// else signals a problem behind the API boundary.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::Usage(_) | Error::InvalidCursor(_) | Error::InvalidContinuation(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
