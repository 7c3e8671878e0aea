//! Error types for repository operations

use thiserror::Error;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors from the marker storage service.
///
/// A failed call propagates as a rejected operation; callers keep their
/// last-known-good data rather than clearing it.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("storage service rejected the request with status {code}")]
    Status { code: u16 },

    /// The response body was not the expected shape
    #[error("could not decode storage response: {0}")]
    Decode(String),
}
