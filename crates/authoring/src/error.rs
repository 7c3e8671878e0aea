//! Error types for marker authoring

use clipmark_repository::RepositoryError;
use thiserror::Error;

/// Result type for authoring operations
pub type AuthoringResult<T> = Result<T, AuthoringError>;

/// Errors from the authoring flow
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// The draft violates a form constraint; storage was never contacted
    #[error("marker draft is invalid: {}", problems.join("; "))]
    Validation { problems: Vec<String> },

    /// The storage service rejected the persisted operation
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
