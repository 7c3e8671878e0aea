//! Error types for playback sessions

use thiserror::Error;

/// Result type for playback operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced across the playback crate's public contract.
///
/// Mid-session failures never cross this boundary as errors; they become
/// state transitions and notices. Only the initial load reports one.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The player handle never became controllable; the session is fatal
    /// and is not retried automatically
    #[error("player handle never became controllable after {attempts} probes")]
    AdapterUnavailable { attempts: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_unavailable_display() {
        let err = SessionError::AdapterUnavailable { attempts: 5 };
        assert!(err.to_string().contains("5"));
    }
}
