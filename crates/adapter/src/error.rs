//! Error types for adapter operations

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors that can occur while adapting a player handle
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The handle never became controllable within the probe budget
    #[error("player handle never became controllable after {attempts} probes")]
    Unavailable { attempts: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = AdapterError::Unavailable { attempts: 5 };
        assert!(err.to_string().contains("5 probes"));
    }
}
