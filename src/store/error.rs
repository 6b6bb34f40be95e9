//! Store error types
//!
//! Every failure the persistence layer can report. Reads are lenient at the
//! [`TokenStore`](super::TokenStore) level, so most of these end up logged
//! rather than shown.

use thiserror::Error;

/// Errors that can occur in the store layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No configured backend could be opened
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend present but reading or decoding the value failed
    #[error("Failed to read {key}: {reason}")]
    ReadFailure { key: String, reason: String },

    /// Backend present but the value could not be written
    #[error("Failed to write {key}: {reason}")]
    WriteFailure { key: String, reason: String },
}

impl StoreError {
    pub fn read(key: &str, reason: impl ToString) -> Self {
        StoreError::ReadFailure {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: &str, reason: impl ToString) -> Self {
        StoreError::WriteFailure {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::read("solana-tokens", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Failed to read solana-tokens: expected value at line 1 column 1"
        );

        let err = StoreError::Unavailable("no backend configured".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: no backend configured");
    }

    #[test]
    fn test_write_failure_keeps_key() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = StoreError::write("solana-tokens", io_err);
        assert!(matches!(
            err,
            StoreError::WriteFailure { ref key, .. } if key == "solana-tokens"
        ));
    }
}
