//! Unified error hierarchy for readyrs
//!
//! Provides a structured error type system with context preservation and
//! integration with the tracing system.

use thiserror::Error;

/// Top-level error type for all readyrs operations
#[derive(Debug, Error)]
pub enum ReadyRsError {
    /// Request validation errors (bad load, unknown exercise type, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Historical-store access errors
    #[error("Data access error: {0}")]
    DataAccess(#[from] DataAccessError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the historical-store collaborator
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// Store unreachable or refused the request
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Stored records could not be decoded into the expected shape
    #[error("Malformed history data: {reason}")]
    Malformed { reason: String },
}

/// Result type alias for readyrs operations
pub type Result<T> = std::result::Result<T, ReadyRsError>;

impl ReadyRsError {
    /// Check if the operation behind this error is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReadyRsError::DataAccess(DataAccessError::Unavailable { .. }) | ReadyRsError::Io(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReadyRsError::Validation(_) => ErrorSeverity::Warning,
            ReadyRsError::DataAccess(_) => ErrorSeverity::Error,
            ReadyRsError::Configuration(_) => ErrorSeverity::Error,
            ReadyRsError::Io(_) => ErrorSeverity::Error,
            ReadyRsError::Json(_) => ErrorSeverity::Warning,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ReadyRsError::Validation(msg) => msg.clone(),
            ReadyRsError::DataAccess(DataAccessError::Unavailable { .. }) => {
                "Training history is temporarily unavailable. Please try again.".to_string()
            }
            ReadyRsError::DataAccess(DataAccessError::Malformed { reason }) => {
                format!("Training history could not be read: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = ReadyRsError::Validation("current_load must be positive".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = ReadyRsError::DataAccess(DataAccessError::Unavailable {
            reason: "timeout".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_retryable() {
        let err = ReadyRsError::DataAccess(DataAccessError::Unavailable {
            reason: "timeout".to_string(),
        });
        assert!(err.is_retryable());

        let err = ReadyRsError::Validation("test".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_user_messages() {
        let err = ReadyRsError::DataAccess(DataAccessError::Unavailable {
            reason: "connection refused".to_string(),
        });
        assert!(err.user_message().contains("temporarily unavailable"));

        let err = ReadyRsError::Validation("current_load must be positive".to_string());
        assert_eq!(err.user_message(), "current_load must be positive");
    }
}
