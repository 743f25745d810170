//! History error types.
//!
//! The history operations themselves never fail; these errors come from the
//! configuration layer that sizes a history.

use thiserror::Error;

/// Result type for history setup operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while configuring a history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid JSON/JSONC syntax.
    #[error("invalid config at {path}: {message}")]
    InvalidJson { path: String, message: String },

    /// Config validation failed.
    #[error("config validation failed: {message}")]
    Validation { message: String },

    /// Could not determine a config location.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl ConfigError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidJson {
            path: "rewind.json".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config at rewind.json: expected value"
        );
    }

    #[test]
    fn test_history_error_from_config() {
        let err: HistoryError = ConfigError::validation("max_entries must be at least 1").into();
        assert!(matches!(err, HistoryError::Config(ConfigError::Validation { .. })));
        assert_eq!(
            err.to_string(),
            "config error: config validation failed: max_entries must be at least 1"
        );
    }

    #[test]
    fn test_history_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: HistoryError = io_err.into();
        assert!(matches!(err, HistoryError::Io(_)));
    }
}
