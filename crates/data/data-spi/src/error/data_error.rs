//! Data error types.

use thiserror::Error;

/// Dataset loading and prediction output errors.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// Missing or malformed dataset file
    #[error("Failed to load dataset '{path}': {reason}")]
    Load { path: String, reason: String },

    /// Dataset has the wrong number of dimensions
    #[error("Dataset '{path}' has {actual} dimensions, expected {expected}")]
    Dimensionality {
        path: String,
        expected: usize,
        actual: usize,
    },

    /// Failed to write a prediction file
    #[error("Failed to write '{path}': {reason}")]
    Write { path: String, reason: String },

    /// Unsupported format value
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DataError {
    /// Build a load error for `path`.
    pub fn load(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        DataError::Load {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build a write error for `path`.
    pub fn write(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        DataError::Write {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
