//! Scaling error types

use thiserror::Error;

use crate::model::Side;

/// Errors that can occur while fitting, applying or inverting scale factors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    /// Unsupported mode, objective or store combination
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File mode requested but no record was persisted under the name
    #[error("No {side} scale record named '{name}' in the persistence store")]
    MissingScaleRecord { side: Side, name: String },

    /// Persisted record does not match the dataset's feature count
    #[error("{side} scale record '{name}' has {actual} factors, dataset has {expected} features")]
    ShapeMismatch {
        side: Side,
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Factors cannot be computed from an empty dataset
    #[error("Cannot fit scale factors on an empty {side} dataset")]
    EmptyDataset { side: Side },

    /// Persistence store could not be read
    #[error("Failed to read scale records from '{path}': {reason}")]
    PersistenceRead { path: String, reason: String },

    /// Persistence store could not be written
    #[error("Failed to write scale records to '{path}': {reason}")]
    PersistenceWrite { path: String, reason: String },
}

impl ScalingError {
    /// Whether the error aborts a run, as opposed to the best-effort save path.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScalingError::PersistenceWrite { .. })
    }
}
