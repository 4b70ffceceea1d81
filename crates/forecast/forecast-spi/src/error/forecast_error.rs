//! Forecast error types

use thiserror::Error;

/// Errors that can occur during an autoregressive rollout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Invalid rollout setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Seed windows do not have the configured lookback length
    #[error("Window shape mismatch: expected lookback {expected}, got {actual}")]
    WindowShape { expected: usize, actual: usize },

    /// Not enough seed history to assemble the windows the horizon needs
    #[error("Insufficient history: need at least {required} seed windows, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// A prediction cannot be stacked or fed back into the window
    #[error("Prediction at step {step} has {actual} values, expected {expected}")]
    PredictionShape {
        step: usize,
        expected: usize,
        actual: usize,
    },

    /// The model runner failed
    #[error("Model error: {0}")]
    Model(String),

    /// Model parameters could not be loaded
    #[error("Failed to load model from '{path}': {reason}")]
    ModelLoad { path: String, reason: String },
}
