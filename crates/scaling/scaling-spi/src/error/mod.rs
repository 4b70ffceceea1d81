//! Error module containing error types and result aliases

mod scaling_error;

pub use scaling_error::ScalingError;

/// Result type for scaling operations
pub type Result<T> = std::result::Result<T, ScalingError>;
