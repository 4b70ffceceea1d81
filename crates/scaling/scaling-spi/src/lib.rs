//! Scaling Service Provider Interface
//!
//! Defines the scale record model, the persistence store contract and the
//! scaler capability consumed by orchestrators.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ScaleStore, Scaler};
pub use error::{Result, ScalingError};
pub use model::{Objective, ScaleRecord, ScalingMode, Side};

pub use data_spi::Dataset;
