//! Scaling Core
//!
//! Core implementations for reversible per-feature scaling: factor
//! reductions, JSON and in-memory scale record stores, and the
//! [`ScalingEngine`] that ties them to a mode and an objective.

pub mod engine;
pub mod factors;
pub mod store;

// Re-export SPI traits for implementations
pub use scaling_spi::{
    Dataset, Objective, Result, ScaleRecord, ScaleStore, Scaler, ScalingError, ScalingMode, Side,
};

// Re-export main types
pub use engine::ScalingEngine;
pub use factors::compute_factors;
pub use store::{JsonScaleStore, MemoryScaleStore};
