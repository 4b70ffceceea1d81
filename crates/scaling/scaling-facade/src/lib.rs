//! Scaling Facade
//!
//! High-level API for reversible feature scaling. Re-exports all public
//! types from the scaling stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use scaling_api::*;

// Explicit re-exports for documentation
pub use scaling_api::prelude;

// Re-export core types at root
pub use scaling_core::{JsonScaleStore, MemoryScaleStore, ScalingEngine};

// Re-export SPI traits
pub use scaling_spi::{ScaleStore, Scaler};
