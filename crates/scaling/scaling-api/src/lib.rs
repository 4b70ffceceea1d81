//! Scaling Consumer API
//!
//! Consumer configurations and builder APIs for the scaling engine.
//!
//! This crate provides:
//! - [`ScalingConfig`], the serializable scaling settings
//! - [`ScalingConfigBuilder`] for programmatic construction
//! - Re-exports from SPI and core for convenience

mod config;

pub use config::{ScalingConfig, ScalingConfigBuilder};

// Re-export from core
pub use scaling_core::{
    compute_factors, engine, factors, store, JsonScaleStore, MemoryScaleStore, ScalingEngine,
};

// Re-export traits from SPI
pub use scaling_spi::{
    Dataset, Objective, Result, ScaleRecord, ScaleStore, Scaler, ScalingError, ScalingMode, Side,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ScalingConfig, ScalingConfigBuilder};
    pub use scaling_core::{JsonScaleStore, MemoryScaleStore, ScalingEngine};
    pub use scaling_spi::{
        Objective, Result, ScaleRecord, ScaleStore, Scaler, ScalingError, ScalingMode, Side,
    };
}
