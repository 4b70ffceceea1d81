//! Forecast Facade
//!
//! High-level API for autoregressive forecasting. Re-exports all public
//! types from the forecast stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core types at root
pub use forecast_core::{
    AutoregressiveForecaster, LastStepRunner, LinearRunner, MeanRunner, WindowBuffer,
};

// Re-export SPI traits
pub use forecast_spi::{Forecaster, ModelRunner};
