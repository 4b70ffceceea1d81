//! Forecast Consumer API
//!
//! Consumer configurations and builder APIs for the autoregressive
//! forecaster.
//!
//! This crate provides:
//! - [`ForecastConfig`] and [`ModelConfig`], the serializable run settings
//! - [`ForecastConfigBuilder`] for programmatic construction
//! - Re-exports from SPI and core for convenience

mod config;

pub use config::{ForecastConfig, ForecastConfigBuilder, ModelConfig};

// Re-export from core
pub use forecast_core::{
    forecaster, runners, window, AutoregressiveForecaster, LastStepRunner, LinearRunner,
    MeanRunner, WindowBuffer,
};

// Re-export traits from SPI
pub use forecast_spi::{
    Dataset, ForecastError, Forecaster, ModelRunner, Result, StepRegime, WindowedDataset,
};

pub use data_spi::SaveFormat;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, ForecastConfigBuilder, ModelConfig};
    pub use data_spi::SaveFormat;
    pub use forecast_core::{
        AutoregressiveForecaster, LastStepRunner, LinearRunner, MeanRunner, WindowBuffer,
    };
    pub use forecast_spi::{ForecastError, Forecaster, ModelRunner, Result, StepRegime};
}
