//! Forecast Core
//!
//! Window bookkeeping, the autoregressive rollout and a few reference
//! model runners.

pub mod forecaster;
pub mod runners;
pub mod window;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    Dataset, ForecastError, Forecaster, ModelRunner, Result, StepRegime, WindowedDataset,
};

// Re-export main types
pub use forecaster::AutoregressiveForecaster;
pub use runners::{LastStepRunner, LinearRunner, MeanRunner};
pub use window::WindowBuffer;
