//! Forecast Service Provider Interface
//!
//! Defines the model runner consumed by the rollout, the forecaster
//! capability exposed to orchestrators, and the step regime boundary.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Forecaster, ModelRunner};
pub use error::{ForecastError, Result};
pub use model::StepRegime;

pub use data_spi::{Dataset, WindowedDataset};
