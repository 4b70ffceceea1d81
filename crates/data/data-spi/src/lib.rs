//! Data Service Provider Interface
//!
//! Defines the dataset shapes, the data source contract and the prediction
//! file formats shared by the scaling and forecasting crates.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::DataSource;
pub use error::{DataError, Result};
pub use model::{Dataset, SaveFormat, WindowedDataset};
