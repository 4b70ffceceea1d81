//! Dataset type aliases.

use ndarray::{Array2, Array3};

/// Rectangular `samples x features` table.
pub type Dataset = Array2<f64>;

/// Pre-windowed sequence input: `windows x lookback x features`.
pub type WindowedDataset = Array3<f64>;
