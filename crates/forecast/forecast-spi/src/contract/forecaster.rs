//! Forecaster capability consumed by orchestrators

use ndarray::ArrayView2;

use crate::error::Result;
use data_spi::{Dataset, WindowedDataset};

/// Multi-step forecaster seeded with pre-windowed input.
pub trait Forecaster {
    /// Roll the model forward from `seed`, returning one prediction row per
    /// step. `target` holds ground-truth rows used only for diagnostics.
    fn forecast(&self, seed: WindowedDataset, target: Option<ArrayView2<'_, f64>>) -> Result<Dataset>;
}
