//! Scaler capability consumed by orchestrators

use data_spi::Dataset;

use crate::error::Result;

/// Forward and inverse feature scaling over an input/output dataset pair.
///
/// Datasets the configured objective does not select are returned unchanged.
pub trait Scaler: Send + Sync {
    /// Fit (or load) factors, divide the selected datasets by them and
    /// persist newly computed factors.
    fn preprocess(&self, data_in: Dataset, data_out: Dataset) -> Result<(Dataset, Dataset)>;

    /// Multiply the selected datasets by the persisted factors.
    fn invert(&self, data_in: Dataset, data_out: Dataset) -> Result<(Dataset, Dataset)>;
}
