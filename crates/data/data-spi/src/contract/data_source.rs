//! Data source trait definition.

use std::path::Path;

use ndarray::{ArrayD, Ix2, Ix3};

use crate::error::{DataError, Result};
use crate::model::{Dataset, WindowedDataset};

/// Trait for sources that load numeric datasets from durable storage.
///
/// Failures are fatal for the run: there is no partial-data recovery.
pub trait DataSource: Send + Sync {
    /// Data source name.
    fn name(&self) -> &str;

    /// Load the array stored at `path` with whatever dimensionality it has.
    fn load(&self, path: &Path) -> Result<ArrayD<f64>>;

    /// Load a `samples x features` table.
    ///
    /// A one-dimensional array is read as a single feature column.
    fn load_table(&self, path: &Path) -> Result<Dataset> {
        let array = self.load(path)?;
        let ndim = array.ndim();
        let array = if ndim == 1 {
            let len = array.len();
            array
                .into_shape(vec![len, 1])
                .map_err(|e| DataError::load(path.display(), e))?
        } else {
            array
        };
        array
            .into_dimensionality::<Ix2>()
            .map_err(|_| DataError::Dimensionality {
                path: path.display().to_string(),
                expected: 2,
                actual: ndim,
            })
    }

    /// Load a `windows x lookback x features` array.
    fn load_windows(&self, path: &Path) -> Result<WindowedDataset> {
        let array = self.load(path)?;
        let ndim = array.ndim();
        array
            .into_dimensionality::<Ix3>()
            .map_err(|_| DataError::Dimensionality {
                path: path.display().to_string(),
                expected: 3,
                actual: ndim,
            })
    }
}
