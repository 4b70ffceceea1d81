//! NumPy `.npy` arrays.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use data_spi::{DataError, DataSource, Result};
use ndarray::ArrayD;
use ndarray_npy::ReadNpyExt;

/// Loads `f64` arrays of any dimensionality from `.npy` files.
#[derive(Debug, Default, Clone)]
pub struct NpySource;

impl NpySource {
    pub fn new() -> Self {
        Self
    }
}

impl DataSource for NpySource {
    fn name(&self) -> &str {
        "npy"
    }

    fn load(&self, path: &Path) -> Result<ArrayD<f64>> {
        let file = File::open(path).map_err(|e| DataError::load(path.display(), e))?;
        let array = ArrayD::<f64>::read_npy(BufReader::new(file))
            .map_err(|e| DataError::load(path.display(), e))?;
        tracing::debug!(path = %path.display(), shape = ?array.shape(), "loaded npy array");
        Ok(array)
    }
}
