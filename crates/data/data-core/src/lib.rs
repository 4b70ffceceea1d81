//! Data Core
//!
//! File-backed implementations of the data contracts:
//! - [`CsvSource`] reads delimited text tables (comma, semicolon, tab or
//!   whitespace separated, optional header row)
//! - [`NpySource`] reads NumPy `.npy` arrays of `f64`
//! - [`AutoSource`] picks one of the two from the file extension
//! - [`write_predictions`] saves a prediction table in a [`SaveFormat`]

pub mod csv_source;
pub mod npy_source;
pub mod writer;

pub use csv_source::CsvSource;
pub use npy_source::NpySource;
pub use writer::write_predictions;

pub use data_spi::{DataError, DataSource, Dataset, Result, SaveFormat, WindowedDataset};

use std::path::Path;

use ndarray::ArrayD;

/// Data source that dispatches on the file extension.
///
/// `.npy` files go to [`NpySource`], everything else to [`CsvSource`].
#[derive(Debug, Default, Clone)]
pub struct AutoSource {
    csv: CsvSource,
    npy: NpySource,
}

impl AutoSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for AutoSource {
    fn name(&self) -> &str {
        "auto"
    }

    fn load(&self, path: &Path) -> Result<ArrayD<f64>> {
        let is_npy = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("npy"));
        if is_npy {
            self.npy.load(path)
        } else {
            self.csv.load(path)
        }
    }
}
