//! Dataset shapes and output formats.

mod dataset;
mod save_format;

pub use dataset::{Dataset, WindowedDataset};
pub use save_format::SaveFormat;
