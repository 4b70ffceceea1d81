//! Prediction table output.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use data_spi::{DataError, Result, SaveFormat};
use ndarray::ArrayView2;
use ndarray_npy::WriteNpyExt;

/// Write `predictions` (one row per timestep) to `base` plus the format's
/// extension and return the path written.
///
/// [`SaveFormat::Ascii`] writes comma-delimited rows without a header using
/// the shortest representation that round-trips each value.
pub fn write_predictions(
    format: SaveFormat,
    predictions: ArrayView2<'_, f64>,
    base: &Path,
) -> Result<PathBuf> {
    let path = format.file_name(base);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DataError::write(path.display(), e))?;
    }

    match format {
        SaveFormat::Ascii => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&path)
                .map_err(|e| DataError::write(path.display(), e))?;
            for row in predictions.rows() {
                writer
                    .write_record(row.iter().map(|v| v.to_string()))
                    .map_err(|e| DataError::write(path.display(), e))?;
            }
            writer
                .flush()
                .map_err(|e| DataError::write(path.display(), e))?;
        }
        SaveFormat::Npy => {
            let file = File::create(&path).map_err(|e| DataError::write(path.display(), e))?;
            predictions
                .write_npy(BufWriter::new(file))
                .map_err(|e| DataError::write(path.display(), e))?;
        }
    }

    tracing::info!(
        path = %path.display(),
        format = %format,
        rows = predictions.nrows(),
        "table written"
    );
    Ok(path)
}
