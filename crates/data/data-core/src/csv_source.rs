//! Delimited text tables.

use std::fs;
use std::path::Path;

use data_spi::{DataError, DataSource, Result};
use ndarray::{Array2, ArrayD};

/// Loads numeric tables from delimited text files.
///
/// Without an explicit delimiter the first non-empty line decides: comma,
/// semicolon or tab if present, otherwise runs of whitespace (the layout
/// written by NumPy's `savetxt`). A first row without any numeric field is
/// treated as a header and skipped.
#[derive(Debug, Default, Clone)]
pub struct CsvSource {
    delimiter: Option<u8>,
}

impl CsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed single-byte delimiter instead of detecting one.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    fn detect_delimiter(text: &str) -> Option<u8> {
        let first = text.lines().find(|l| !l.trim().is_empty())?;
        [b',', b';', b'\t']
            .into_iter()
            .find(|d| first.as_bytes().contains(d))
    }

    fn split_records(&self, text: &str, path: &Path) -> Result<Vec<Vec<String>>> {
        match self.delimiter.or_else(|| Self::detect_delimiter(text)) {
            Some(delimiter) => {
                let mut reader = csv::ReaderBuilder::new()
                    .has_headers(false)
                    .delimiter(delimiter)
                    .trim(csv::Trim::All)
                    .flexible(true)
                    .comment(Some(b'#'))
                    .from_reader(text.as_bytes());
                let mut rows = Vec::new();
                for record in reader.records() {
                    let record = record.map_err(|e| DataError::load(path.display(), e))?;
                    if record.iter().all(|f| f.is_empty()) {
                        continue;
                    }
                    rows.push(record.iter().map(str::to_string).collect());
                }
                Ok(rows)
            }
            None => Ok(text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(|l| l.split_whitespace().map(str::to_string).collect())
                .collect()),
        }
    }

    /// A header row has no numeric field at all.
    fn is_header(record: &[String]) -> bool {
        record.iter().all(|f| f.parse::<f64>().is_err())
    }

    /// Parse the text of a delimited table.
    pub fn parse(&self, text: &str, path: &Path) -> Result<Array2<f64>> {
        let records = self.split_records(text, path)?;

        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            let parsed: std::result::Result<Vec<f64>, _> =
                record.iter().map(|f| f.parse::<f64>()).collect();
            match parsed {
                Ok(values) => rows.push(values),
                Err(_) if line == 0 && Self::is_header(record) => continue,
                Err(e) => {
                    return Err(DataError::load(
                        path.display(),
                        format!("row {}: {e}", line + 1),
                    ))
                }
            }
        }

        let n_cols = match rows.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(DataError::load(path.display(), "no numeric rows")),
        };
        if let Some(pos) = rows.iter().position(|r| r.len() != n_cols) {
            return Err(DataError::load(
                path.display(),
                format!(
                    "ragged table: row {} has {} columns, expected {n_cols}",
                    pos + 1,
                    rows[pos].len()
                ),
            ));
        }

        let n_rows = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|e| DataError::load(path.display(), e))
    }
}

impl DataSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(&self, path: &Path) -> Result<ArrayD<f64>> {
        let text = fs::read_to_string(path).map_err(|e| DataError::load(path.display(), e))?;
        let table = self.parse(&text, path)?;
        tracing::debug!(path = %path.display(), rows = table.nrows(), cols = table.ncols(), "loaded table");
        Ok(table.into_dyn())
    }
}
