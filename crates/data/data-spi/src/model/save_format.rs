//! Prediction file formats.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Encoding of a saved prediction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SaveFormat {
    /// Delimited text table
    #[default]
    Ascii,
    /// Raw binary NumPy array
    Npy,
}

impl SaveFormat {
    /// Canonical configuration value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveFormat::Ascii => "ascii",
            SaveFormat::Npy => "npy",
        }
    }

    /// File extension appended to the configured base name.
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Ascii => "csv",
            SaveFormat::Npy => "npy",
        }
    }

    /// `base` with this format's extension appended (never replaced).
    pub fn file_name(&self, base: &Path) -> PathBuf {
        let mut name = base.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveFormat {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(SaveFormat::Ascii),
            "npy" => Ok(SaveFormat::Npy),
            other => Err(DataError::ConfigError(format!(
                "unsupported save_format '{other}', supported formats are ascii and npy"
            ))),
        }
    }
}

impl TryFrom<String> for SaveFormat {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SaveFormat> for String {
    fn from(format: SaveFormat) -> Self {
        format.as_str().to_string()
    }
}
