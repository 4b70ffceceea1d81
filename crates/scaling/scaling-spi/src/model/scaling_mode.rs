//! Scale factor computation modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScalingError;

/// How the per-feature factors of a scale record are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScalingMode {
    /// Population standard deviation of each feature
    #[default]
    Std,
    /// `max - min` of each feature
    MinMax,
    /// `1.25 * (max - min)` of each feature
    SoftMinMax,
    /// Factors are loaded from the persistence store, never computed
    File,
}

impl ScalingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingMode::Std => "std",
            ScalingMode::MinMax => "minmax",
            ScalingMode::SoftMinMax => "soft_minmax",
            ScalingMode::File => "file",
        }
    }

    /// Whether factors come from the store rather than from the data.
    pub fn is_file(&self) -> bool {
        matches!(self, ScalingMode::File)
    }
}

impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalingMode {
    type Err = ScalingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "std" => Ok(ScalingMode::Std),
            "minmax" => Ok(ScalingMode::MinMax),
            "soft_minmax" => Ok(ScalingMode::SoftMinMax),
            "file" => Ok(ScalingMode::File),
            other => Err(ScalingError::Configuration(format!(
                "unknown scale mode '{other}', expected one of std, minmax, soft_minmax, file"
            ))),
        }
    }
}

impl TryFrom<String> for ScalingMode {
    type Error = ScalingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScalingMode> for String {
    fn from(mode: ScalingMode) -> Self {
        mode.as_str().to_string()
    }
}
