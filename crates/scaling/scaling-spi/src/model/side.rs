//! Dataset side

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which dataset of a pipeline a scale record belongs to.
///
/// Each side has its own record namespace, so the same denominator can hold
/// different factors for the input and the output dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Input,
    Output,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Input, Side::Output];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Input => "input",
            Side::Output => "output",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
