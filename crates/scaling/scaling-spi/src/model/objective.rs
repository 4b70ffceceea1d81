//! Dataset selection for scaling operations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Side;
use crate::error::ScalingError;

/// Which dataset(s) a preprocess or invert call acts on.
///
/// The `Predict*` variants only select datasets for inversion; fitting with
/// them leaves both datasets untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Objective {
    Input,
    Output,
    All,
    PredictInput,
    PredictOutput,
    PredictAll,
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Input => "input",
            Objective::Output => "output",
            Objective::All => "all",
            Objective::PredictInput => "predict_input",
            Objective::PredictOutput => "predict_output",
            Objective::PredictAll => "predict_all",
        }
    }

    /// Sides whose factors are fitted and applied by preprocessing.
    pub fn fitted_sides(&self) -> &'static [Side] {
        match self {
            Objective::Input => &[Side::Input],
            Objective::Output => &[Side::Output],
            Objective::All => &Side::BOTH,
            Objective::PredictInput | Objective::PredictOutput | Objective::PredictAll => &[],
        }
    }

    /// Sides restored by inversion.
    pub fn restored_sides(&self) -> &'static [Side] {
        match self {
            Objective::Input | Objective::PredictInput => &[Side::Input],
            Objective::Output | Objective::PredictOutput => &[Side::Output],
            Objective::All | Objective::PredictAll => &Side::BOTH,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = ScalingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Objective::Input),
            "output" => Ok(Objective::Output),
            "all" => Ok(Objective::All),
            "predict_input" => Ok(Objective::PredictInput),
            "predict_output" => Ok(Objective::PredictOutput),
            "predict_all" => Ok(Objective::PredictAll),
            other => Err(ScalingError::Configuration(format!(
                "unknown objective '{other}', expected one of input, output, all, \
                 predict_input, predict_output, predict_all"
            ))),
        }
    }
}

impl TryFrom<String> for Objective {
    type Error = ScalingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Objective> for String {
    fn from(objective: Objective) -> Self {
        objective.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitted_sides() {
        assert_eq!(Objective::Input.fitted_sides(), &[Side::Input]);
        assert_eq!(Objective::Output.fitted_sides(), &[Side::Output]);
        assert_eq!(Objective::All.fitted_sides(), &[Side::Input, Side::Output]);
        assert!(Objective::PredictAll.fitted_sides().is_empty());
        assert!(Objective::PredictInput.fitted_sides().is_empty());
    }

    #[test]
    fn test_predict_objectives_restore_like_plain_ones() {
        assert_eq!(
            Objective::PredictInput.restored_sides(),
            Objective::Input.restored_sides()
        );
        assert_eq!(
            Objective::PredictOutput.restored_sides(),
            Objective::Output.restored_sides()
        );
        assert_eq!(
            Objective::PredictAll.restored_sides(),
            Objective::All.restored_sides()
        );
    }

    #[test]
    fn test_unknown_objective_names_value() {
        let err = "targets".parse::<Objective>().unwrap_err();
        assert!(err.to_string().contains("'targets'"));
    }

    #[test]
    fn test_serde_rejects_unknown_objective() {
        let parsed: Objective = serde_json::from_str("\"predict_output\"").unwrap();
        assert_eq!(parsed, Objective::PredictOutput);
        assert!(serde_json::from_str::<Objective>("\"everything\"").is_err());
    }
}
