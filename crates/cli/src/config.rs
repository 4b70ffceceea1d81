//! Run configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use forecast_facade::ForecastConfig;
use scaling_facade::ScalingConfig;
use serde::{Deserialize, Serialize};

/// Top-level JSON document read by every subcommand.
///
/// ```json
/// {
///   "scaling":  { "scale": "std", "objective": "input", "input_log": "logs/input_log.json" },
///   "forecast": { "input_file": "seed.npy", "predictions_file": "out/predictions", "timesteps": 50 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub scaling: Option<ScalingConfig>,
    #[serde(default)]
    pub forecast: Option<ForecastConfig>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        if let Some(scaling) = &config.scaling {
            scaling.validate()?;
        }
        if let Some(forecast) = &config.forecast {
            forecast.validate()?;
        }
        Ok(config)
    }

    pub fn scaling(&self) -> Result<&ScalingConfig> {
        self.scaling
            .as_ref()
            .context("config has no \"scaling\" section")
    }

    pub fn forecast(&self) -> Result<&ForecastConfig> {
        self.forecast
            .as_ref()
            .context("config has no \"forecast\" section")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaling_facade::{Objective, ScalingMode};

    #[test]
    fn test_parse_full_document() {
        let config = RunConfig::parse(
            r#"{
                "scaling": { "scale": "minmax", "objective": "all", "log_denominator": "run7" },
                "forecast": { "input_file": "seed.csv", "predictions_file": "pred", "timesteps": 5 }
            }"#,
        )
        .unwrap();
        let scaling = config.scaling().unwrap();
        assert_eq!(scaling.scale, ScalingMode::MinMax);
        assert_eq!(scaling.objective, Objective::All);
        assert_eq!(config.forecast().unwrap().timesteps, 5);
    }

    #[test]
    fn test_missing_section_reported() {
        let config = RunConfig::parse(r#"{ "scaling": { "objective": "input" } }"#).unwrap();
        let err = config.forecast().unwrap_err();
        assert!(err.to_string().contains("forecast"));
    }

    #[test]
    fn test_bad_mode_named_in_error() {
        let err = RunConfig::parse(r#"{ "scaling": { "scale": "zscore", "objective": "input" } }"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("'zscore'"));
    }

    #[test]
    fn test_invalid_combination_rejected_at_load() {
        let err = RunConfig::parse(r#"{ "scaling": { "scale": "file", "objective": "input" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("input_log"));
    }
}
