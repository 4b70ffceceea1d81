//! Forecast configuration types.

use std::path::{Path, PathBuf};

use data_spi::SaveFormat;
use forecast_core::{AutoregressiveForecaster, LastStepRunner, LinearRunner, MeanRunner};
use forecast_spi::{ForecastError, ModelRunner, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_TIMESTEPS: usize = 100;
const DEFAULT_LOOKBACK: usize = 2;

fn default_timesteps() -> usize {
    DEFAULT_TIMESTEPS
}

fn default_lookback() -> usize {
    DEFAULT_LOOKBACK
}

/// Reference runner selection.
///
/// Unit variants are written as plain strings (`"mean"`, `"last_step"`),
/// the linear model as `{ "linear": { "weights": "model.json" } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelConfig {
    #[default]
    Mean,
    LastStep,
    Linear {
        /// JSON file with `weights` and `bias`
        weights: PathBuf,
    },
}

impl ModelConfig {
    /// Instantiate the runner, loading weights where needed.
    pub fn build_runner(&self) -> Result<Box<dyn ModelRunner>> {
        let runner: Box<dyn ModelRunner> = match self {
            ModelConfig::Mean => Box::new(MeanRunner),
            ModelConfig::LastStep => Box::new(LastStepRunner),
            ModelConfig::Linear { weights } => Box::new(LinearRunner::load(weights)?),
        };
        Ok(runner)
    }
}

/// Settings of one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// Forecast horizon
    #[serde(default = "default_timesteps")]
    pub timesteps: usize,
    /// Window size fed to the model
    #[serde(default = "default_lookback")]
    pub lookback: usize,
    /// Step diagnostics level, 0 disables them
    #[serde(default)]
    pub echo: u32,
    /// Encoding of the prediction file
    #[serde(default)]
    pub save_format: SaveFormat,
    /// Base name of the prediction file, extension is appended
    pub predictions_file: PathBuf,
    /// Seed input dataset
    pub input_file: PathBuf,
    /// Ground truth for diagnostics
    #[serde(default)]
    pub target_file: Option<PathBuf>,
    /// Model runner
    #[serde(default)]
    pub model: ModelConfig,
}

impl ForecastConfig {
    /// Create a configuration with default horizon, lookback and format.
    pub fn new(input_file: impl Into<PathBuf>, predictions_file: impl Into<PathBuf>) -> Self {
        Self {
            timesteps: DEFAULT_TIMESTEPS,
            lookback: DEFAULT_LOOKBACK,
            echo: 0,
            save_format: SaveFormat::default(),
            predictions_file: predictions_file.into(),
            input_file: input_file.into(),
            target_file: None,
            model: ModelConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookback == 0 {
            return Err(ForecastError::Configuration(
                "lookback must be at least 1".to_string(),
            ));
        }
        if self.predictions_file.as_os_str().is_empty() {
            return Err(ForecastError::Configuration(
                "predictions_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Path the predictions will be written to.
    pub fn output_path(&self) -> PathBuf {
        self.save_format.file_name(&self.predictions_file)
    }

    pub fn target_path(&self) -> Option<&Path> {
        self.target_file.as_deref()
    }

    /// Validate, load the model and assemble the forecaster.
    pub fn build_forecaster(&self) -> Result<AutoregressiveForecaster<Box<dyn ModelRunner>>> {
        self.validate()?;
        let runner = self.model.build_runner()?;
        Ok(AutoregressiveForecaster::new(runner, self.timesteps, self.lookback).with_echo(self.echo))
    }
}

/// Builder for ForecastConfig.
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    timesteps: Option<usize>,
    lookback: Option<usize>,
    echo: u32,
    save_format: SaveFormat,
    predictions_file: Option<PathBuf>,
    input_file: Option<PathBuf>,
    target_file: Option<PathBuf>,
    model: ModelConfig,
}

impl ForecastConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timesteps(mut self, timesteps: usize) -> Self {
        self.timesteps = Some(timesteps);
        self
    }

    pub fn lookback(mut self, lookback: usize) -> Self {
        self.lookback = Some(lookback);
        self
    }

    pub fn echo(mut self, echo: u32) -> Self {
        self.echo = echo;
        self
    }

    pub fn save_format(mut self, format: SaveFormat) -> Self {
        self.save_format = format;
        self
    }

    pub fn predictions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.predictions_file = Some(path.into());
        self
    }

    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    pub fn target_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_file = Some(path.into());
        self
    }

    pub fn model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> std::result::Result<ForecastConfig, &'static str> {
        Ok(ForecastConfig {
            timesteps: self.timesteps.unwrap_or(DEFAULT_TIMESTEPS),
            lookback: self.lookback.unwrap_or(DEFAULT_LOOKBACK),
            echo: self.echo,
            save_format: self.save_format,
            predictions_file: self.predictions_file.ok_or("predictions_file is required")?,
            input_file: self.input_file.ok_or("input_file is required")?,
            target_file: self.target_file,
            model: self.model,
        })
    }
}
