//! Scaling configuration types.

use std::path::PathBuf;
use std::sync::Arc;

use scaling_core::engine::DEFAULT_DENOMINATOR;
use scaling_core::{JsonScaleStore, ScalingEngine};
use scaling_spi::{Objective, ScalingError, ScalingMode, Side};
use serde::{Deserialize, Serialize};

fn default_denominator() -> String {
    DEFAULT_DENOMINATOR.to_string()
}

/// Settings of one scaling step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalingConfig {
    /// Factor computation mode
    #[serde(default)]
    pub scale: ScalingMode,
    /// Dataset(s) the step acts on
    pub objective: Objective,
    /// Name the scale record is stored under
    #[serde(default = "default_denominator")]
    pub log_denominator: String,
    /// JSON file holding input-side records
    #[serde(default)]
    pub input_log: Option<PathBuf>,
    /// JSON file holding output-side records
    #[serde(default)]
    pub output_log: Option<PathBuf>,
    /// Replay persisted records; forces `file` mode
    #[serde(default)]
    pub load_from_log: bool,
}

impl ScalingConfig {
    /// Create a configuration with default denominator and no stores.
    pub fn new(scale: ScalingMode, objective: Objective) -> Self {
        Self {
            scale,
            objective,
            log_denominator: default_denominator(),
            input_log: None,
            output_log: None,
            load_from_log: false,
        }
    }

    /// The mode actually used once `load_from_log` is taken into account.
    pub fn effective_mode(&self) -> ScalingMode {
        if self.load_from_log {
            ScalingMode::File
        } else {
            self.scale
        }
    }

    /// Check option combinations before any data is touched.
    pub fn validate(&self) -> Result<(), ScalingError> {
        if self.log_denominator.trim().is_empty() {
            return Err(ScalingError::Configuration(
                "log_denominator must not be empty".to_string(),
            ));
        }
        if self.effective_mode().is_file() {
            for &side in self.objective.fitted_sides() {
                if self.log_path(side).is_none() {
                    return Err(ScalingError::Configuration(format!(
                        "scale mode 'file' with objective '{}' needs {side}_log to be set",
                        self.objective
                    )));
                }
            }
        }
        Ok(())
    }

    /// Store path configured for `side`.
    pub fn log_path(&self, side: Side) -> Option<&PathBuf> {
        match side {
            Side::Input => self.input_log.as_ref(),
            Side::Output => self.output_log.as_ref(),
        }
    }

    /// Validate and build an engine backed by JSON stores.
    pub fn build_engine(&self) -> Result<ScalingEngine, ScalingError> {
        self.validate()?;
        let mut engine = ScalingEngine::new(self.effective_mode(), self.objective)
            .with_denominator(self.log_denominator.clone());
        for side in Side::BOTH {
            if let Some(path) = self.log_path(side) {
                engine = engine.with_store(side, Arc::new(JsonScaleStore::new(path.clone())));
            }
        }
        Ok(engine)
    }
}

/// Builder for ScalingConfig.
#[derive(Debug, Default)]
pub struct ScalingConfigBuilder {
    scale: Option<ScalingMode>,
    objective: Option<Objective>,
    log_denominator: Option<String>,
    input_log: Option<PathBuf>,
    output_log: Option<PathBuf>,
    load_from_log: bool,
}

impl ScalingConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale mode.
    pub fn scale(mut self, scale: ScalingMode) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the objective.
    pub fn objective(mut self, objective: Objective) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Set the denominator name.
    pub fn log_denominator(mut self, name: &str) -> Self {
        self.log_denominator = Some(name.to_string());
        self
    }

    /// Set the input-side store file.
    pub fn input_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_log = Some(path.into());
        self
    }

    /// Set the output-side store file.
    pub fn output_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_log = Some(path.into());
        self
    }

    /// Replay persisted records instead of fitting.
    pub fn load_from_log(mut self, load: bool) -> Self {
        self.load_from_log = load;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ScalingConfig, &'static str> {
        Ok(ScalingConfig {
            scale: self.scale.unwrap_or_default(),
            objective: self.objective.ok_or("objective is required")?,
            log_denominator: self.log_denominator.unwrap_or_else(default_denominator),
            input_log: self.input_log,
            output_log: self.output_log,
            load_from_log: self.load_from_log,
        })
    }
}
