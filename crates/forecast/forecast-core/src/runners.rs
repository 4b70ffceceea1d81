//! Built-in model runners
//!
//! Small deterministic runners used for baselines, smoke tests and pipelines
//! where the trained network has been exported as a single linear layer.

use std::fs;
use std::path::Path;

use forecast_spi::{ForecastError, ModelRunner, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Deserialize;

/// Predicts the per-feature mean of the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanRunner;

impl ModelRunner for MeanRunner {
    fn name(&self) -> &str {
        "mean"
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        window
            .mean_axis(Axis(0))
            .ok_or_else(|| ForecastError::Model("cannot average an empty window".to_string()))
    }
}

/// Repeats the newest row of the window (persistence forecast).
#[derive(Debug, Clone, Copy, Default)]
pub struct LastStepRunner;

impl ModelRunner for LastStepRunner {
    fn name(&self) -> &str {
        "last_step"
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let rows = window.nrows();
        if rows == 0 {
            return Err(ForecastError::Model("window has no timesteps".to_string()));
        }
        Ok(window.row(rows - 1).to_owned())
    }
}

#[derive(Debug, Deserialize)]
struct LinearWeights {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// Single linear layer over the flattened window.
///
/// `weights` is `outputs x (lookback * features)`, applied to the window
/// flattened oldest timestep first.
#[derive(Debug, Clone)]
pub struct LinearRunner {
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl LinearRunner {
    pub fn new(weights: Array2<f64>, bias: Array1<f64>) -> Result<Self> {
        if weights.nrows() != bias.len() {
            return Err(ForecastError::Configuration(format!(
                "linear model has {} weight rows but {} bias terms",
                weights.nrows(),
                bias.len()
            )));
        }
        Ok(Self { weights, bias })
    }

    /// Load `{"weights": [[...]], "bias": [...]}` from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model_load = |reason: String| ForecastError::ModelLoad {
            path: path.display().to_string(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| model_load(e.to_string()))?;
        let raw: LinearWeights = serde_json::from_str(&text).map_err(|e| model_load(e.to_string()))?;

        let outputs = raw.weights.len();
        let inputs = raw.weights.first().map_or(0, Vec::len);
        if raw.weights.iter().any(|row| row.len() != inputs) {
            return Err(model_load("weight rows have different lengths".to_string()));
        }
        let flat: Vec<f64> = raw.weights.into_iter().flatten().collect();
        let weights =
            Array2::from_shape_vec((outputs, inputs), flat).map_err(|e| model_load(e.to_string()))?;

        let runner = Self::new(weights, Array1::from(raw.bias)).map_err(|e| model_load(e.to_string()))?;
        tracing::debug!(path = %path.display(), outputs, inputs, "loaded linear model");
        Ok(runner)
    }

    pub fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    pub fn outputs(&self) -> usize {
        self.weights.nrows()
    }
}

impl ModelRunner for LinearRunner {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if window.len() != self.inputs() {
            return Err(ForecastError::Model(format!(
                "linear model expects {} inputs, window has {}",
                self.inputs(),
                window.len()
            )));
        }
        let flat: Array1<f64> = window.iter().copied().collect();
        Ok(self.weights.dot(&flat) + &self.bias)
    }
}
