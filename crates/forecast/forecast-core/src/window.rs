//! Rolling lookback windows for the forecaster.

use forecast_spi::{ForecastError, Result, WindowedDataset};
use ndarray::{stack, Array2, ArrayView1, ArrayView2, Axis};

/// History of lookback windows: the seed windows followed by windows
/// synthesized from predictions. The window of step `i` is entry `i`.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    windows: Vec<Array2<f64>>,
    seed_len: usize,
    lookback: usize,
    features: usize,
}

impl WindowBuffer {
    /// Seed the buffer with pre-windowed data (`windows x lookback x features`).
    pub fn from_windows(seed: WindowedDataset) -> Result<Self> {
        let (count, lookback, features) = seed.dim();
        if lookback == 0 {
            return Err(ForecastError::Configuration(
                "seed windows must hold at least one timestep".to_string(),
            ));
        }
        let windows = seed.outer_iter().map(|w| w.to_owned()).collect();
        Ok(Self {
            windows,
            seed_len: count,
            lookback,
            features,
        })
    }

    /// Seed the buffer with sliding windows over a `timesteps x features`
    /// series: window `k` holds rows `k..k + lookback`.
    pub fn from_series(series: ArrayView2<'_, f64>, lookback: usize) -> Result<Self> {
        if lookback == 0 {
            return Err(ForecastError::Configuration(
                "lookback must be at least 1".to_string(),
            ));
        }
        let (timesteps, features) = series.dim();
        if timesteps < lookback {
            return Err(ForecastError::InsufficientHistory {
                required: lookback,
                actual: timesteps,
            });
        }
        let windows: Vec<Array2<f64>> = series
            .windows((lookback, features))
            .into_iter()
            .map(|w| w.to_owned())
            .collect();
        Ok(Self {
            seed_len: windows.len(),
            windows,
            lookback,
            features,
        })
    }

    /// Window used at `step`, if it exists yet.
    pub fn window(&self, step: usize) -> Option<ArrayView2<'_, f64>> {
        self.windows.get(step).map(|w| w.view())
    }

    /// Number of windows that came from seed data.
    pub fn seed_len(&self) -> usize {
        self.seed_len
    }

    /// Total number of windows, seed and synthesized.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn features(&self) -> usize {
        self.features
    }

    /// Append the window following `step`: the newest row of each of the
    /// windows `step - (lookback - 2) ..= step`, oldest first, then
    /// `prediction`.
    pub fn extend_with(&mut self, step: usize, prediction: ArrayView1<'_, f64>) -> Result<()> {
        if prediction.len() != self.features {
            return Err(ForecastError::PredictionShape {
                step,
                expected: self.features,
                actual: prediction.len(),
            });
        }
        let carried = self.lookback - 1;
        if step + 1 < carried || step >= self.windows.len() {
            return Err(ForecastError::InsufficientHistory {
                required: carried.max(step + 1),
                actual: self.windows.len(),
            });
        }
        debug_assert_eq!(self.windows.len(), step + 1, "windows are appended one per step");

        let next = {
            let newest = self.lookback - 1;
            let mut rows: Vec<ArrayView1<'_, f64>> = (0..carried)
                .rev()
                .map(|back| self.windows[step - back].row(newest))
                .collect();
            rows.push(prediction.view());
            stack(Axis(0), &rows).map_err(|e| ForecastError::Configuration(e.to_string()))?
        };
        self.windows.push(next);
        Ok(())
    }
}
