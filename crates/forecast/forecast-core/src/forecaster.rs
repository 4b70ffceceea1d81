//! Autoregressive multi-step forecaster.
//!
//! While seed windows remain the model is teacher-forced: each step reads the
//! next seed window. From the last seed window on (`step > seed_len - 2`)
//! every prediction is slid into a synthesized window and the model runs on
//! its own output.

use forecast_spi::{
    Dataset, ForecastError, Forecaster, ModelRunner, Result, StepRegime, WindowedDataset,
};
use ndarray::{stack, Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::window::WindowBuffer;

/// Rolls a [`ModelRunner`] forward for a fixed horizon.
#[derive(Debug, Clone)]
pub struct AutoregressiveForecaster<R> {
    runner: R,
    horizon: usize,
    lookback: usize,
    echo: u32,
}

impl<R: ModelRunner> AutoregressiveForecaster<R> {
    pub fn new(runner: R, horizon: usize, lookback: usize) -> Self {
        Self {
            runner,
            horizon,
            lookback,
            echo: 0,
        }
    }

    /// Emit per-step diagnostics when `echo > 0`.
    pub fn with_echo(mut self, echo: u32) -> Self {
        self.echo = echo;
        self
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Check that `buffer` can serve every step of the horizon.
    pub fn validate(&self, buffer: &WindowBuffer) -> Result<()> {
        if self.lookback == 0 {
            return Err(ForecastError::Configuration(
                "lookback must be at least 1".to_string(),
            ));
        }
        if buffer.lookback() != self.lookback {
            return Err(ForecastError::WindowShape {
                expected: self.lookback,
                actual: buffer.lookback(),
            });
        }
        if self.horizon == 0 {
            return Ok(());
        }

        let seed_len = buffer.seed_len();
        if seed_len == 0 {
            return Err(ForecastError::InsufficientHistory {
                required: 1,
                actual: 0,
            });
        }
        // Steps past the seed need lookback - 1 known rows behind the last seed window
        if self.horizon > seed_len && seed_len + 1 < self.lookback {
            return Err(ForecastError::InsufficientHistory {
                required: self.lookback - 1,
                actual: seed_len,
            });
        }
        Ok(())
    }

    /// Run the rollout over `buffer`, extending it in place.
    pub fn run(&self, buffer: &mut WindowBuffer, target: Option<ArrayView2<'_, f64>>) -> Result<Dataset> {
        self.validate(buffer)?;

        let seed_len = buffer.seed_len();
        tracing::info!(
            runner = self.runner.name(),
            horizon = self.horizon,
            lookback = self.lookback,
            seed_windows = seed_len,
            "rollout started"
        );

        let mut predictions: Vec<Array1<f64>> = Vec::with_capacity(self.horizon);
        for step in 0..self.horizon {
            let window = buffer.window(step).ok_or(ForecastError::InsufficientHistory {
                required: step + 1,
                actual: buffer.len(),
            })?;

            let prediction = self.runner.predict(window).map_err(|e| {
                tracing::error!(step, error = %e, "model runner failed");
                e
            })?;
            if let Some(first) = predictions.first() {
                if prediction.len() != first.len() {
                    return Err(ForecastError::PredictionShape {
                        step,
                        expected: first.len(),
                        actual: prediction.len(),
                    });
                }
            }

            let feeds_back = StepRegime::feeds_back(step, seed_len);
            if self.echo > 0 {
                self.echo_step(step, seed_len, prediction.view(), feeds_back, target);
            }
            // The final prediction has no next window to feed
            if feeds_back && step + 1 < self.horizon {
                buffer.extend_with(step, prediction.view())?;
            }
            predictions.push(prediction);
        }

        tracing::info!(steps = predictions.len(), "rollout finished");
        stack_rows(&predictions, buffer.features())
    }

    fn echo_step(
        &self,
        step: usize,
        seed_len: usize,
        prediction: ArrayView1<'_, f64>,
        feeds_back: bool,
        target: Option<ArrayView2<'_, f64>>,
    ) {
        let regime = StepRegime::of(step, seed_len);
        tracing::info!(step, ?regime, predicted = ?prediction.to_vec(), "predicted");
        if feeds_back {
            return;
        }
        if let Some(target) = target {
            if step < target.nrows() {
                tracing::info!(step, ground_truth = ?target.row(step).to_vec(), "ground truth");
            }
        }
    }
}

fn stack_rows(predictions: &[Array1<f64>], features: usize) -> Result<Dataset> {
    if predictions.is_empty() {
        return Ok(Array2::zeros((0, features)));
    }
    let rows: Vec<ArrayView1<'_, f64>> = predictions.iter().map(|p| p.view()).collect();
    stack(Axis(0), &rows).map_err(|e| ForecastError::Model(e.to_string()))
}

impl<R: ModelRunner> Forecaster for AutoregressiveForecaster<R> {
    fn forecast(&self, seed: WindowedDataset, target: Option<ArrayView2<'_, f64>>) -> Result<Dataset> {
        let mut buffer = WindowBuffer::from_windows(seed)?;
        self.run(&mut buffer, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runners::{LastStepRunner, MeanRunner};
    use ndarray::{array, Array3};

    #[test]
    fn test_teacher_forced_only_when_horizon_within_seed() {
        let series = Array2::from_shape_fn((6, 1), |(t, _)| t as f64);
        let mut buffer = WindowBuffer::from_series(series.view(), 2).unwrap();
        let forecaster = AutoregressiveForecaster::new(LastStepRunner, 4, 2);

        let predictions = forecaster.run(&mut buffer, None).unwrap();
        assert_eq!(predictions, array![[1.0], [2.0], [3.0], [4.0]]);
        assert_eq!(buffer.len(), buffer.seed_len());
    }

    #[test]
    fn test_persistence_runner_repeats_last_value_after_seed() {
        let series = Array2::from_shape_fn((3, 2), |(t, f)| (t * 2 + f) as f64);
        let mut buffer = WindowBuffer::from_series(series.view(), 2).unwrap();
        let forecaster = AutoregressiveForecaster::new(LastStepRunner, 5, 2);

        let predictions = forecaster.run(&mut buffer, None).unwrap();
        assert_eq!(
            predictions,
            array![[2.0, 3.0], [4.0, 5.0], [4.0, 5.0], [4.0, 5.0], [4.0, 5.0]]
        );
    }

    #[test]
    fn test_zero_horizon_is_empty() {
        let seed = Array3::zeros((2, 2, 3));
        let predictions = AutoregressiveForecaster::new(MeanRunner, 0, 2)
            .forecast(seed, None)
            .unwrap();
        assert_eq!(predictions.dim(), (0, 3));
    }

    #[test]
    fn test_lookback_mismatch_detected_before_running() {
        let seed = Array3::zeros((4, 3, 2));
        let err = AutoregressiveForecaster::new(MeanRunner, 2, 2)
            .forecast(seed, None)
            .unwrap_err();
        assert_eq!(
            err,
            ForecastError::WindowShape {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_empty_seed_rejected() {
        let seed = Array3::zeros((0, 2, 2));
        let err = AutoregressiveForecaster::new(MeanRunner, 1, 2)
            .forecast(seed, None)
            .unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientHistory { required: 1, actual: 0 }));
    }

    #[test]
    fn test_short_seed_with_long_lookback_rejected_up_front() {
        // One window of lookback 4 cannot supply three carried rows
        let seed = Array3::zeros((1, 4, 1));
        let err = AutoregressiveForecaster::new(MeanRunner, 3, 4)
            .forecast(seed.clone(), None)
            .unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientHistory {
                required: 3,
                actual: 1
            }
        );

        // Staying inside the seed is fine
        let predictions = AutoregressiveForecaster::new(MeanRunner, 1, 4)
            .forecast(seed, None)
            .unwrap();
        assert_eq!(predictions.dim(), (1, 1));
    }

    #[test]
    fn test_echo_with_target_does_not_change_predictions() {
        let series = Array2::from_shape_fn((4, 2), |(t, f)| (t + f) as f64);
        let target = Array2::from_shape_fn((2, 2), |(t, f)| (t * f) as f64);

        let plain = AutoregressiveForecaster::new(MeanRunner, 6, 2)
            .run(&mut WindowBuffer::from_series(series.view(), 2).unwrap(), None)
            .unwrap();
        let echoed = AutoregressiveForecaster::new(MeanRunner, 6, 2)
            .with_echo(1)
            .run(
                &mut WindowBuffer::from_series(series.view(), 2).unwrap(),
                Some(target.view()),
            )
            .unwrap();
        assert_eq!(plain, echoed);
    }
}
