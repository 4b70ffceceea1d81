//! Trait for the trained sequence model

use ndarray::{Array1, ArrayView2};

use crate::error::Result;

/// Opaque trained model mapping one lookback window to a prediction vector.
///
/// The window is `lookback x features`, oldest timestep first. Runners are
/// expected to be deterministic and free of side effects for one rollout.
pub trait ModelRunner: Send + Sync {
    /// Runner name for diagnostics.
    fn name(&self) -> &str;

    /// Predict the next timestep from `window`.
    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>>;
}

impl<R: ModelRunner + ?Sized> ModelRunner for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        (**self).predict(window)
    }
}

impl<R: ModelRunner + ?Sized> ModelRunner for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        (**self).predict(window)
    }
}
