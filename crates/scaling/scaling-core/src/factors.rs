//! Per-feature scale factor reductions over the sample axis.

use ndarray::{Array1, ArrayView2, Axis};
use scaling_spi::{Result, ScalingError, ScalingMode};

/// Widening applied to the range in soft min-max mode.
pub const SOFT_MINMAX_WIDENING: f64 = 1.25;

/// Factors below this magnitude cannot be divided by and are replaced by 1.
pub const MIN_FACTOR: f64 = 1e-12;

/// Compute one factor per column of `data` for a computing `mode`.
///
/// Constant columns would produce a zero factor and non-finite input a NaN
/// or infinite one; both are replaced by `1.0` so the transform stays
/// invertible.
pub fn compute_factors(mode: ScalingMode, data: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    let factors = match mode {
        ScalingMode::Std => data.map_axis(Axis(0), |column| column.std(0.0)),
        ScalingMode::MinMax => data.map_axis(Axis(0), |column| range(column.iter())),
        ScalingMode::SoftMinMax => {
            data.map_axis(Axis(0), |column| SOFT_MINMAX_WIDENING * range(column.iter()))
        }
        ScalingMode::File => {
            return Err(ScalingError::Configuration(
                "scale mode 'file' loads factors from the store and cannot compute them"
                    .to_string(),
            ))
        }
    };

    Ok(factors
        .iter()
        .enumerate()
        .map(|(feature, &factor)| {
            if !factor.is_finite() || factor.abs() < MIN_FACTOR {
                tracing::warn!(feature, mode = %mode, factor, "degenerate scale factor replaced by 1.0");
                1.0
            } else {
                factor
            }
        })
        .collect())
}

fn range<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    max - min
}
