//! Unit tests for the scaling facade
//!
//! Round-trip and failure properties of the engine over in-memory stores.

use std::sync::Arc;

use ndarray::{array, Array2};
use scaling_facade::{
    MemoryScaleStore, Objective, ScaleStore, Scaler, ScalingEngine, ScalingError, ScalingMode,
    Side,
};

fn data_in() -> Array2<f64> {
    array![
        [0.12, 210.0, -3.5],
        [0.25, 198.0, -1.0],
        [0.31, 240.5, 2.25],
        [0.47, 260.0, 4.0],
        [0.52, 251.0, 7.5]
    ]
}

fn data_out() -> Array2<f64> {
    array![[1.5e-3, 12.0], [2.1e-3, 15.5], [2.6e-3, 11.0], [3.9e-3, 19.0], [4.4e-3, 23.5]]
}

fn engine_with_stores(mode: ScalingMode, objective: Objective) -> ScalingEngine {
    ScalingEngine::new(mode, objective)
        .with_store(Side::Input, Arc::new(MemoryScaleStore::new()))
        .with_store(Side::Output, Arc::new(MemoryScaleStore::new()))
}

fn assert_close(actual: &Array2<f64>, expected: &Array2<f64>) {
    assert_eq!(actual.dim(), expected.dim());
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            (a - e).abs() <= 1e-9 * e.abs().max(1e-12),
            "Mismatch: {} vs {}",
            a,
            e
        );
    }
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_every_mode_and_objective() {
    let modes = [ScalingMode::Std, ScalingMode::MinMax, ScalingMode::SoftMinMax];
    let objectives = [Objective::Input, Objective::Output, Objective::All];

    for mode in modes {
        for objective in objectives {
            let engine = engine_with_stores(mode, objective);
            let (scaled_in, scaled_out) = engine.preprocess(data_in(), data_out()).unwrap();
            let (restored_in, restored_out) = engine.invert(scaled_in, scaled_out).unwrap();

            assert_close(&restored_in, &data_in());
            assert_close(&restored_out, &data_out());
        }
    }
}

#[test]
fn test_round_trip_through_predict_objectives() {
    for (fit, predict) in [
        (Objective::Input, Objective::PredictInput),
        (Objective::Output, Objective::PredictOutput),
        (Objective::All, Objective::PredictAll),
    ] {
        let input = Arc::new(MemoryScaleStore::new());
        let output = Arc::new(MemoryScaleStore::new());
        let fitting = ScalingEngine::new(ScalingMode::Std, fit)
            .with_store(Side::Input, input.clone())
            .with_store(Side::Output, output.clone());
        let predicting = ScalingEngine::new(ScalingMode::Std, predict)
            .with_store(Side::Input, input)
            .with_store(Side::Output, output);

        let (scaled_in, scaled_out) = fitting.preprocess(data_in(), data_out()).unwrap();
        let (restored_in, restored_out) = predicting.invert(scaled_in, scaled_out).unwrap();

        assert_close(&restored_in, &data_in());
        assert_close(&restored_out, &data_out());
    }
}

#[test]
fn test_scaled_std_columns_have_unit_std() {
    let engine = engine_with_stores(ScalingMode::Std, Objective::Input);
    let (scaled_in, _) = engine.preprocess(data_in(), data_out()).unwrap();

    for column in scaled_in.columns() {
        assert!((column.std(0.0) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_scaled_minmax_columns_have_unit_range() {
    let engine = engine_with_stores(ScalingMode::MinMax, Objective::Output);
    let (_, scaled_out) = engine.preprocess(data_in(), data_out()).unwrap();

    for column in scaled_out.columns() {
        let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((max - min - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_scaled_soft_minmax_columns_have_reduced_range() {
    let engine = engine_with_stores(ScalingMode::SoftMinMax, Objective::Input);
    let (scaled_in, _) = engine.preprocess(data_in(), data_out()).unwrap();

    for column in scaled_in.columns() {
        let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((max - min - 0.8).abs() < 1e-9);
    }
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_file_mode_with_empty_store_fails() {
    for objective in [Objective::Input, Objective::Output, Objective::All] {
        let engine = engine_with_stores(ScalingMode::File, objective);
        let err = engine.preprocess(data_in(), data_out()).unwrap_err();
        assert!(
            matches!(err, ScalingError::MissingScaleRecord { .. }),
            "objective {objective}: {err}"
        );
    }
}

#[test]
fn test_invert_with_empty_store_fails() {
    let engine = engine_with_stores(ScalingMode::Std, Objective::PredictOutput);
    let err = engine.invert(data_in(), data_out()).unwrap_err();
    assert_eq!(
        err,
        ScalingError::MissingScaleRecord {
            side: Side::Output,
            name: "scaling".to_string()
        }
    );
}

#[test]
fn test_file_mode_does_not_persist() {
    let store = Arc::new(MemoryScaleStore::new());
    store
        .save(&scaling_facade::ScaleRecord::new("scaling", vec![1.0, 2.0, 4.0]))
        .unwrap();
    let engine =
        ScalingEngine::new(ScalingMode::File, Objective::Input).with_store(Side::Input, store.clone());

    engine.preprocess(data_in(), data_out()).unwrap();
    assert_eq!(store.names().unwrap(), vec!["scaling"]);
    assert_eq!(store.load("scaling").unwrap().unwrap().factors, vec![1.0, 2.0, 4.0]);
}
