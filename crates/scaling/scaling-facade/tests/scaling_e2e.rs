//! End-to-end tests for the scaling stack
//!
//! Configurations come from JSON text, as they would from a run file.

use ndarray::{array, Array2};
use scaling_facade::{Scaler, ScalingConfig};
use tempfile::TempDir;

fn simulation_inputs() -> Array2<f64> {
    Array2::from_shape_fn((40, 3), |(t, f)| {
        let t = t as f64 * 0.05;
        match f {
            0 => t,
            1 => 200.0 + 15.0 * (t * 3.0).sin(),
            _ => -0.5 + 0.02 * t * t,
        }
    })
}

fn simulation_outputs() -> Array2<f64> {
    Array2::from_shape_fn((40, 2), |(t, f)| {
        let t = t as f64 * 0.05;
        if f == 0 {
            1e-3 * (1.0 + t).ln()
        } else {
            50.0 * (t * 2.0).cos()
        }
    })
}

fn load_config(text: &str, dir: &TempDir) -> ScalingConfig {
    let text = text.replace("$DIR", &dir.path().display().to_string());
    serde_json::from_str(&text).unwrap()
}

#[test]
fn e2e_fit_predict_restore() {
    let dir = TempDir::new().unwrap();

    let training = load_config(
        r#"{
            "scale": "soft_minmax",
            "objective": "all",
            "log_denominator": "beam",
            "input_log": "$DIR/input_log.json",
            "output_log": "$DIR/output_log.json"
        }"#,
        &dir,
    );
    let (_, scaled_out) = training
        .build_engine()
        .unwrap()
        .preprocess(simulation_inputs(), simulation_outputs())
        .unwrap();

    // A later run restores model outputs using only the persisted records
    let restoring = load_config(
        r#"{
            "objective": "predict_output",
            "log_denominator": "beam",
            "output_log": "$DIR/output_log.json"
        }"#,
        &dir,
    );
    let (untouched_in, restored_out) = restoring
        .build_engine()
        .unwrap()
        .invert(array![[1.0]], scaled_out)
        .unwrap();

    assert_eq!(untouched_in, array![[1.0]]);
    for (r, o) in restored_out.iter().zip(simulation_outputs().iter()) {
        assert!((r - o).abs() <= 1e-9 * o.abs().max(1e-12), "Mismatch: {} vs {}", r, o);
    }
}

#[test]
fn e2e_unknown_objective_is_rejected_before_running() {
    let err = serde_json::from_str::<ScalingConfig>(r#"{ "objective": "inputs" }"#).unwrap_err();
    assert!(err.to_string().contains("unknown objective 'inputs'"));
}
