//! Model module containing forecast data types

mod step_regime;

pub use step_regime::StepRegime;
