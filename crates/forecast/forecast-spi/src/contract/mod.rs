//! Contract module containing trait definitions for forecast operations

mod forecaster;
mod model_runner;

pub use forecaster::Forecaster;
pub use model_runner::ModelRunner;
