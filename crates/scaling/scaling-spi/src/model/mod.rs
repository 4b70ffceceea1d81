//! Scaling configuration values and persisted records.

mod objective;
mod scale_record;
mod scaling_mode;
mod side;

pub use objective::Objective;
pub use scale_record::ScaleRecord;
pub use scaling_mode::ScalingMode;
pub use side::Side;
