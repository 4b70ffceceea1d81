//! Contract module containing trait definitions for scaling operations

mod scale_store;
mod scaler;

pub use scale_store::ScaleStore;
pub use scaler::Scaler;
