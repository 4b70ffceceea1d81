//! Contract module containing trait definitions for data access

mod data_source;

pub use data_source::DataSource;
