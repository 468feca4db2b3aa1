//! Loading configuration

pub mod csv_config;
pub mod null_handling;

pub use csv_config::*;
pub use null_handling::*;
