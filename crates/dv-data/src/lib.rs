//! Data loading and column analysis for the chart viewer

pub mod config;
pub mod schema;
pub mod sources;
pub mod temporal;

use dv_core::{IngestError, LoadError};
use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{CsvConfig, NullConfig};
pub use schema::{AxisPattern, SchemaDetector, XAxisInference};
pub use sources::CsvSource;
pub use temporal::parse_date;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<DataError> for LoadError {
    fn from(error: DataError) -> Self {
        match error {
            DataError::Ingest(err) => LoadError::Ingest(err),
            other => LoadError::Parse(other.to_string()),
        }
    }
}
