//! Core functionality for the CSV chart viewer
//!
//! This crate provides the data model, the view state container and the
//! abstractions shared by the loading, view and application crates.

pub mod data;
pub mod environment;
pub mod events;
pub mod navigation;
pub mod state;

// Re-export commonly used types
pub use data::{Dataset, DataSource, IngestError, LoadError, Row, Value};
pub use environment::{Environment, MemoryEnvironment};
pub use navigation::ZoomWindow;
pub use state::{
    AppSettings, ChartKind, Selection, Theme, TickStrategy, UploadOutcome, UploadTicket,
    ViewModel, ViewState,
};
