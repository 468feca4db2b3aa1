//! Chart derivation for the CSV chart viewer
//!
//! Everything here is a pure function of a [`dv_core::ViewState`] snapshot:
//! formatting, axis configuration, sampling, pie aggregation and the final
//! backend-agnostic [`ChartView`]. The PNG exporter is one consumer of that
//! description.

pub mod axis;
pub mod chart;
pub mod colors;
pub mod export;
pub mod format;
pub mod pie;
pub mod sampling;

pub use axis::{x_tick_layout, y_domain, TickLayout};
pub use chart::{
    CartesianChart, ChartBuilder, ChartPoint, ChartSettings, ChartView, PieChart, SeriesConfig,
    ViewKind, XAxisConfig, YAxisConfig, ZoomControls,
};
pub use export::{export_chart, ExportError, ExportOptions, ExportTarget, PngExporter};
pub use format::{format_tick, format_value};
pub use pie::{aggregate_pie, PieTotal};
pub use sampling::downsample;

use thiserror::Error;

/// Errors raised while deriving chart data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("no plottable numeric data in the selected columns")]
    NoPlottableData,
}
