//! Backend-agnostic chart description
//!
//! [`ChartBuilder::build`] turns a view state snapshot into a [`ChartView`]
//! that any renderer can consume: the JSON printer, the PNG exporter or a
//! UI layer.

use dv_core::{ChartKind, Row, Theme, TickStrategy, Value, ViewState, ZoomWindow};
use dv_data::{AxisPattern, SchemaDetector};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::axis::{x_tick_layout, y_domain, y_ticks};
use crate::colors::{categorical_color, Rgb};
use crate::format::{format_number, format_tick, format_value};
use crate::pie::aggregate_pie;
use crate::sampling::downsample;

pub const NO_DATA_MESSAGE: &str = "Upload a CSV file to get started";
pub const NO_SELECTION_MESSAGE: &str = "Select at least one column to plot";
pub const NO_PIE_DATA_MESSAGE: &str = "No numeric data to plot for the selected columns";

/// Number of labelled ticks on the Y axis
const Y_TICK_COUNT: usize = 5;

/// Which rows a chart covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    /// The rows inside the zoom window
    #[default]
    Current,
    /// Every row, downsampled when the sampled tick strategy is active
    Full,
}

/// Tunables for chart derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Assumed plot width in pixels, used for automatic tick spacing
    pub chart_width: u32,
    /// Full views longer than this are downsampled
    pub sample_threshold: usize,
    pub sample_max_points: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            chart_width: 800,
            sample_threshold: 2000,
            sample_max_points: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ChartView {
    /// Nothing to draw yet
    Empty { message: String },
    /// A dataset is loaded but the selection yields nothing drawable
    Message { message: String },
    Pie(PieChart),
    Cartesian(CartesianChart),
}

impl ChartView {
    pub fn message(&self) -> Option<&str> {
        match self {
            ChartView::Empty { message } | ChartView::Message { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxisConfig {
    pub data_key: String,
    pub label: String,
    pub pattern: AxisPattern,
    pub interval: usize,
    pub hide: bool,
    pub height: u32,
    /// Indices into `points` that carry a label
    pub tick_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxisConfig {
    pub domain: [f64; 2],
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesConfig {
    pub name: String,
    pub color: Rgb,
}

/// One row of the visible data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Index of the row in the dataset
    pub row: usize,
    pub x: Value,
    pub x_label: String,
    pub tooltip_title: String,
    /// Series values in series order; `None` where the cell is not numeric
    pub values: IndexMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoomControls {
    pub start: usize,
    pub end: usize,
    pub total_rows: usize,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub can_reset: bool,
}

impl ZoomControls {
    fn new(zoom: ZoomWindow, total_rows: usize) -> Self {
        Self {
            start: zoom.start,
            end: zoom.end,
            total_rows,
            can_zoom_in: zoom.can_zoom_in(),
            can_zoom_out: zoom.can_zoom_out(total_rows),
            can_reset: !zoom.is_full(total_rows),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartesianChart {
    pub kind: ChartKind,
    pub theme: Theme,
    pub x_axis: XAxisConfig,
    pub y_axis: YAxisConfig,
    pub series: Vec<SeriesConfig>,
    pub points: Vec<ChartPoint>,
    /// Present for the zoomable current view only
    pub zoom: Option<ZoomControls>,
    pub sampled: bool,
    pub legend: bool,
    pub tooltip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    /// Share of the total in `[0, 1]`
    pub fraction: f64,
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub theme: Theme,
    pub slices: Vec<PieSlice>,
    pub total: f64,
    pub legend: bool,
    pub tooltip: bool,
}

/// Derives chart descriptions from view state snapshots
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    settings: ChartSettings,
    detector: SchemaDetector,
}

impl ChartBuilder {
    pub fn new(settings: ChartSettings) -> Self {
        Self {
            settings,
            detector: SchemaDetector::new(),
        }
    }

    pub fn with_detector(mut self, detector: SchemaDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn build(&self, state: &ViewState, view: ViewKind) -> ChartView {
        let Some(dataset) = state.dataset.as_deref() else {
            return ChartView::Empty {
                message: NO_DATA_MESSAGE.to_string(),
            };
        };

        let columns = state.selected_columns();
        if columns.is_empty() {
            return ChartView::Empty {
                message: NO_SELECTION_MESSAGE.to_string(),
            };
        }

        let theme = state.settings.theme;
        if state.selection.chart_kind.is_pie() {
            return self.build_pie(dataset.rows(), &columns, theme);
        }

        let (offset, rows) = match view {
            ViewKind::Current => (state.zoom.start, state.visible_rows()),
            ViewKind::Full => (0, dataset.rows()),
        };

        let x_inference = self.detector.detect_x_axis(dataset);
        let x_key = dataset.x_column();

        // Domain over every row in view, sampled or not
        let domain = y_domain(rows, &columns);
        let ticks = y_ticks(domain, Y_TICK_COUNT);

        let mut points: Vec<ChartPoint> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| chart_point(offset + i, row, x_key, &columns))
            .collect();

        let sampled = view == ViewKind::Full
            && state.selection.tick_strategy == TickStrategy::Sampled
            && points.len() > self.settings.sample_threshold;
        if sampled {
            points = downsample(&points, self.settings.sample_max_points);
        }

        let layout = x_tick_layout(
            state.selection.tick_strategy,
            points.len(),
            self.settings.chart_width,
        );

        let zoom = match view {
            ViewKind::Current => Some(ZoomControls::new(state.zoom, dataset.len())),
            ViewKind::Full => None,
        };

        tracing::debug!(
            "Built {} chart: {} series, {} points{}",
            state.selection.chart_kind,
            columns.len(),
            points.len(),
            if sampled { " (sampled)" } else { "" }
        );

        ChartView::Cartesian(CartesianChart {
            kind: state.selection.chart_kind,
            theme,
            x_axis: XAxisConfig {
                data_key: x_key.to_string(),
                label: x_inference.label,
                pattern: x_inference.pattern,
                interval: layout.interval,
                hide: layout.hide,
                height: layout.height,
                tick_indices: layout.tick_indices(points.len()),
            },
            y_axis: YAxisConfig {
                domain,
                tick_labels: ticks.iter().map(|t| format_number(*t)).collect(),
                ticks,
            },
            series: columns
                .iter()
                .enumerate()
                .map(|(i, name)| SeriesConfig {
                    name: name.to_string(),
                    color: categorical_color(i),
                })
                .collect(),
            points,
            zoom,
            sampled,
            legend: true,
            tooltip: true,
        })
    }

    fn build_pie(&self, rows: &[Row], columns: &[&str], theme: Theme) -> ChartView {
        let totals = match aggregate_pie(rows, columns) {
            Ok(totals) => totals,
            Err(e) => {
                tracing::debug!("Pie chart has nothing to draw: {}", e);
                return ChartView::Message {
                    message: NO_PIE_DATA_MESSAGE.to_string(),
                };
            }
        };

        let total: f64 = totals.iter().map(|t| t.value).sum();
        let slices = totals
            .into_iter()
            .enumerate()
            .map(|(i, t)| PieSlice {
                label: format!("{}: {}", t.name, format_number(t.value)),
                fraction: t.value / total,
                color: categorical_color(i),
                name: t.name,
                value: t.value,
            })
            .collect();

        ChartView::Pie(PieChart {
            theme,
            slices,
            total,
            legend: true,
            tooltip: true,
        })
    }
}

fn chart_point(index: usize, row: &Row, x_key: &str, columns: &[&str]) -> ChartPoint {
    let x = row.get(x_key).cloned().unwrap_or(Value::Null);
    ChartPoint {
        row: index,
        x_label: format_tick(&x),
        tooltip_title: format_value(&x),
        values: columns
            .iter()
            .map(|c| (c.to_string(), row.get(*c).and_then(|v| v.as_number())))
            .collect(),
        x,
    }
}
