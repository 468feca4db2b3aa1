//! View state and the pure transitions that produce new snapshots

mod engine;

pub use engine::{UploadOutcome, UploadTicket, ViewModel};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Row};
use crate::navigation::ZoomWindow;

/// Chart kinds offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Area,
    Scatter,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Area,
        ChartKind::Scatter,
        ChartKind::Pie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Area => "area",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
        }
    }

    /// Pie charts ignore the zoom window and the X axis
    pub fn is_pie(&self) -> bool {
        matches!(self, ChartKind::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown chart kind '{}'", s))
    }
}

/// Policy for which X-axis labels are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickStrategy {
    /// Space labels to fit the chart width
    #[default]
    Auto,
    /// Roughly one label in ten
    Sparse,
    /// Every label of an already downsampled series
    Sampled,
    /// No labels at all
    None,
}

impl TickStrategy {
    pub const ALL: [TickStrategy; 4] = [
        TickStrategy::Auto,
        TickStrategy::Sparse,
        TickStrategy::Sampled,
        TickStrategy::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TickStrategy::Auto => "auto",
            TickStrategy::Sparse => "sparse",
            TickStrategy::Sampled => "sampled",
            TickStrategy::None => "none",
        }
    }
}

impl fmt::Display for TickStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TickStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TickStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tick strategy '{}'", s))
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    pub theme: Theme,
}

/// What the user has chosen to plot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Selected Y columns
    pub columns: BTreeSet<String>,

    /// Chart kind
    pub chart_kind: ChartKind,

    /// X-axis tick strategy
    pub tick_strategy: TickStrategy,
}

impl Selection {
    pub fn is_selected(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}

/// Immutable snapshot of everything the chart builder needs.
///
/// Each transition consumes a snapshot and returns the next one; the
/// [`ViewModel`] swaps snapshots atomically.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// The currently loaded dataset
    pub dataset: Option<Arc<Dataset>>,

    /// Name of the file the dataset came from
    pub source_name: Option<String>,

    pub selection: Selection,

    pub zoom: ZoomWindow,

    pub settings: AppSettings,
}

impl ViewState {
    /// Replace the dataset and everything derived from the previous one.
    ///
    /// The second header becomes the only selected column when there is
    /// one; the zoom window covers every row.
    pub fn with_dataset(mut self, source_name: impl Into<String>, dataset: Dataset) -> Self {
        self.selection.columns = dataset.y_candidates().iter().take(1).cloned().collect();
        self.zoom = ZoomWindow::full(dataset.len());
        self.source_name = Some(source_name.into());
        self.dataset = Some(Arc::new(dataset));
        self
    }

    /// Drop the dataset and the file-derived selection
    pub fn cleared(mut self) -> Self {
        self.dataset = None;
        self.source_name = None;
        self.selection.columns.clear();
        self.zoom = ZoomWindow::default();
        self
    }

    /// Add the column to the selection if absent, remove it otherwise
    pub fn toggle_column(mut self, column: &str) -> Self {
        if !self.selection.columns.remove(column) {
            let known = self
                .dataset
                .as_ref()
                .map(|dataset| dataset.is_y_candidate(column))
                .unwrap_or(false);
            if known {
                self.selection.columns.insert(column.to_string());
            } else {
                tracing::debug!("Ignoring toggle of unknown column '{}'", column);
            }
        }
        self
    }

    pub fn with_chart_kind(mut self, kind: ChartKind) -> Self {
        self.selection.chart_kind = kind;
        self
    }

    pub fn with_tick_strategy(mut self, strategy: TickStrategy) -> Self {
        self.selection.tick_strategy = strategy;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.settings.theme = theme;
        self
    }

    pub fn zoomed_in(mut self) -> Self {
        self.zoom = self.zoom.zoom_in();
        self
    }

    pub fn zoomed_out(mut self) -> Self {
        self.zoom = self.zoom.zoom_out(self.row_count());
        self
    }

    pub fn zoom_reset(mut self) -> Self {
        self.zoom = self.zoom.reset(self.row_count());
        self
    }

    /// Total number of loaded rows
    pub fn row_count(&self) -> usize {
        self.dataset.as_ref().map(|d| d.len()).unwrap_or(0)
    }

    /// Rows in view: everything for pie charts, the zoom slice otherwise
    pub fn visible_rows(&self) -> &[Row] {
        match &self.dataset {
            Some(dataset) if self.selection.chart_kind.is_pie() => dataset.rows(),
            Some(dataset) => dataset.window(&self.zoom),
            None => &[],
        }
    }

    /// Selected columns in header order
    pub fn selected_columns(&self) -> Vec<&str> {
        match &self.dataset {
            Some(dataset) => dataset
                .y_candidates()
                .iter()
                .filter(|h| self.selection.is_selected(h))
                .map(|h| h.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}
