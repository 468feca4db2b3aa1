//! Command-line front end for the CSV chart viewer
//!
//! Loads one CSV file into a [`ViewModel`], replays the requested user
//! actions, prints the resulting chart description and optionally exports
//! it as PNG.

pub mod config;
pub mod environment;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use dv_core::{ChartKind, Environment, Theme, TickStrategy, UploadOutcome, ViewModel};
use dv_data::CsvSource;
use dv_views::{export_chart, ChartBuilder, ChartView, ExportTarget, PngExporter, ViewKind};

pub use config::AppConfig;
pub use environment::FsEnvironment;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Chart a CSV file")]
pub struct Args {
    /// CSV file to load; the first column is the X axis
    pub path: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chart type: line, bar, area, scatter or pie
    #[arg(long)]
    pub kind: Option<ChartKind>,

    /// Toggle a Y column (repeatable); the second column starts selected
    #[arg(short = 'c', long = "column")]
    pub columns: Vec<String>,

    /// X tick strategy: auto, sparse, sampled or none
    #[arg(long)]
    pub ticks: Option<TickStrategy>,

    /// Zoom in this many steps
    #[arg(long, default_value_t = 0)]
    pub zoom_in: u32,

    /// Zoom out this many steps, applied after zooming in
    #[arg(long, default_value_t = 0)]
    pub zoom_out: u32,

    /// Reset the zoom window after the zoom steps
    #[arg(long, action)]
    pub reset_zoom: bool,

    /// Describe every row instead of the zoom window
    #[arg(long, action)]
    pub full: bool,

    /// Write the chart as PNG into this directory
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Use the dark theme
    #[arg(long, action)]
    pub dark: bool,

    /// Assumed chart width in pixels for tick spacing
    #[arg(long)]
    pub width: Option<u32>,

    /// Field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Convert numbers, booleans and null markers while parsing
    #[arg(long = "dynamic-typing", action)]
    pub dynamic_typing: bool,
}

impl Args {
    /// Command-line flags take precedence over the configuration file
    pub fn apply_to(&self, mut config: AppConfig) -> AppConfig {
        if self.dark {
            config.theme = Theme::Dark;
        }
        if let Some(width) = self.width {
            config.chart.chart_width = width;
        }
        if let Some(delimiter) = self.delimiter {
            config.csv.delimiter = delimiter;
        }
        if self.dynamic_typing {
            config.csv.dynamic_typing = true;
        }
        config
    }

    pub fn view_kind(&self) -> ViewKind {
        if self.full {
            ViewKind::Full
        } else {
            ViewKind::Current
        }
    }

    pub fn export_target(&self) -> ExportTarget {
        if self.full {
            ExportTarget::FullView
        } else {
            ExportTarget::CurrentView
        }
    }
}

/// Result of one run
#[derive(Debug)]
pub struct RunReport {
    pub view: ChartView,
    /// File written by the export, if one was requested
    pub exported: Option<PathBuf>,
}

/// Load the file, replay the requested actions and derive the chart
pub async fn run(args: &Args, config: AppConfig) -> Result<RunReport> {
    let config = args.apply_to(config);

    let out_dir = args.export.clone().unwrap_or_else(|| PathBuf::from("."));
    let environment: Arc<dyn Environment> = Arc::new(FsEnvironment::new(&out_dir));
    let view_model = ViewModel::new(environment);

    if config.theme != Theme::default() {
        view_model.set_theme(config.theme);
    }

    let source = CsvSource::from_path(&args.path, config.csv.clone());
    match view_model.load(&source).await {
        UploadOutcome::Applied { .. } => {}
        UploadOutcome::Cleared(err) => bail!("{}: {}", args.path.display(), err),
        UploadOutcome::Failed(message) => bail!("{}: {}", args.path.display(), message),
        UploadOutcome::Stale => bail!("upload of {} was superseded", args.path.display()),
    }

    if let Some(kind) = args.kind {
        view_model.set_chart_kind(kind);
    }
    if let Some(strategy) = args.ticks {
        view_model.set_tick_strategy(strategy);
    }
    for column in &args.columns {
        view_model.toggle_column(column);
    }
    for _ in 0..args.zoom_in {
        view_model.zoom_in();
    }
    for _ in 0..args.zoom_out {
        view_model.zoom_out();
    }
    if args.reset_zoom {
        view_model.reset_zoom();
    }

    let builder = ChartBuilder::new(config.chart.clone());
    let view = builder.build(&view_model.snapshot(), args.view_kind());

    let exported = match &args.export {
        Some(dir) => {
            let exporter = PngExporter::new(config.export);
            let file_name = export_chart(&view_model, &builder, &exporter, args.export_target())?;
            Some(dir.join(file_name))
        }
        None => None,
    };

    Ok(RunReport { view, exported })
}
