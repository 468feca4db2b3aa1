//! PNG export of chart descriptions
//!
//! Rendering goes through the plotters bitmap backend into an in-memory RGB
//! buffer which is then PNG-encoded. No font backend is compiled in, so the
//! image carries shapes only; labels live in the [`ChartView`] itself.

use std::f64::consts::PI;
use std::io::Cursor;

use dv_core::{ChartKind, ViewModel};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::{
    AreaSeries, BitMapBackend, Circle, Color, DrawingArea, IntoDrawingArea, LineSeries,
    PathElement, Polygon, RGBColor, Rectangle,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::{CartesianChart, ChartBuilder, ChartView, PieChart, ViewKind};
use crate::colors::{theme_colors, Rgb};

/// Smallest Y span drawn; flatter domains are widened around their centre
const MIN_Y_SPAN: f64 = 1e-9;

/// Which view to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// The zoomed view as shown
    CurrentView,
    /// Every row, ignoring the zoom window
    FullView,
}

impl ExportTarget {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportTarget::CurrentView => "chart.png",
            ExportTarget::FullView => "full_chart.png",
        }
    }

    pub fn view_kind(&self) -> ViewKind {
        match self {
            ExportTarget::CurrentView => ViewKind::Current,
            ExportTarget::FullView => ViewKind::Full,
        }
    }
}

/// Export options for charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Width of the exported image
    pub width: u32,
    /// Height of the exported image
    pub height: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export: {0}")]
    NothingToExport(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("download failed: {0}")]
    Download(anyhow::Error),
}

fn drawing_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Drawing(e.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Renders chart descriptions to PNG bytes
#[derive(Debug, Clone, Default)]
pub struct PngExporter {
    options: ExportOptions,
}

impl PngExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Render the chart and encode it as PNG
    pub fn render(&self, view: &ChartView) -> Result<Vec<u8>, ExportError> {
        let (width, height) = (self.options.width.max(1), self.options.height.max(1));
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            match view {
                ChartView::Empty { message } | ChartView::Message { message } => {
                    return Err(ExportError::NothingToExport(message.clone()));
                }
                ChartView::Cartesian(chart) => draw_cartesian(&root, chart)?,
                ChartView::Pie(pie) => draw_pie(&root, pie, (width, height))?,
            }
            root.present().map_err(drawing_error)?;
        }

        let mut bytes = Vec::new();
        PngEncoder::new(Cursor::new(&mut bytes)).write_image(
            &buffer,
            width,
            height,
            ColorType::Rgb8,
        )?;
        Ok(bytes)
    }
}

fn draw_cartesian(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    chart: &CartesianChart,
) -> Result<(), ExportError> {
    let colors = theme_colors(chart.theme);
    root.fill(&rgb(colors.background)).map_err(drawing_error)?;

    let [mut y_min, mut y_max] = chart.y_axis.domain;
    if y_max - y_min < MIN_Y_SPAN {
        y_min -= 0.5;
        y_max += 0.5;
    }
    let x_max = chart.points.len().max(1) as f64 - 0.5;

    let mut plot = plotters::chart::ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(chart.x_axis.height)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..x_max, y_min..y_max)
        .map_err(drawing_error)?;

    // Grid and axes
    let grid = rgb(colors.grid);
    for tick in &chart.y_axis.ticks {
        plot.draw_series(std::iter::once(PathElement::new(
            vec![(-0.5, *tick), (x_max, *tick)],
            grid,
        )))
        .map_err(drawing_error)?;
    }
    for index in &chart.x_axis.tick_indices {
        let x = *index as f64;
        plot.draw_series(std::iter::once(PathElement::new(
            vec![(x, y_min), (x, y_max)],
            grid,
        )))
        .map_err(drawing_error)?;
    }
    let axis = rgb(colors.axis);
    plot.draw_series(std::iter::once(PathElement::new(
        vec![(-0.5, y_max), (-0.5, y_min), (x_max, y_min)],
        axis.stroke_width(2),
    )))
    .map_err(drawing_error)?;

    let baseline = 0.0f64.clamp(y_min, y_max);
    let series_count = chart.series.len().max(1) as f64;

    for (s, series) in chart.series.iter().enumerate() {
        let color = rgb(series.color);
        let values: Vec<Option<(f64, f64)>> = chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                p.values
                    .get(&series.name)
                    .copied()
                    .flatten()
                    .map(|y| (i as f64, y))
            })
            .collect();

        match chart.kind {
            ChartKind::Line => {
                for segment in segments(&values) {
                    plot.draw_series(LineSeries::new(segment, color.stroke_width(2)))
                        .map_err(drawing_error)?;
                }
            }
            ChartKind::Area => {
                for segment in segments(&values) {
                    plot.draw_series(
                        AreaSeries::new(segment, baseline, color.mix(0.3)).border_style(color),
                    )
                    .map_err(drawing_error)?;
                }
            }
            ChartKind::Scatter => {
                plot.draw_series(
                    values
                        .iter()
                        .flatten()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )
                .map_err(drawing_error)?;
            }
            ChartKind::Bar => {
                let width = 0.8 / series_count;
                plot.draw_series(values.iter().flatten().map(|&(x, y)| {
                    let x0 = x - 0.4 + width * s as f64;
                    Rectangle::new([(x0, baseline), (x0 + width, y)], color.filled())
                }))
                .map_err(drawing_error)?;
            }
            ChartKind::Pie => {
                return Err(ExportError::Drawing(
                    "pie data in a cartesian chart".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Split a series at missing values into drawable runs
fn segments(values: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    values
        .split(|v| v.is_none())
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().flatten().copied().collect())
        .collect()
}

fn draw_pie(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    pie: &PieChart,
    (width, height): (u32, u32),
) -> Result<(), ExportError> {
    let colors = theme_colors(pie.theme);
    root.fill(&rgb(colors.background)).map_err(drawing_error)?;

    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * 0.4;

    // Start at twelve o'clock, clockwise
    let mut angle = -PI / 2.0;
    for slice in &pie.slices {
        let sweep = slice.fraction * 2.0 * PI;
        let steps = ((sweep / (2.0 * PI)) * 180.0).ceil().max(1.0) as usize;

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push((center.0 as i32, center.1 as i32));
        for step in 0..=steps {
            let a = angle + sweep * step as f64 / steps as f64;
            outline.push((
                (center.0 + radius * a.cos()).round() as i32,
                (center.1 + radius * a.sin()).round() as i32,
            ));
        }

        root.draw(&Polygon::new(outline, rgb(slice.color).filled()))
            .map_err(drawing_error)?;
        angle += sweep;
    }

    Ok(())
}

/// Render the requested view of the current state and hand the PNG to the
/// environment. Returns the file name used.
pub fn export_chart(
    view_model: &ViewModel,
    builder: &ChartBuilder,
    exporter: &PngExporter,
    target: ExportTarget,
) -> Result<String, ExportError> {
    let state = view_model.snapshot();
    let view = builder.build(&state, target.view_kind());
    let bytes = exporter.render(&view)?;

    let file_name = target.file_name();
    view_model
        .environment()
        .trigger_download(file_name, &bytes)
        .map_err(ExportError::Download)?;

    tracing::info!("Exported {} ({} bytes)", file_name, bytes.len());
    Ok(file_name.to_string())
}
