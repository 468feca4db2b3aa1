//! Axis domain and tick layout

use dv_core::{Row, TickStrategy};
use serde::Serialize;

/// Domain used when a column holds no numbers
pub const DEFAULT_DOMAIN: [f64; 2] = [0.0, 100.0];
/// Share of the value span added above and below the data
pub const DOMAIN_PADDING: f64 = 0.1;

/// Horizontal pixels reserved per X-axis label in automatic mode
pub const TICK_SPACING_PX: u32 = 100;
/// Points skipped between labels in sparse mode
pub const SPARSE_INTERVAL: usize = 9;
pub const X_AXIS_HEIGHT: u32 = 60;
pub const COLLAPSED_X_AXIS_HEIGHT: u32 = 20;

/// Y-axis domain over the given rows and columns.
///
/// `[min - p, max + p]` with `p` a tenth of the span; `[0, 100]` when no
/// value is numeric.
pub fn y_domain(rows: &[Row], columns: &[&str]) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for row in rows {
        for column in columns {
            if let Some(n) = row.get(*column).and_then(|v| v.as_number()) {
                min = min.min(n);
                max = max.max(n);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return DEFAULT_DOMAIN;
    }

    let padding = (max - min) * DOMAIN_PADDING;
    [min - padding, max + padding]
}

/// `count` evenly spaced values across the domain, ends included
pub fn y_ticks(domain: [f64; 2], count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![domain[0]],
        _ => {
            let step = (domain[1] - domain[0]) / (count - 1) as f64;
            (0..count).map(|i| domain[0] + step * i as f64).collect()
        }
    }
}

/// Which X-axis labels the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickLayout {
    /// Points skipped between two shown labels
    pub interval: usize,
    /// Labels suppressed entirely
    pub hide: bool,
    /// Axis height in pixels
    pub height: u32,
}

impl TickLayout {
    /// Indices of the points that carry a label
    pub fn tick_indices(&self, point_count: usize) -> Vec<usize> {
        if self.hide {
            return Vec::new();
        }
        (0..point_count).step_by(self.interval + 1).collect()
    }
}

/// Tick layout for `point_count` points on a chart `chart_width` pixels wide
pub fn x_tick_layout(strategy: TickStrategy, point_count: usize, chart_width: u32) -> TickLayout {
    let shown = |interval| TickLayout {
        interval,
        hide: false,
        height: X_AXIS_HEIGHT,
    };

    match strategy {
        TickStrategy::Auto => {
            let max_ticks = (chart_width / TICK_SPACING_PX).max(1) as usize;
            shown(point_count.div_ceil(max_ticks).saturating_sub(1))
        }
        TickStrategy::Sparse => {
            if point_count > SPARSE_INTERVAL + 1 {
                shown(SPARSE_INTERVAL)
            } else {
                shown(0)
            }
        }
        TickStrategy::Sampled => shown(0),
        TickStrategy::None => TickLayout {
            interval: 0,
            hide: true,
            height: COLLAPSED_X_AXIS_HEIGHT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::Value;

    fn rows(column: &str, values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| {
                let mut row = Row::new();
                row.insert(column.to_string(), Value::from(*v));
                row
            })
            .collect()
    }

    #[test]
    fn test_padded_domain() {
        let rows = rows("Sales", &["100", "150", "90"]);
        let domain = y_domain(&rows, &["Sales"]);
        assert!((domain[0] - 84.0).abs() < 1e-9);
        assert!((domain[1] - 156.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_numeric_domain_defaults() {
        let rows = rows("Region", &["North", "South"]);
        assert_eq!(y_domain(&rows, &["Region"]), DEFAULT_DOMAIN);
        assert_eq!(y_domain(&[], &["Region"]), DEFAULT_DOMAIN);
    }

    #[test]
    fn test_domain_ignores_stray_text_and_spans_columns() {
        let mut data = rows("a", &["1", "oops", "3"]);
        data[0].insert("b".to_string(), Value::Number(11.0));
        let domain = y_domain(&data, &["a", "b"]);
        assert_eq!(domain, [0.0, 12.0]);
    }

    #[test]
    fn test_auto_ticks() {
        // 800px fits 8 labels; 100 points -> every 13th
        let layout = x_tick_layout(TickStrategy::Auto, 100, 800);
        assert_eq!(layout.interval, 12);
        assert!(layout.tick_indices(100).len() <= 8);

        assert_eq!(x_tick_layout(TickStrategy::Auto, 5, 800).interval, 0);
        assert_eq!(x_tick_layout(TickStrategy::Auto, 0, 800).interval, 0);
        assert_eq!(x_tick_layout(TickStrategy::Auto, 10, 50).interval, 9);
    }

    #[test]
    fn test_other_strategies() {
        assert_eq!(x_tick_layout(TickStrategy::Sparse, 100, 800).interval, 9);
        assert_eq!(x_tick_layout(TickStrategy::Sparse, 100, 800).tick_indices(100).len(), 10);
        assert_eq!(x_tick_layout(TickStrategy::Sparse, 6, 800).interval, 0);
        assert_eq!(x_tick_layout(TickStrategy::Sampled, 500, 800).interval, 0);

        let hidden = x_tick_layout(TickStrategy::None, 100, 800);
        assert!(hidden.hide);
        assert!(hidden.tick_indices(100).is_empty());
        assert!(hidden.height < X_AXIS_HEIGHT);
    }

    #[test]
    fn test_y_ticks() {
        assert_eq!(y_ticks([0.0, 100.0], 5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(y_ticks([0.0, 1.0], 0).is_empty());
    }
}
