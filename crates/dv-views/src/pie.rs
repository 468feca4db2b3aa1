//! Pie chart aggregation

use dv_core::Row;
use serde::Serialize;

use crate::ChartError;

/// Total of one column across the rows in view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTotal {
    pub name: String,
    pub value: f64,
}

/// Sum each column over `rows`, treating non-numeric cells as zero.
///
/// Columns whose total is zero or negative are dropped; when none remain
/// there is nothing to draw.
pub fn aggregate_pie(rows: &[Row], columns: &[&str]) -> Result<Vec<PieTotal>, ChartError> {
    let totals: Vec<PieTotal> = columns
        .iter()
        .map(|column| PieTotal {
            name: column.to_string(),
            value: rows
                .iter()
                .filter_map(|row| row.get(*column).and_then(|v| v.as_number()))
                .sum(),
        })
        .filter(|total| total.value > 0.0)
        .collect();

    if totals.is_empty() {
        return Err(ChartError::NoPlottableData);
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::Value;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_zero_columns_are_dropped() {
        let rows = vec![
            row(&[("A", "5"), ("B", "10")]),
            row(&[("A", "-5"), ("B", "30")]),
        ];
        let totals = aggregate_pie(&rows, &["A", "B"]).unwrap();
        assert_eq!(
            totals,
            vec![PieTotal {
                name: "B".to_string(),
                value: 40.0
            }]
        );
    }

    #[test]
    fn test_every_row_counts() {
        let rows = vec![row(&[("A", "1")]), row(&[("A", "2")]), row(&[("A", "n/a")])];
        let totals = aggregate_pie(&rows, &["A"]).unwrap();
        assert_eq!(totals[0].value, 3.0);
    }

    #[test]
    fn test_nothing_plottable() {
        let rows = vec![row(&[("A", "x"), ("B", "0")])];
        assert_eq!(aggregate_pie(&rows, &["A", "B"]), Err(ChartError::NoPlottableData));
        assert_eq!(aggregate_pie(&rows, &[]), Err(ChartError::NoPlottableData));
    }
}
