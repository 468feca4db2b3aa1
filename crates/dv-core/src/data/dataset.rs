//! Cleaned, in-memory dataset

use thiserror::Error;

use super::{Row, Value};
use crate::navigation::ZoomWindow;

static NULL: Value = Value::Null;

/// Reasons a parsed file cannot become a dataset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("file has no header row")]
    NoHeaders,

    #[error("file has no data rows")]
    NoRows,
}

/// Failure reported by a data source while loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file could not be read or is not valid delimited text
    #[error("parse error: {0}")]
    Parse(String),

    /// The file parsed but holds nothing to chart
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Parsed and cleaned tabular data.
///
/// `headers[0]` is the X-axis column; the remaining headers are the
/// candidate Y series. Every row carries exactly the header keys, in header
/// order, and rows keep the order of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from raw parsed rows.
    ///
    /// Text values are trimmed. Keys missing from a row are filled with
    /// [`Value::Null`] and keys outside the header are dropped.
    pub fn ingest(headers: Vec<String>, raw_rows: Vec<Row>) -> Result<Self, IngestError> {
        if headers.is_empty() {
            return Err(IngestError::NoHeaders);
        }
        if raw_rows.is_empty() {
            return Err(IngestError::NoRows);
        }

        let rows = raw_rows
            .into_iter()
            .map(|mut raw| {
                headers
                    .iter()
                    .map(|header| {
                        let value = raw.shift_remove(header).unwrap_or(Value::Null);
                        (header.clone(), value.cleaned())
                    })
                    .collect::<Row>()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in file order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The designated X-axis column
    pub fn x_column(&self) -> &str {
        &self.headers[0]
    }

    /// Columns that may be plotted as Y series
    pub fn y_candidates(&self) -> &[String] {
        &self.headers[1..]
    }

    /// Whether `name` is one of the Y-series candidates
    pub fn is_y_candidate(&self, name: &str) -> bool {
        self.y_candidates().iter().any(|h| h == name)
    }

    /// Values of a single column, in row order
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |row| row.get(name).unwrap_or(&NULL))
    }

    /// Rows inside the zoom window
    pub fn window(&self, zoom: &ZoomWindow) -> &[Row] {
        zoom.slice(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ingest_trims_and_preserves_order() {
        let dataset = Dataset::ingest(
            headers(&["Year", "Sales"]),
            vec![
                raw(&[("Year", " 2020"), ("Sales", "100 ")]),
                raw(&[("Year", "2021"), ("Sales", " 150 ")]),
            ],
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.headers(), &["Year".to_string(), "Sales".to_string()]);
        assert_eq!(dataset.rows()[0]["Year"], Value::from("2020"));
        assert_eq!(dataset.rows()[1]["Sales"], Value::from("150"));
        assert_eq!(dataset.x_column(), "Year");
        assert_eq!(dataset.y_candidates(), &["Sales".to_string()]);
    }

    #[test]
    fn test_ingest_normalises_row_keys() {
        let dataset = Dataset::ingest(
            headers(&["a", "b"]),
            vec![raw(&[("b", "2"), ("extra", "x")])],
        )
        .unwrap();

        let keys: Vec<_> = dataset.rows()[0].keys().cloned().collect();
        assert_eq!(keys, headers(&["a", "b"]));
        assert_eq!(dataset.rows()[0]["a"], Value::Null);
    }

    #[test]
    fn test_non_text_values_pass_through() {
        let mut row = Row::new();
        row.insert("n".to_string(), Value::Number(1.5));
        let dataset = Dataset::ingest(headers(&["n"]), vec![row]).unwrap();
        assert_eq!(dataset.rows()[0]["n"], Value::Number(1.5));
    }

    #[test]
    fn test_ingest_rejects_empty_input() {
        assert_eq!(
            Dataset::ingest(Vec::new(), vec![raw(&[("a", "1")])]),
            Err(IngestError::NoHeaders)
        );
        assert_eq!(
            Dataset::ingest(headers(&["a"]), Vec::new()),
            Err(IngestError::NoRows)
        );
    }
}
