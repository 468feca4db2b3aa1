//! Tabular data model shared by every crate

mod dataset;
mod source;

pub use dataset::{Dataset, IngestError, LoadError};
pub use source::DataSource;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single row: column name to value, in header order
pub type Row = IndexMap<String, Value>;

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric interpretation of the value.
    ///
    /// Numbers and numeric text both count; booleans, nulls and
    /// non-finite results do not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Nulls and blank text are treated as missing
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Whitespace-trimmed copy for text, identity for everything else
    pub fn cleaned(self) -> Self {
        match self {
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.len() == s.len() {
                    Value::Text(s)
                } else {
                    Value::Text(trimmed.to_string())
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&display_number(*n)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// Parse a finite number out of a text cell
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a number the way a spreadsheet would: integral values drop the
/// fractional part.
pub fn display_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
