use std::collections::HashSet;

use dv_core::data::{display_number, Dataset, Value};
use serde::Serialize;

use crate::temporal::parse_date;

/// Pattern detected in the X-axis column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AxisPattern {
    /// Mostly dates
    Timeline,
    /// Numeric with a single distinct value
    Constant { value: f64 },
    /// Integers advancing by a fixed step
    Sequence { step: i64 },
    /// Numbers advancing by a fixed fractional step
    FractionalStep { step: f64 },
    /// Numbers without a fixed step
    NumericRange { min: f64, max: f64 },
    /// Few distinct values relative to the row count
    Categorical { categories: usize },
    /// Anything else
    Text,
    /// No non-null values at all
    Empty,
}

/// Result of analysing the X-axis column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxisInference {
    pub column: String,
    pub pattern: AxisPattern,
    /// Column name annotated with the pattern, e.g. `Year (Sequence: +1)`
    pub label: String,
}

/// Schema detector for classifying the X-axis column
#[derive(Debug, Clone)]
pub struct SchemaDetector {
    /// Share of non-null values that must be dates
    date_threshold: f64,
    /// Share of non-null values that must be numbers
    numeric_threshold: f64,
    /// Distinct values must stay below this share of the row count
    category_ratio: f64,
}

impl SchemaDetector {
    /// Create a new schema detector
    pub fn new() -> Self {
        Self {
            date_threshold: 0.8,
            numeric_threshold: 0.8,
            category_ratio: 0.5,
        }
    }

    pub fn with_date_threshold(mut self, threshold: f64) -> Self {
        self.date_threshold = threshold;
        self
    }

    pub fn with_numeric_threshold(mut self, threshold: f64) -> Self {
        self.numeric_threshold = threshold;
        self
    }

    pub fn with_category_ratio(mut self, ratio: f64) -> Self {
        self.category_ratio = ratio;
        self
    }

    /// Classify the dataset's X-axis column (`headers[0]`)
    pub fn detect_x_axis(&self, dataset: &Dataset) -> XAxisInference {
        let column = dataset.x_column();
        self.detect_column(column, dataset.column(column), dataset.len())
    }

    /// Classify a single column given its values and the total row count
    pub fn detect_column<'a>(
        &self,
        column: &str,
        values: impl IntoIterator<Item = &'a Value>,
        row_count: usize,
    ) -> XAxisInference {
        let values: Vec<&Value> = values.into_iter().filter(|v| !v.is_null()).collect();
        let pattern = self.classify(&values, row_count);
        XAxisInference {
            column: column.to_string(),
            label: label_for(column, &pattern),
            pattern,
        }
    }

    fn classify(&self, values: &[&Value], row_count: usize) -> AxisPattern {
        if values.is_empty() {
            return AxisPattern::Empty;
        }
        let total = values.len() as f64;

        let dates = values
            .iter()
            .filter(|v| v.as_text().and_then(parse_date).is_some())
            .count();
        if dates as f64 / total >= self.date_threshold {
            return AxisPattern::Timeline;
        }

        let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_number()).collect();
        if numbers.len() as f64 / total >= self.numeric_threshold {
            return Self::numeric_pattern(&numbers);
        }

        let distinct: HashSet<String> = values.iter().map(|v| v.to_string()).collect();
        if distinct.len() > 1 && (distinct.len() as f64) < self.category_ratio * row_count as f64 {
            return AxisPattern::Categorical {
                categories: distinct.len(),
            };
        }

        AxisPattern::Text
    }

    fn numeric_pattern(numbers: &[f64]) -> AxisPattern {
        let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return AxisPattern::Constant { value: min };
        }

        let first_step = numbers[1] - numbers[0];
        let tolerance = 1e-9 * first_step.abs().max(1.0);
        let fixed_step = numbers
            .windows(2)
            .all(|w| ((w[1] - w[0]) - first_step).abs() <= tolerance);

        if fixed_step && first_step != 0.0 {
            if (first_step - first_step.round()).abs() <= tolerance {
                return AxisPattern::Sequence {
                    step: first_step.round() as i64,
                };
            }
            return AxisPattern::FractionalStep { step: first_step };
        }

        AxisPattern::NumericRange { min, max }
    }
}

impl Default for SchemaDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn label_for(column: &str, pattern: &AxisPattern) -> String {
    match pattern {
        AxisPattern::Timeline => format!("{} (Timeline)", column),
        AxisPattern::Constant { value } => format!("{} (Constant: {})", column, compact(*value)),
        AxisPattern::Sequence { step } => format!("{} (Sequence: {:+})", column, step),
        AxisPattern::FractionalStep { step } => {
            let sign = if *step > 0.0 { "+" } else { "" };
            format!("{} (Step: {}{})", column, sign, compact(*step))
        }
        AxisPattern::NumericRange { min, max } => {
            format!("{} (Range: {} – {})", column, compact(*min), compact(*max))
        }
        AxisPattern::Categorical { categories } => {
            format!("{} ({} Categories)", column, categories)
        }
        AxisPattern::Text => format!("{} (Text)", column),
        AxisPattern::Empty => column.to_string(),
    }
}

/// Up to six decimals, trailing zeros removed
fn compact(n: f64) -> String {
    if n.fract() == 0.0 {
        return display_number(n);
    }
    let s = format!("{:.6}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(values: &[&str]) -> XAxisInference {
        let values: Vec<Value> = values.iter().map(|v| Value::from(*v)).collect();
        SchemaDetector::new().detect_column("X", values.iter(), values.len())
    }

    #[test]
    fn test_integer_sequence() {
        let values: Vec<Value> = ["2020", "2021", "2022"].iter().map(|v| Value::from(*v)).collect();
        let result = SchemaDetector::new().detect_column("Year", values.iter(), 3);
        assert_eq!(result.pattern, AxisPattern::Sequence { step: 1 });
        assert_eq!(result.label, "Year (Sequence: +1)");

        assert_eq!(infer(&["10", "8", "6"]).label, "X (Sequence: -2)");
    }

    #[test]
    fn test_numeric_variants() {
        assert_eq!(infer(&["5", "5", "5"]).label, "X (Constant: 5)");
        assert_eq!(infer(&["0.5", "1.0", "1.5"]).label, "X (Step: +0.5)");
        assert_eq!(
            infer(&["0.1", "0.2", "0.3"]).pattern,
            AxisPattern::FractionalStep { step: 0.1 }
        );
        assert_eq!(infer(&["1", "4", "99"]).label, "X (Range: 1 – 99)");
        assert_eq!(infer(&["1.25", "4", "9.5"]).label, "X (Range: 1.25 – 9.5)");
    }

    #[test]
    fn test_numeric_threshold() {
        // 4 of 5 numeric is enough; the stray value is ignored
        let result = infer(&["1", "2", "3", "4", "n/a"]);
        assert_eq!(result.pattern, AxisPattern::Sequence { step: 1 });

        // 3 of 5 is not
        let result = infer(&["1", "2", "3", "x", "y"]);
        assert_eq!(result.pattern, AxisPattern::Text);
    }

    #[test]
    fn test_timeline() {
        let result = infer(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "soon"]);
        assert_eq!(result.pattern, AxisPattern::Timeline);
        assert_eq!(result.label, "X (Timeline)");
    }

    #[test]
    fn test_categorical() {
        let regions = [
            "North", "South", "East", "West", "North", "South", "East", "West", "North", "South",
        ];
        let values: Vec<Value> = regions.iter().map(|v| Value::from(*v)).collect();
        let result = SchemaDetector::new().detect_column("Region", values.iter(), values.len());
        assert_eq!(result.label, "Region (4 Categories)");
    }

    #[test]
    fn test_text_and_empty() {
        assert_eq!(infer(&["alice", "bob", "carol"]).label, "X (Text)");
        // a single repeated value is not a category split
        assert_eq!(infer(&["a", "a", "a", "a", "a"]).pattern, AxisPattern::Text);
        assert_eq!(infer(&["", " ", ""]).label, "X");
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let values: Vec<Value> = ["1", "2", "x"].iter().map(|v| Value::from(*v)).collect();
        let strict = SchemaDetector::new().detect_column("X", values.iter(), 3);
        assert_eq!(strict.pattern, AxisPattern::Text);

        let lenient = SchemaDetector::new()
            .with_numeric_threshold(0.6)
            .detect_column("X", values.iter(), 3);
        assert_eq!(lenient.pattern, AxisPattern::Sequence { step: 1 });
    }
}
