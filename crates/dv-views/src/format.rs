//! Tick and value formatting
//!
//! Both formatters are total: every input yields a string.

use dv_core::Value;
use dv_data::temporal::{is_midnight, parse_date};

/// Rendered for missing values
pub const PLACEHOLDER: &str = "—";

/// Tick labels longer than this are truncated
const MAX_TICK_CHARS: usize = 8;
/// Characters kept from a truncated tick label
const TRUNCATED_TICK_CHARS: usize = 6;

/// Format an X-axis tick label.
///
/// Dates become `m/d/yy` (with `HH:MM` unless the time is midnight); long
/// text is cut to six characters plus an ellipsis.
pub fn format_tick(value: &Value) -> String {
    if value.is_null() {
        return PLACEHOLDER.to_string();
    }

    match value {
        Value::Text(s) => {
            if let Some(dt) = parse_date(s) {
                let pattern = if is_midnight(&dt) { "%-m/%-d/%y" } else { "%-m/%-d/%y %H:%M" };
                return dt.format(pattern).to_string();
            }
            if s.chars().count() > MAX_TICK_CHARS {
                let head: String = s.chars().take(TRUNCATED_TICK_CHARS).collect();
                return format!("{}…", head);
            }
            s.clone()
        }
        other => other.to_string(),
    }
}

/// Format a value for tooltips and numeric axis ticks.
///
/// Dates get the full month name, numbers two decimals.
pub fn format_value(value: &Value) -> String {
    if value.is_null() {
        return PLACEHOLDER.to_string();
    }

    match value {
        Value::Number(n) => format!("{:.2}", n),
        Value::Text(s) => match parse_date(s) {
            Some(dt) if is_midnight(&dt) => dt.format("%B %-d, %Y").to_string(),
            Some(dt) => dt.format("%B %-d, %Y %H:%M").to_string(),
            None => s.clone(),
        },
        other => other.to_string(),
    }
}

/// Shorthand for numeric axis labels
pub fn format_number(n: f64) -> String {
    format_value(&Value::Number(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_dates() {
        assert_eq!(format_tick(&Value::from("2024-01-05")), "1/5/24");
        assert_eq!(format_tick(&Value::from("2024-11-25 15:04:00")), "11/25/24 15:04");
    }

    #[test]
    fn test_tick_truncation() {
        assert_eq!(format_tick(&Value::from("Northwest Region")), "Northw…");
        assert_eq!(format_tick(&Value::from("12345678")), "12345678");
        assert_eq!(format_tick(&Value::from("Ünïcödé-Länd")), "Ünïcöd…");
    }

    #[test]
    fn test_tick_plain_values() {
        assert_eq!(format_tick(&Value::from("2020")), "2020");
        assert_eq!(format_tick(&Value::Number(2020.0)), "2020");
        assert_eq!(format_tick(&Value::Number(0.5)), "0.5");
        assert_eq!(format_tick(&Value::Bool(true)), "true");
        assert_eq!(format_tick(&Value::Null), PLACEHOLDER);
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(&Value::from("2024-01-05")), "January 5, 2024");
        assert_eq!(format_value(&Value::from("2024-01-05T09:30:00")), "January 5, 2024 09:30");
        assert_eq!(format_value(&Value::Number(3.14159)), "3.14");
        assert_eq!(format_value(&Value::Number(100.0)), "100.00");
        assert_eq!(format_value(&Value::from("North")), "North");
        assert_eq!(format_value(&Value::Null), PLACEHOLDER);
        assert_eq!(format_number(-0.5), "-0.50");
    }

    #[test]
    fn test_formatters_are_total() {
        let inputs = [
            Value::Null,
            Value::Bool(false),
            Value::Number(f64::NAN),
            Value::Number(f64::INFINITY),
            Value::Number(-1e300),
            Value::from(""),
            Value::from("not a date"),
            Value::from("2024-02-30"),
            Value::from("9999-12-31 23:59:59"),
            Value::from("💥💥💥💥💥💥💥💥💥"),
        ];
        for value in &inputs {
            assert!(!format_tick(value).is_empty());
            let _ = format_value(value);
        }
    }
}
