//! Null value handling for data loading

use serde::{Serialize, Deserialize};

/// Null value configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Cell contents treated as missing when typing values
    pub patterns: Vec<String>,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(),
                "null".to_string(),
                "N/A".to_string(),
                "NA".to_string(),
                "None".to_string(),
            ],
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a cell should be treated as null.
    ///
    /// Surrounding whitespace is ignored.
    pub fn is_null(&self, value: &str) -> bool {
        let value = value.trim();
        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                value == pattern
            } else {
                value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Add a null pattern
    pub fn add_pattern(&mut self, pattern: String) {
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }
}
