//! CSV parsing options

use serde::{Deserialize, Serialize};

use super::null_handling::NullConfig;

/// How a CSV file is turned into rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: char,

    /// Skip lines whose fields are all blank
    pub skip_empty_lines: bool,

    /// Convert cells to numbers, booleans and nulls instead of keeping text
    pub dynamic_typing: bool,

    /// Null handling, used when `dynamic_typing` is on
    pub null_config: NullConfig,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_empty_lines: true,
            dynamic_typing: false,
            null_config: NullConfig::default(),
        }
    }
}

impl CsvConfig {
    /// Delimiter as the single byte the csv reader expects; non-ASCII
    /// delimiters fall back to a comma.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            tracing::warn!("Unsupported delimiter {:?}, using ','", self.delimiter);
            b','
        }
    }
}
