//! Application configuration loaded from TOML

use std::path::Path;

use anyhow::{Context, Result};
use dv_core::Theme;
use dv_data::CsvConfig;
use dv_views::{ChartSettings, ExportOptions};
use serde::{Deserialize, Serialize};

/// Everything the viewer can be configured with.
///
/// Every section is optional in the file; missing keys take their defaults.
///
/// ```toml
/// theme = "dark"
///
/// [chart]
/// chart_width = 1000
///
/// [export]
/// width = 1600
/// height = 800
///
/// [csv]
/// delimiter = ";"
/// dynamic_typing = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Theme,
    pub chart: ChartSettings,
    pub export: ExportOptions,
    pub csv: CsvConfig,
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
