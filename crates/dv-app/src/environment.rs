//! Filesystem-backed host environment

use std::path::{Path, PathBuf};

use anyhow::Context;
use dv_core::{Environment, Theme};

/// Writes downloads into a directory and logs theme changes
pub struct FsEnvironment {
    out_dir: PathBuf,
}

impl FsEnvironment {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl Environment for FsEnvironment {
    fn apply_theme(&self, theme: Theme) {
        tracing::info!("Theme set to {:?}", theme);
    }

    fn trigger_download(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(file_name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}
