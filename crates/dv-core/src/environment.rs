//! Side effects the view model needs from its host

use parking_lot::Mutex;

use crate::state::Theme;

/// Host environment: theming and file downloads.
///
/// The chart logic never touches the host directly; it goes through this
/// trait so that it can run headless in tests.
pub trait Environment: Send + Sync {
    /// Restyle the host for the given theme
    fn apply_theme(&self, theme: Theme);

    /// Hand a finished file (e.g. an exported PNG) to the user
    fn trigger_download(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Environment that records every side effect in memory
#[derive(Default)]
pub struct MemoryEnvironment {
    themes: Mutex<Vec<Theme>>,
    downloads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryEnvironment {
    pub fn applied_themes(&self) -> Vec<Theme> {
        self.themes.lock().clone()
    }

    /// Downloads as `(file name, bytes)` in trigger order
    pub fn downloads(&self) -> Vec<(String, Vec<u8>)> {
        self.downloads.lock().clone()
    }
}

impl Environment for MemoryEnvironment {
    fn apply_theme(&self, theme: Theme) {
        self.themes.lock().push(theme);
    }

    fn trigger_download(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.downloads
            .lock()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}
