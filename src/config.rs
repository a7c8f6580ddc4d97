use std::path::Path;

use serde::Deserialize;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dataset-viewer.json";

/// Viewer settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Rows shown in dataset previews.
    pub preview_rows: usize,
    /// Most frequent values drawn in the histogram.
    pub histogram_max_bars: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            histogram_max_bars: 30,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read the config at `path`. A missing file gives the defaults; an
    /// unreadable or malformed one is logged and also gives the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&text) {
            Ok(config) => {
                log::debug!("Loaded config from {}: {config:?}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
