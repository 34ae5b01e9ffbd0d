//! Grid configuration.
//!
//! Every field has a default, so a partial (or missing) JSON file is fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GridError, Result};
use crate::state::{PageSize, DEFAULT_VIEWPORT_WIDTH};

/// Tunables for a grid instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Quiet period before search/filter edits are committed, in milliseconds.
    pub debounce_ms: u64,
    /// Viewport width assumed when it cannot be measured.
    pub fallback_viewport_width: f32,
    /// Page size the demo collaborator requests when the query has none.
    pub default_page_size: u32,
    /// Absolute URL of the spreadsheet export endpoint.
    pub export_url: Option<String>,
    /// How long transient notifications stay visible, in seconds.
    pub notification_secs: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            fallback_viewport_width: DEFAULT_VIEWPORT_WIDTH,
            default_page_size: PageSize::DEFAULT.get(),
            export_url: None,
            notification_secs: 5,
        }
    }
}

impl GridConfig {
    /// Reads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GridError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&text).map_err(|e| GridError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Reads a JSON configuration file, falling back to defaults when it is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|err| {
            warn!("Ignoring grid configuration: {}", err);
            Self::default()
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    /// Configured default page size, or 25 when it is not an allowed size.
    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.default_page_size).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GridConfig = serde_json::from_str(r#"{"debounce_ms": 150}"#).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.fallback_viewport_width, 1024.0);
        assert_eq!(config.page_size(), PageSize::DEFAULT);
    }

    #[test]
    fn invalid_page_size_falls_back() {
        let config = GridConfig { default_page_size: 33, ..GridConfig::default() };
        assert_eq!(config.page_size(), PageSize::DEFAULT);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("rgrid-missing-config.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(GridConfig::load_or_default(&path), GridConfig::default());
        assert!(matches!(GridConfig::load(&path), Err(GridError::Config(_))));
    }

    #[test]
    fn invalid_file_uses_defaults() {
        let path = std::env::temp_dir().join("rgrid-invalid-config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(GridConfig::load_or_default(&path), GridConfig::default());
        let _ = std::fs::remove_file(&path);
    }
}
