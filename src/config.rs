use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Default-value helpers (required by serde `default = "..."`)
// ---------------------------------------------------------------------------

/// Band limit used when nothing else is configured.
pub const DEFAULT_MAX_BANDS: usize = 200;

fn default_max_bands() -> usize {
    DEFAULT_MAX_BANDS
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Run settings. Every field has a default so partial JSON files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of bands accepted from the input.
    #[serde(default = "default_max_bands")]
    pub max_bands: usize,

    /// Whether CSV input starts with a header row.
    #[serde(default = "default_true")]
    pub has_header: bool,

    /// Fail the run instead of writing NaN for flagged samples.
    #[serde(default)]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bands: default_max_bands(),
            has_header: true,
            strict: false,
        }
    }
}

impl Config {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(
            "config loaded from {} (max_bands={}, strict={})",
            path.display(),
            config.max_bands,
            config.strict
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_bands, 200);
        assert!(config.has_header);
    }

    #[test]
    fn partial_override() {
        let config: Config = serde_json::from_str(r#"{ "max_bands": 4096, "strict": true }"#).unwrap();
        assert_eq!(config.max_bands, 4096);
        assert!(config.strict);
        assert!(config.has_header);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/rusty-continuum.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("rc-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "has_header": false }"#).unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(!config.has_header);
        assert_eq!(config.max_bands, DEFAULT_MAX_BANDS);
    }
}
