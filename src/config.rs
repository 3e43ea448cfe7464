use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::MatchMode;
use crate::data::loader::ValidationMode;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PRENSA_VIEWER_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "prensa-viewer.json";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Startup options. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Required-column policy for new files.
    pub validation: ValidationMode,
    /// Group filter: dropdown (`exact`) or typed text (`contains`).
    pub group_match: MatchMode,
    /// Machine filter: dropdown (`exact`) or typed text (`contains`).
    pub machine_match: MatchMode,
    /// Number of filtered records shown in the table.
    pub preview_rows: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            group_match: MatchMode::Exact,
            machine_match: MatchMode::Exact,
            preview_rows: 50,
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load the config named by [`CONFIG_ENV`], else [`DEFAULT_CONFIG_FILE`]
    /// if present, else defaults. A broken file is logged and ignored.
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_from(explicit: Option<&Path>, fallback: &Path) -> Self {
        let path = match explicit {
            Some(p) => p,
            None if fallback.exists() => fallback,
            None => return Self::default(),
        };
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "validation": "lenient", "preview_rows": 10 }"#).unwrap();

        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.validation, ValidationMode::Lenient);
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.group_match, MatchMode::Exact);
    }

    #[test]
    fn match_modes_parse_lowercase() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "group_match": "contains", "machine_match": "contains" }"#)
                .unwrap();
        assert_eq!(config.group_match, MatchMode::Contains);
        assert_eq!(config.machine_match, MatchMode::Contains);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(ViewerConfig::from_file(&path).is_err());
        assert_eq!(
            ViewerConfig::load_from(Some(&path), Path::new("unused.json")),
            ViewerConfig::default()
        );
    }

    #[test]
    fn missing_fallback_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        assert_eq!(ViewerConfig::load_from(None, &fallback), ViewerConfig::default());

        std::fs::write(&fallback, r#"{ "preview_rows": 5 }"#).unwrap();
        assert_eq!(ViewerConfig::load_from(None, &fallback).preview_rows, 5);
    }
}
