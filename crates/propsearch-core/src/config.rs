//! Application configuration management.
//!
//! Configuration is stored at `~/.config/propsearch/config.json`. Every field
//! is optional; the API location and cache directory can also be set through
//! `PROPSEARCH_API_URL` and `PROPSEARCH_CACHE_DIR`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::store::DatasetId;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "propsearch";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const API_URL_ENV: &str = "PROPSEARCH_API_URL";
pub const CACHE_DIR_ENV: &str = "PROPSEARCH_CACHE_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub cache_dir: Option<PathBuf>,
    pub persist: PersistSettings,
}

/// Which stores survive across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistSettings {
    pub property: bool,
    pub school: bool,
    pub transit: bool,
    pub metadata: bool,
}

impl Default for PersistSettings {
    fn default() -> Self {
        // Property summaries are not persisted by default
        Self {
            property: false,
            school: true,
            transit: true,
            metadata: true,
        }
    }
}

impl PersistSettings {
    pub fn enabled(&self, id: DatasetId) -> bool {
        match id {
            DatasetId::Property => self.property,
            DatasetId::School => self.school,
            DatasetId::Transit => self.transit,
            DatasetId::Metadata => self.metadata,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// API base URL: environment, then config, then the local default
    pub fn base_url(&self) -> String {
        resolve(std::env::var(API_URL_ENV).ok(), self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Cache directory: environment, then config, then the platform cache dir
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let configured = self
            .cache_dir
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        if let Some(dir) = resolve(std::env::var(CACHE_DIR_ENV).ok(), configured) {
            return Ok(PathBuf::from(dir));
        }

        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

/// First non-blank of an environment value and a configured value
fn resolve(env: Option<String>, configured: Option<String>) -> Option<String> {
    env.into_iter()
        .chain(configured)
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_persistence_matches_app() {
        let persist = PersistSettings::default();
        assert!(!persist.enabled(DatasetId::Property));
        assert!(persist.enabled(DatasetId::School));
        assert!(persist.enabled(DatasetId::Transit));
        assert!(persist.enabled(DatasetId::Metadata));
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            resolve(Some("http://env".into()), Some("http://file".into())),
            Some("http://env".to_string())
        );
        assert_eq!(
            resolve(Some("  ".into()), Some("http://file".into())),
            Some("http://file".to_string())
        );
        assert_eq!(resolve(None, None), None);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.api_base_url.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.persist, PersistSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_base_url": "https://example.test/api", "persist": {"property": true}}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("https://example.test/api"));
        assert!(config.persist.property);
        assert!(config.persist.school);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            request_timeout_secs: Some(5),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
