//! Application configuration management.
//!
//! Configuration is stored at `~/.config/parkstash/config.json` and names
//! where the parks dataset comes from and where storage lives.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "parkstash";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Storage origin used when none is configured
const DEFAULT_ORIGIN: &str = "national-parks";

/// Dataset location used when none is configured
const DEFAULT_DATA_SOURCE: &str = "data/parks.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// URL (http/https) or file path of the parks dataset
    pub data_source: Option<String>,
    pub origin: Option<String>,
    pub storage_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
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

    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn origin(&self) -> &str {
        self.origin.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }

    pub fn data_source(&self) -> &str {
        self.data_source.as_deref().unwrap_or(DEFAULT_DATA_SOURCE)
    }

    pub fn data_source_is_remote(&self) -> bool {
        let source = self.data_source();
        source.starts_with("http://") || source.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.origin(), "national-parks");
        assert_eq!(config.data_source(), "data/parks.json");
        assert!(!config.data_source_is_remote());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_source: Some("https://example.org/parks.json".to_string()),
            storage_dir: Some(dir.path().join("store")),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.data_source_is_remote());
        assert_eq!(loaded.storage_dir().unwrap(), dir.path().join("store"));
    }
}
