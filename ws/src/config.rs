//! Configuration for weekstore

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the week store directory
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Quiet period for debounced writes in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weekplan")
        .join("weeks")
}

fn default_debounce_ms() -> u64 {
    crate::DEFAULT_DEBOUNCE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("weekstore").join("config.yml")),
            Some(PathBuf::from("weekstore.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.debounce_ms, crate::DEFAULT_DEBOUNCE_MS);
        assert!(config.store_path.ends_with("weekplan/weeks"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("store_path: /tmp/weeks\n").unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/weeks"));
        assert_eq!(config.debounce_ms, crate::DEFAULT_DEBOUNCE_MS);
    }
}
