use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog API base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fakestoreapi.com".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Data directory override; defaults to ~/.shopsearch
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".shopsearch").join("config.toml"))
    }

    /// Resolve the data directory (override or ~/.shopsearch)
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".shopsearch"))
    }

    /// Path of the recency store file under the data directory
    pub fn recency_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("recency.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog.base_url, "https://fakestoreapi.com");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.catalog.base_url = "http://localhost:8080".to_string();

        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("localhost:8080"));

        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(deserialized.catalog.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[catalog]\nbase_url = \"http://x\"\ntimeout_secs = 3\n").unwrap();
        assert_eq!(config.catalog.base_url, "http://x");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/tmp/shopsearch-test")),
            },
            ..Default::default()
        };
        assert_eq!(
            config.data_dir().unwrap(),
            PathBuf::from("/tmp/shopsearch-test")
        );
        assert_eq!(
            config.recency_path().unwrap(),
            PathBuf::from("/tmp/shopsearch-test/recency.json")
        );
    }
}
