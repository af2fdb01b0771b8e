//! Configuration management for tubesent
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scoring service configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Collection run configuration
    #[serde(default)]
    pub collect: CollectConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Scoring service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Cloud Natural Language API
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,

    /// Environment variable name for the API key
    #[serde(default = "default_api_key_env")]
    pub key_env: String,

    /// Fallback file holding the API key (first line), used when the
    /// environment variable is not set
    #[serde(default)]
    pub key_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

/// Collection run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    /// How long to pause before retrying a rate-limited request (seconds).
    /// Retries at this fixed interval until the limit lifts.
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,

    /// Default output ledger path
    #[serde(default = "default_output")]
    pub output: String,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for tubesent data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            collect: CollectConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_api_endpoint(),
            key_env: default_api_key_env(),
            key_file: None,
            timeout_secs: default_api_timeout(),
        }
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            backoff_secs: default_backoff_secs(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Get the default base directory for tubesent (~/.tubesent)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tubesent")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        let base = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific base directory, falling back to
    /// defaults when no config file exists there
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Resolve the API key: environment variable first, key file second.
    /// The key is never stored in the config file itself.
    pub fn api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(&self.api.key_env) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                return Ok(key);
            }
        }

        if let Some(ref path) = self.api.key_file {
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Could not read key file {}: {}", path.display(), e))
            })?;
            let key = content.trim().to_string();
            if !key.is_empty() {
                return Ok(key);
            }
            return Err(Error::Config(format!(
                "Key file {} is empty",
                path.display()
            )));
        }

        Err(Error::Config(format!(
            "No API key found: set {} or configure api.key_file",
            self.api.key_env
        )))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(Error::Config("api.endpoint cannot be empty".to_string()));
        }

        if self.api.key_env.trim().is_empty() && self.api.key_file.is_none() {
            return Err(Error::Config(
                "api.key_env cannot be empty unless api.key_file is set".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(Error::Config(
                "api.timeout_secs must be positive".to_string(),
            ));
        }

        if self.collect.backoff_secs == 0 {
            return Err(Error::Config(
                "collect.backoff_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.endpoint, "https://language.googleapis.com/");
        assert_eq!(config.api.key_env, "GOOGLE_API_KEY");
        assert_eq!(config.collect.backoff_secs, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.collect.output = "runs/batch1.csv".to_string();

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(loaded.collect.output, "runs/batch1.csv");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.collect.backoff_secs = 0;
        assert!(config.validate().is_err());

        config.collect.backoff_secs = 120;
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_from_key_file() {
        let tmp = TempDir::new().unwrap();
        let key_path = tmp.path().join("api-key.txt");
        std::fs::write(&key_path, "sekrit-key\n").unwrap();

        let mut config = Config::default();
        // Point at an env var that is certainly unset
        config.api.key_env = "TUBESENT_TEST_MISSING_KEY".to_string();
        config.api.key_file = Some(key_path);

        assert_eq!(config.api_key().unwrap(), "sekrit-key");
    }

    #[test]
    fn test_api_key_missing_everywhere() {
        let mut config = Config::default();
        config.api.key_env = "TUBESENT_TEST_MISSING_KEY2".to_string();
        config.api.key_file = None;

        assert!(config.api_key().is_err());
    }
}
