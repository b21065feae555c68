//! Configuration management for kinkeeper.
//!
//! Configuration loads through figment: defaults, then an optional TOML
//! file, then environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "kinkeeper";

/// Default store file name.
const STORE_FILE_NAME: &str = "keeper.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `KINKEEPER_`)
/// 2. TOML config file at `~/.config/kinkeeper/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Media attachment configuration.
    pub media: MediaConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the store database file.
    /// Defaults to `~/.local/share/kinkeeper/keeper.db`
    pub store_path: Option<PathBuf>,
}

/// Media attachment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Maximum photo payload size in bytes.
    pub max_photo_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            // Embedded payloads ride inside every save, so keep them small
            max_photo_bytes: 5 * 1024 * 1024,
        }
    }
}

impl KeeperConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(KeeperConfig::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("KINKEEPER_").split("_"));

        let config: KeeperConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.media.max_photo_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "max_photo_bytes must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Get the store path, resolving defaults if not set.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.storage
            .store_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(STORE_FILE_NAME))
    }
}
