use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{BackendKind, Config};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `<config_dir>/bookshelf/config.toml`, falling back to the current
    /// directory if the platform has no config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("bookshelf").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Config::default()`. An existing file must
    /// parse as TOML and pass [`Config::validate`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - page size is positive
    /// - storage key is non-empty
    /// - remote base URL is an http(s) URL when the remote backend is active
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "view.page_size must be greater than zero".to_string(),
            });
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "storage.key must not be empty".to_string(),
            });
        }

        if self.storage.backend == BackendKind::Remote {
            let url = self.remote.base_url.trim();
            if url.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "remote.base_url must be set for the remote backend".to_string(),
                });
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    message: format!("remote.base_url '{}' is not an http(s) URL", url),
                });
            }
        }

        Ok(())
    }
}
