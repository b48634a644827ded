//! Configuration management
//!
//! Startup configuration for the conversion service: the two base
//! directories, the upload size limit, and the conversion timeout. Loaded
//! once at process start and immutable afterwards.

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory that receives uploaded files
    pub upload_dir: String,

    /// Directory that receives conversion output
    pub converted_dir: String,

    /// Maximum accepted upload size in MB
    pub max_file_size_mb: u64,

    /// Wall-clock budget for a single conversion
    pub conversion_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".to_string(),
            converted_dir: "converted".to_string(),
            max_file_size_mb: 25,
            conversion_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml (optional) with FILECONV_*
    /// environment overrides on top of the built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let settings = Config::builder()
            .set_default("upload_dir", defaults.upload_dir)?
            .set_default("converted_dir", defaults.converted_dir)?
            .set_default("max_file_size_mb", defaults.max_file_size_mb)?
            .set_default("conversion_timeout_secs", defaults.conversion_timeout_secs)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FILECONV"))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.upload_dir.is_empty() {
            return Err(ConfigError::Message("upload_dir cannot be empty".into()));
        }

        if self.converted_dir.is_empty() {
            return Err(ConfigError::Message("converted_dir cannot be empty".into()));
        }

        if self.upload_dir == self.converted_dir {
            return Err(ConfigError::Message(
                "upload_dir and converted_dir must be different directories".into(),
            ));
        }

        if self.max_file_size_mb == 0 {
            return Err(ConfigError::Message(
                "max_file_size_mb must be greater than 0".into(),
            ));
        }

        if self.conversion_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "conversion_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get the upload directory as PathBuf
    pub fn upload_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.upload_dir)
    }

    /// Get the converted-output directory as PathBuf
    pub fn converted_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.converted_dir)
    }

    /// Get maximum upload size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Get the conversion timeout as Duration
    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_secs(self.conversion_timeout_secs)
    }

    /// Create both base directories if they do not exist yet
    pub fn ensure_directories(&self) -> io::Result<()> {
        fs::create_dir_all(self.upload_dir_path())?;
        fs::create_dir_all(self.converted_dir_path())
    }
}
