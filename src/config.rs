//! Configuration management for the Gatehouse register

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file holding the visitor register
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Visitors shown per table page
    pub per_page: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix GATEHOUSE_)
            .add_source(
                Environment::with_prefix("GATEHOUSE")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override register path from VISITORS_FILE env var if present
            .set_override_option("storage.path", env::var("VISITORS_FILE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/visitors.json"),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { per_page: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
