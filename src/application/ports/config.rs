//! Config store port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persistent configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the config, returning an empty config if none exists
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save the config, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Path to the config file
    fn path(&self) -> PathBuf;

    /// Whether the config file exists
    fn exists(&self) -> bool;

    /// Create the config file with defaults; errors if it already exists
    async fn init(&self) -> Result<(), ConfigError>;
}
