//! Configuration port interface

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent home of the user's [`AppConfig`]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored config. Nothing stored yet reads as [`AppConfig::empty`].
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored config with `config`.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Store the defaults, refusing to clobber an existing file.
    async fn init(&self) -> Result<(), ConfigError>;

    fn path(&self) -> &Path;
}
