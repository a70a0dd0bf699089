//! XDG config store adapter

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Directory name under the user config dir
const APP_DIR: &str = "assembly-transcribe";
const FILE_NAME: &str = "config.toml";

/// TOML file under `$XDG_CONFIG_HOME/assembly-transcribe/`
#[derive(Debug, Clone)]
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        Self::with_path(base.join(APP_DIR).join(FILE_NAME))
    }

    /// Store backed by an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn write_error(&self, e: impl ToString) -> ConfigError {
        ConfigError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn decode(&self, content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => self.decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::Read {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config).map_err(|e| self.write_error(e))?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        // Write beside the target and swap in, so readers never see half a file
        let staged = self.path.with_extension("toml.tmp");
        fs::write(&staged, content)
            .await
            .map_err(|e| self.write_error(e))?;
        fs::rename(&staged, &self.path)
            .await
            .map_err(|e| self.write_error(e))
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.path.clone()));
        }
        self.save(&AppConfig::defaults()).await
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
