//! Application configuration value object

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::domain::error::MaxAttemptsParseError;
use crate::domain::polling::{Duration, MaxAttempts};
use crate::domain::transcript::ApiToken;

/// Default AssemblyAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub poll_interval: Option<String>,
    pub max_attempts: Option<u32>,
    pub timeout: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            poll_interval: Some(Duration::default_poll_interval().to_string()),
            max_attempts: None,
            timeout: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            base_url: other.base_url.or(self.base_url),
            poll_interval: other.poll_interval.or(self.poll_interval),
            max_attempts: other.max_attempts.or(self.max_attempts),
            timeout: other.timeout.or(self.timeout),
        }
    }

    /// Get the API token, if a non-empty key is configured
    pub fn api_token(&self) -> Option<ApiToken> {
        self.api_key.clone().and_then(ApiToken::new)
    }

    /// Get the base URL without a trailing slash, or the default if not set
    pub fn base_url_or_default(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// Get the configured attempt limit; zero is rejected like on the command line
    pub fn max_attempts(&self) -> Result<Option<MaxAttempts>, MaxAttemptsParseError> {
        self.max_attempts
            .map(|n| {
                NonZeroU32::new(n)
                    .map(MaxAttempts::new)
                    .ok_or_else(|| MaxAttemptsParseError {
                        input: n.to_string(),
                    })
            })
            .transpose()
    }
}
