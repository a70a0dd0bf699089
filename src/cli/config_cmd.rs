//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::polling::{Duration, MaxAttempts};
use crate::domain::transcript::mask_api_key;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "api_key" => config.api_key = Some(value.to_string()),
        "base_url" => config.base_url = Some(value.trim_end_matches('/').to_string()),
        "poll_interval" => config.poll_interval = Some(value.to_string()),
        "timeout" => config.timeout = Some(value.to_string()),
        "max_attempts" => {
            let attempts = value
                .parse::<MaxAttempts>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
            config.max_attempts = Some(attempts.get());
        }
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;

    let shown = if key == "api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "api_key" => config.api_key.map(|s| mask_api_key(&s)),
        "base_url" => config.base_url,
        "poll_interval" => config.poll_interval,
        "max_attempts" => config.max_attempts.map(|n| n.to_string()),
        "timeout" => config.timeout,
        _ => unreachable!(),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "api_key",
        &config
            .api_key
            .map(|s| mask_api_key(&s))
            .unwrap_or_else(|| NOT_SET.to_string()),
    );
    presenter.key_value("base_url", config.base_url.as_deref().unwrap_or(NOT_SET));
    presenter.key_value(
        "poll_interval",
        config.poll_interval.as_deref().unwrap_or(NOT_SET),
    );
    presenter.key_value(
        "max_attempts",
        &config
            .max_attempts
            .map(|n| n.to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
    );
    presenter.key_value("timeout", config.timeout.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate a config value for the given key
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    match key {
        "api_key" if value.trim().is_empty() => Err(invalid("API key cannot be empty".to_string())),
        "base_url" if !(value.starts_with("http://") || value.starts_with("https://")) => Err(
            invalid("Value must start with http:// or https://".to_string()),
        ),
        "poll_interval" | "timeout" => value
            .parse::<Duration>()
            .map(|_| ())
            .map_err(|e| invalid(e.to_string())),
        "max_attempts" => value
            .parse::<MaxAttempts>()
            .map(|_| ())
            .map_err(|e| invalid(e.to_string())),
        _ => Ok(()),
    }
}
