//! Domain error types

use std::path::PathBuf;

use thiserror::Error;

/// A time string that is not a positive sum of `ms`, `s` and `m` parts
#[derive(Debug, Clone, Error)]
#[error("\"{input}\" is not a valid duration; use whole numbers with ms, s or m units, optionally combined (e.g. 500ms, 3s, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a poll attempt limit is not a positive integer
#[derive(Debug, Clone, Error)]
#[error("Invalid max attempts: \"{input}\". Expected a positive integer")]
pub struct MaxAttemptsParseError {
    pub input: String,
}

/// Failure reading, writing or validating the config file
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Malformed config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Cannot write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Config file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
}
