//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging, Ctrl-C handling,
//! and the main application runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logger;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_transcribe, EXIT_CANCELLED, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, TranscribeOptions};
pub use presenter::Presenter;
