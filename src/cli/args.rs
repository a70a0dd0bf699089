//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::AudioSource;
use crate::domain::polling::PollPolicy;
use crate::domain::transcript::ApiToken;

/// AssemblyTranscribe - upload a media file and print its transcript
#[derive(Parser, Debug)]
#[command(name = "assembly-transcribe")]
#[command(version)]
#[command(about = "Upload an audio or video file to AssemblyAI and print its transcription")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Local audio or video file to upload
    #[arg(value_name = "FILE", conflicts_with = "audio_url")]
    pub file: Option<PathBuf>,

    /// Transcribe media at a public URL instead of uploading a file
    #[arg(short = 'u', long, value_name = "URL")]
    pub audio_url: Option<String>,

    /// Pause between status checks (e.g., 500ms, 3s, 1m)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub poll_interval: Option<String>,

    /// Give up after this many status checks
    #[arg(short = 'm', long, value_name = "N")]
    pub max_attempts: Option<String>,

    /// Give up after this much time in total (e.g., 30s, 10m)
    #[arg(short = 't', long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// API base URL
    #[arg(long, value_name = "URL", env = "ASSEMBLY_AI_BASE_URL")]
    pub base_url: Option<String>,

    /// Print the full transcript JSON instead of the text
    #[arg(long)]
    pub json: bool,

    /// Log requests and status checks to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed transcribe options
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub source: AudioSource,
    pub policy: PollPolicy,
    pub base_url: String,
    pub api_token: Option<ApiToken>,
    pub json: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "base_url",
    "poll_interval",
    "max_attempts",
    "timeout",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
