//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod polling;
pub mod transcript;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use polling::{Duration, MaxAttempts, PollPolicy};
pub use transcript::{
    ApiToken, AudioUrl, Transcript, TranscriptId, TranscriptSnapshot, TranscriptState,
};
