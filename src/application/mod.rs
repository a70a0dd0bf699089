//! Application layer - Use cases and port interfaces
//!
//! Contains the upload-then-poll workflow and the trait definitions
//! for the services it talks to.

pub mod ports;
pub mod transcribe;

// Re-export use cases
pub use transcribe::{
    AudioSource, TranscribeCallbacks, TranscribeError, TranscribeFileUseCase, TranscribeInput,
    TranscribeOutput,
};
