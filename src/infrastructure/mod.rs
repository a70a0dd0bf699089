//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the AssemblyAI API, the tokio timer and the config file.

pub mod clock;
pub mod config;
pub mod transcription;

// Re-export adapters
pub use clock::TokioClock;
pub use config::XdgConfigStore;
pub use transcription::AssemblyAiClient;
