//! Transcription service adapters

mod assembly_ai;

pub use assembly_ai::AssemblyAiClient;
