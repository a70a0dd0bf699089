//! AssemblyTranscribe - speech-to-text CLI for the AssemblyAI API
//!
//! This crate uploads a local audio or video file (or takes a public media
//! URL), requests a transcript, and polls until the transcription finishes.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, transcript states, poll policy, and errors
//! - **Application**: The transcribe use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (AssemblyAI HTTP, clock, config file)
//! - **CLI**: Command-line interface, argument parsing, logging, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
