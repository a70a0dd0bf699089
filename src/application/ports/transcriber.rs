//! Transcription service port interfaces

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcript::{AudioUrl, TranscriptId, TranscriptSnapshot};

/// Errors raised by a transcription service adapter
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Cannot read {}: {message}", .path.display())]
    File { path: PathBuf, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status} {reason}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    HttpStatus {
        status: u16,
        reason: String,
        /// Error message from the response body, when it carries one
        message: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Protocol(String),
}

impl ApiError {
    /// The HTTP status code, if the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for uploading local media to the transcription service
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload a local file and return the URL the service can fetch it from.
    ///
    /// The file is opened before any request is made, so a missing file
    /// fails with [`ApiError::File`] without touching the network.
    async fn upload(&self, path: &Path) -> Result<AudioUrl, ApiError>;
}

/// Port for creating and observing transcript jobs
#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// Create a transcript job for the given audio URL.
    async fn submit(&self, audio_url: &AudioUrl) -> Result<TranscriptId, ApiError>;

    /// Fetch the current state of a transcript job.
    async fn fetch(&self, id: &TranscriptId) -> Result<TranscriptSnapshot, ApiError>;
}
