//! Transcript job state as observed through polling

use std::fmt;

use serde_json::Value;

use super::TranscriptId;

/// Status labels that mean the job is still running and should be polled again
pub const IN_PROGRESS_STATUSES: &[&str] = &["queued", "processing"];

/// State of a transcript job, keyed by its `status` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptState {
    Queued,
    Processing,
    Completed { text: String },
    Error { message: String },
    /// A status outside the known set. Treated as fatal by the poller.
    Unrecognized(String),
}

impl TranscriptState {
    /// The wire label of this state
    pub fn label(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed { .. } => "completed",
            Self::Error { .. } => "error",
            Self::Unrecognized(status) => status,
        }
    }

    /// True while the job should be polled again
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Queued | Self::Processing)
    }
}

impl fmt::Display for TranscriptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decoded poll response
#[derive(Debug, Clone)]
pub struct TranscriptSnapshot {
    pub state: TranscriptState,
    /// The full response document
    pub raw: Value,
}

/// A completed transcript
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: TranscriptId,
    pub text: String,
    /// The full completed response document
    pub raw: Value,
}
