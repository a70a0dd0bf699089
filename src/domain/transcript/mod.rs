//! Transcript domain module

mod credential;
mod identifiers;
mod state;

pub use credential::{mask_api_key, ApiToken};
pub use identifiers::{AudioUrl, TranscriptId};
pub use state::{Transcript, TranscriptSnapshot, TranscriptState, IN_PROGRESS_STATUSES};
