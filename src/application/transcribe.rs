//! Transcribe file use case

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::polling::{Duration, PollPolicy};
use crate::domain::transcript::{AudioUrl, Transcript, TranscriptId, TranscriptState};

use super::ports::{ApiError, Clock, MediaUploader, TranscriptService};

/// Errors from the transcribe use case
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Upload failed: {0}")]
    Upload(#[source] ApiError),

    #[error("Transcript request failed: {0}")]
    Submit(#[source] ApiError),

    #[error("Status check failed: {0}")]
    Poll(#[source] ApiError),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Unrecognized transcript status: \"{0}\"")]
    UnrecognizedStatus(String),

    #[error("Transcript not ready after {attempts} status checks")]
    AttemptsExhausted { attempts: u32 },

    #[error("Timed out after {0}")]
    DeadlineExceeded(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("Missing API key. Set ASSEMBLY_AI_API_KEY or configure via 'assembly-transcribe config set api_key <key>'")]
    MissingApiKey,
}

/// Where the audio to transcribe comes from
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Local file, uploaded before the job is created
    File(PathBuf),
    /// Media the service can already fetch; the upload step is skipped
    Url(AudioUrl),
}

/// Input parameters for the transcribe use case
#[derive(Debug, Clone)]
pub struct TranscribeInput {
    pub source: AudioSource,
    pub policy: PollPolicy,
}

/// Output from the transcribe use case
#[derive(Debug, Clone)]
pub struct TranscribeOutput {
    /// The completed transcript
    pub transcript: Transcript,
    /// URL the job was created for
    pub audio_url: AudioUrl,
    /// Number of status checks made
    pub polls: u32,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct TranscribeCallbacks {
    /// Called before the file upload starts
    pub on_upload_start: Option<Box<dyn Fn(&Path) + Send + Sync>>,
    /// Called with the URL returned by the upload
    pub on_upload_end: Option<Box<dyn Fn(&AudioUrl) + Send + Sync>>,
    /// Called once the transcript job exists
    pub on_submitted: Option<Box<dyn Fn(&TranscriptId) + Send + Sync>>,
    /// Called after each status check with (attempt, state)
    pub on_poll: Option<Box<dyn Fn(u32, &TranscriptState) + Send + Sync>>,
}

/// Point in time after which the workflow gives up
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

/// Upload-then-poll transcription use case
pub struct TranscribeFileUseCase<U, T, C>
where
    U: MediaUploader,
    T: TranscriptService,
    C: Clock,
{
    uploader: U,
    transcripts: T,
    clock: C,
    cancel: CancellationToken,
}

impl<U, T, C> TranscribeFileUseCase<U, T, C>
where
    U: MediaUploader,
    T: TranscriptService,
    C: Clock,
{
    /// Create a new use case instance
    pub fn new(uploader: U, transcripts: T, clock: C) -> Self {
        Self {
            uploader,
            transcripts,
            clock,
            cancel: CancellationToken::new(),
        }
    }

    /// Get the cancellation token for external signal handling
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abort the workflow, including any in-flight request
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Execute the full workflow: upload (for local files), submit, poll.
    pub async fn execute(
        &self,
        input: TranscribeInput,
        callbacks: TranscribeCallbacks,
    ) -> Result<TranscribeOutput, TranscribeError> {
        let deadline = input.policy.timeout().map(|timeout| Deadline {
            at: self.clock.now() + timeout.as_std(),
            timeout,
        });

        let audio_url = match input.source {
            AudioSource::File(path) => {
                if let Some(ref cb) = callbacks.on_upload_start {
                    cb(&path);
                }
                let url = self.upload_within(&path, deadline).await?;
                if let Some(ref cb) = callbacks.on_upload_end {
                    cb(&url);
                }
                url
            }
            AudioSource::Url(url) => url,
        };

        let (transcript, polls) = self
            .request_within(&audio_url, &input.policy, &callbacks, deadline)
            .await?;

        Ok(TranscribeOutput {
            transcript,
            audio_url,
            polls,
        })
    }

    /// Upload a local file and return its service URL.
    pub async fn upload(&self, path: &Path) -> Result<AudioUrl, TranscribeError> {
        self.upload_within(path, None).await
    }

    /// Create a transcript job for `audio_url` and poll it to a terminal state.
    pub async fn request_transcript(
        &self,
        audio_url: &AudioUrl,
        policy: PollPolicy,
    ) -> Result<Transcript, TranscribeError> {
        let deadline = policy.timeout().map(|timeout| Deadline {
            at: self.clock.now() + timeout.as_std(),
            timeout,
        });
        let callbacks = TranscribeCallbacks::default();

        self.request_within(audio_url, &policy, &callbacks, deadline)
            .await
            .map(|(transcript, _)| transcript)
    }

    async fn upload_within(
        &self,
        path: &Path,
        deadline: Option<Deadline>,
    ) -> Result<AudioUrl, TranscribeError> {
        debug!("Uploading {}", path.display());
        let url = self
            .guard(deadline, self.uploader.upload(path))
            .await?
            .map_err(TranscribeError::Upload)?;
        info!("Uploaded {} to {}", path.display(), url);
        Ok(url)
    }

    async fn request_within(
        &self,
        audio_url: &AudioUrl,
        policy: &PollPolicy,
        callbacks: &TranscribeCallbacks,
        deadline: Option<Deadline>,
    ) -> Result<(Transcript, u32), TranscribeError> {
        let id = self
            .guard(deadline, self.transcripts.submit(audio_url))
            .await?
            .map_err(TranscribeError::Submit)?;
        info!("Created transcript {}", id);

        if let Some(ref cb) = callbacks.on_submitted {
            cb(&id);
        }

        let mut polls: u32 = 0;
        loop {
            let snapshot = self
                .guard(deadline, self.transcripts.fetch(&id))
                .await?
                .map_err(TranscribeError::Poll)?;
            polls += 1;
            debug!("Transcript {} is {} (check {})", id, snapshot.state, polls);

            if let Some(ref cb) = callbacks.on_poll {
                cb(polls, &snapshot.state);
            }

            match snapshot.state {
                TranscriptState::Completed { text } => {
                    info!("Transcript {} completed after {} checks", id, polls);
                    let transcript = Transcript {
                        id,
                        text,
                        raw: snapshot.raw,
                    };
                    return Ok((transcript, polls));
                }
                TranscriptState::Error { message } => {
                    return Err(TranscribeError::Transcription(message));
                }
                TranscriptState::Unrecognized(status) => {
                    return Err(TranscribeError::UnrecognizedStatus(status));
                }
                TranscriptState::Queued | TranscriptState::Processing => {}
            }

            if !policy.allows_another(polls) {
                return Err(TranscribeError::AttemptsExhausted { attempts: polls });
            }

            self.guard(deadline, self.clock.sleep(policy.interval().as_std()))
                .await?;
        }
    }

    /// Run `fut` unless the workflow is cancelled or the deadline passes first.
    async fn guard<F, O>(&self, deadline: Option<Deadline>, fut: F) -> Result<O, TranscribeError>
    where
        F: Future<Output = O>,
    {
        let remaining = match deadline {
            Some(d) => {
                let left = d.at.saturating_duration_since(self.clock.now());
                if left.is_zero() {
                    return Err(TranscribeError::DeadlineExceeded(d.timeout));
                }
                Some((left, d.timeout))
            }
            None => None,
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(TranscribeError::Cancelled),
            out = fut => Ok(out),
            timeout = self.expiry(remaining) => Err(TranscribeError::DeadlineExceeded(timeout)),
        }
    }

    /// Resolves once the remaining time has elapsed; never resolves without a deadline.
    async fn expiry(&self, remaining: Option<(std::time::Duration, Duration)>) -> Duration {
        match remaining {
            Some((left, timeout)) => {
                self.clock.sleep(left).await;
                timeout
            }
            None => std::future::pending().await,
        }
    }
}
