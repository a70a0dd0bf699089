//! AssemblyAI API adapter

use std::path::Path;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::application::ports::{ApiError, MediaUploader, TranscriptService};
use crate::domain::config::DEFAULT_BASE_URL;
use crate::domain::transcript::{
    ApiToken, AudioUrl, TranscriptId, TranscriptSnapshot, TranscriptState, IN_PROGRESS_STATUSES,
};

// Request types for AssemblyAI API

#[derive(Debug, Serialize)]
struct CreateTranscriptRequest<'a> {
    audio_url: &'a str,
}

// Response types for AssemblyAI API

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct CreateTranscriptResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Poll response body for the statuses this client knows about
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum StatusResponse {
    Queued,
    Processing,
    Completed { text: String },
    Error { error: String },
}

impl From<StatusResponse> for TranscriptState {
    fn from(response: StatusResponse) -> Self {
        match response {
            StatusResponse::Queued => Self::Queued,
            StatusResponse::Processing => Self::Processing,
            StatusResponse::Completed { text } => Self::Completed { text },
            StatusResponse::Error { error } => Self::Error { message: error },
        }
    }
}

/// AssemblyAI client implementing both the upload and transcript ports.
///
/// Owns its HTTP connection pool; create one per workflow run. Clones share
/// the pool.
#[derive(Clone)]
pub struct AssemblyAiClient {
    token: ApiToken,
    base_url: String,
    client: reqwest::Client,
}

impl AssemblyAiClient {
    /// Create a new client against the public AssemblyAI API
    pub fn new(token: ApiToken) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom API base URL
    pub fn with_base_url(token: ApiToken, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn upload_endpoint(&self) -> String {
        format!("{}/v2/upload", self.base_url)
    }

    fn transcript_endpoint(&self) -> String {
        format!("{}/v2/transcript", self.base_url)
    }

    fn status_endpoint(&self, id: &TranscriptId) -> String {
        format!("{}/v2/transcript/{}", self.base_url, id)
    }

    /// Pass successful responses through; turn anything else into `HttpStatus`
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
            .map(|body| body.error);

        Err(ApiError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
        })
    }

    /// Decode a poll response into a typed state.
    ///
    /// Statuses outside the known set are reported as `Unrecognized`
    /// instead of failing to decode.
    fn decode_snapshot(raw: Value) -> Result<TranscriptSnapshot, ApiError> {
        let status = raw
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Protocol("missing \"status\" field".to_string()))?;

        let known = IN_PROGRESS_STATUSES.contains(&status)
            || status == "completed"
            || status == "error";
        let state = if known {
            StatusResponse::deserialize(&raw)
                .map(TranscriptState::from)
                .map_err(|e| ApiError::Protocol(format!("\"{}\" response: {}", status, e)))?
        } else {
            TranscriptState::Unrecognized(status.to_string())
        };

        Ok(TranscriptSnapshot { state, raw })
    }
}

fn request_error(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Read a successful response body and decode it as `T`.
/// Decode failures keep serde's message, which names the missing field.
async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.bytes().await.map_err(request_error)?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Protocol(e.to_string()))
}

#[async_trait]
impl MediaUploader for AssemblyAiClient {
    async fn upload(&self, path: &Path) -> Result<AudioUrl, ApiError> {
        let file_error = |message: String| ApiError::File {
            path: path.to_path_buf(),
            message,
        };

        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| file_error(e.to_string()))?;
        let metadata = file.metadata().await.map_err(|e| file_error(e.to_string()))?;
        if !metadata.is_file() {
            return Err(file_error("not a regular file".to_string()));
        }

        debug!("POST {} ({} bytes)", self.upload_endpoint(), metadata.len());

        let response = self
            .client
            .post(self.upload_endpoint())
            .header(AUTHORIZATION, self.token.expose())
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, metadata.len())
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(request_error)?;

        let response: UploadResponse = decode_body(Self::ensure_success(response).await?).await?;

        Ok(AudioUrl::new(response.upload_url))
    }
}

#[async_trait]
impl TranscriptService for AssemblyAiClient {
    async fn submit(&self, audio_url: &AudioUrl) -> Result<TranscriptId, ApiError> {
        debug!("POST {} for {}", self.transcript_endpoint(), audio_url);

        let response = self
            .client
            .post(self.transcript_endpoint())
            .header(AUTHORIZATION, self.token.expose())
            .json(&CreateTranscriptRequest {
                audio_url: audio_url.as_str(),
            })
            .send()
            .await
            .map_err(request_error)?;

        let response: CreateTranscriptResponse =
            decode_body(Self::ensure_success(response).await?).await?;

        Ok(TranscriptId::new(response.id))
    }

    async fn fetch(&self, id: &TranscriptId) -> Result<TranscriptSnapshot, ApiError> {
        let url = self.status_endpoint(id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.token.expose())
            .send()
            .await
            .map_err(request_error)?;

        let raw: Value = decode_body(Self::ensure_success(response).await?).await?;

        Self::decode_snapshot(raw)
    }
}
