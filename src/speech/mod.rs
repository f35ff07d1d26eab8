pub mod azure;

pub use azure::AzureSpeechClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the external speech-to-text API
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Speech API not configured")]
    NotConfigured,

    #[error("Unexpected speech API response: {0}")]
    Protocol(String),
}

/// Observed state of a batch transcription job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Still queued or running upstream; poll again later
    Running,
    /// Finished; `files_url` points at the result file listing when present
    Succeeded { files_url: Option<String> },
    Failed { message: String },
}

/// Client for an external batch speech-to-text API.
///
/// A trait so handlers depend on the capability, not the vendor: production
/// uses [`AzureSpeechClient`], tests substitute stubs. Each call is a single
/// round trip; the polling cadence belongs to the caller.
#[async_trait]
pub trait SpeechClient: Send + Sync {
    /// Submit a content URL for batch transcription, returning the job id
    async fn submit(&self, content_url: &str) -> Result<String, SpeechError>;

    /// Fetch the current status of a transcription job
    async fn status(&self, transcription_id: &str) -> Result<JobStatus, SpeechError>;

    /// Resolve the transcript text for a succeeded job's files URL
    async fn transcript(&self, files_url: &str) -> Result<String, SpeechError>;
}
