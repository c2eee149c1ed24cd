//! Transcription port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Failed to read audio file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Transcription request failed: {0}")]
    RequestFailed(String),

    #[error("Transcription service error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse service response: {0}")]
    ParseError(String),

    #[error("Service response did not contain a transcript")]
    MissingText,
}

/// Port for audio transcription.
///
/// One attempt per call, no retry, no caching; repeated calls on the same
/// file are independent requests.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a closed, readable audio file to text.
    async fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionError>;
}
