//! OpenAI Whisper API transcriber adapter

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};

/// Whisper API model to use
const DEFAULT_MODEL: &str = "whisper-1";

/// OpenAI API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// Response types for the transcriptions endpoint

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Whisper API transcriber
pub struct WhisperTranscriber {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new Whisper transcriber against a custom endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the transcriptions endpoint URL
    fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    /// Build the multipart form carrying the audio payload
    fn build_form(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<multipart::Form, TranscriptionError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        Ok(multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone()))
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionError> {
        let bytes = tokio::fs::read(audio)
            .await
            .map_err(|e| TranscriptionError::FileRead {
                path: audio.display().to_string(),
                reason: e.to_string(),
            })?;

        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .multipart(self.build_form(file_name, bytes)?)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);

            return Err(TranscriptionError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let response: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let text = response.text.ok_or(TranscriptionError::MissingText)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::MissingText);
        }

        Ok(trimmed.to_string())
    }
}
