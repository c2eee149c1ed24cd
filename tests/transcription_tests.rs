//! Transcription integration tests against a mock Whisper endpoint

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxclip::application::ports::{Transcriber, TranscriptionError};
use voxclip::infrastructure::WhisperTranscriber;

/// Write a minimal valid WAV file for upload
fn write_test_wav(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("test.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..1024 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    path
}

#[tokio::test]
async fn successful_transcription_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hello world"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audio = write_test_wav(&dir);

    let transcriber = WhisperTranscriber::with_base_url("test-key", server.uri());
    let text = transcriber.transcribe(&audio).await.unwrap();

    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn transcript_is_trimmed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "  hi there \n"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audio = write_test_wav(&dir);

    let transcriber = WhisperTranscriber::with_base_url("test-key", server.uri());
    let text = transcriber.transcribe(&audio).await.unwrap();

    assert_eq!(text, "hi there");
}

#[tokio::test]
async fn whitespace_only_transcript_is_missing_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "   \n"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audio = write_test_wav(&dir);

    let transcriber = WhisperTranscriber::with_base_url("test-key", server.uri());
    let err = transcriber.transcribe(&audio).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::MissingText));
}

#[tokio::test]
async fn response_without_text_field_is_missing_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"language": "en"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audio = write_test_wav(&dir);

    let transcriber = WhisperTranscriber::with_base_url("test-key", server.uri());
    let err = transcriber.transcribe(&audio).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::MissingText));
}

#[tokio::test]
async fn api_error_carries_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audio = write_test_wav(&dir);

    let transcriber = WhisperTranscriber::with_base_url("bad-key", server.uri());
    let err = transcriber.transcribe(&audio).await.unwrap_err();

    match err {
        TranscriptionError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn repeated_calls_send_independent_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "again"})))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audio = write_test_wav(&dir);

    let transcriber = WhisperTranscriber::with_base_url("test-key", server.uri());
    transcriber.transcribe(&audio).await.unwrap();
    transcriber.transcribe(&audio).await.unwrap();
}

#[tokio::test]
async fn unreadable_file_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "never"})))
        .expect(0)
        .mount(&server)
        .await;

    let transcriber = WhisperTranscriber::with_base_url("test-key", server.uri());
    let err = transcriber
        .transcribe(std::path::Path::new("/nonexistent/audio.wav"))
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionError::FileRead { .. }));
}
