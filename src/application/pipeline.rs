//! Record-transcribe-publish use case

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::application::capture::StopReason;
use crate::domain::recording::Duration;

use super::ports::{
    AudioStore, CaptureCallbacks, CaptureError, Clipboard, PersistError, Recorder, Transcriber,
    TranscriptionError,
};

/// Errors from the transcription pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Recording failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Saving audio failed: {0}")]
    Persist(#[from] PersistError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}

/// Output from one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The transcript
    pub text: String,
    /// Path of the audio file that produced the transcript. Recordings are
    /// deliberately left on disk after transcription.
    pub audio_path: PathBuf,
    /// Why the recording stopped (None in one-shot mode)
    pub stop_reason: Option<StopReason>,
    /// Whether the clipboard copy succeeded
    pub clipboard_copied: bool,
}

/// Composes recorder, persistence, transcriber, and clipboard.
///
/// Clipboard publication is best-effort: a failure is reported as a warning
/// and never fails the pipeline.
pub struct TranscribePipeline<R, S, T, C>
where
    R: Recorder,
    S: AudioStore,
    T: Transcriber,
    C: Clipboard,
{
    recorder: R,
    store: S,
    transcriber: T,
    clipboard: C,
}

impl<R, S, T, C> TranscribePipeline<R, S, T, C>
where
    R: Recorder,
    S: AudioStore,
    T: Transcriber,
    C: Clipboard,
{
    /// Create a new pipeline instance
    pub fn new(recorder: R, store: S, transcriber: T, clipboard: C) -> Self {
        Self {
            recorder,
            store,
            transcriber,
            clipboard,
        }
    }

    /// Record one session, persist it, transcribe it, and publish the
    /// transcript to the clipboard.
    pub async fn record_and_transcribe(
        &self,
        max_duration: Duration,
        callbacks: CaptureCallbacks,
    ) -> Result<PipelineOutput, PipelineError> {
        let outcome = self.recorder.record(max_duration, callbacks).await?;

        // The store closes the file before returning; the transcriber only
        // ever sees a finished container.
        let audio_path = self.store.save(&outcome.buffer).await?;

        let text = self.transcriber.transcribe(&audio_path).await?;
        let clipboard_copied = self.publish(&text).await;

        Ok(PipelineOutput {
            text,
            audio_path,
            stop_reason: Some(outcome.reason),
            clipboard_copied,
        })
    }

    /// Transcribe an existing audio file and publish the transcript.
    /// Never touches the recorder or the terminal.
    pub async fn transcribe_file(&self, path: &Path) -> Result<PipelineOutput, PipelineError> {
        let text = self.transcriber.transcribe(path).await?;
        let clipboard_copied = self.publish(&text).await;

        Ok(PipelineOutput {
            text,
            audio_path: path.to_path_buf(),
            stop_reason: None,
            clipboard_copied,
        })
    }

    async fn publish(&self, text: &str) -> bool {
        match self.clipboard.copy(text).await {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Warning: clipboard copy failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::capture::StopReason;
    use crate::application::ports::{CaptureOutcome, ClipboardError};
    use crate::domain::recording::{AudioBuffer, Frame};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockRecorder;

    #[async_trait]
    impl Recorder for MockRecorder {
        async fn record(
            &self,
            _max_duration: Duration,
            _callbacks: CaptureCallbacks,
        ) -> Result<CaptureOutcome, CaptureError> {
            let mut buffer = AudioBuffer::new();
            buffer.push(Frame::new(vec![0i16; 1024]));
            Ok(CaptureOutcome {
                buffer,
                reason: StopReason::UserRequested,
            })
        }
    }

    struct MockStore;

    #[async_trait]
    impl AudioStore for MockStore {
        async fn save(&self, _buffer: &AudioBuffer) -> Result<PathBuf, PersistError> {
            Ok(PathBuf::from("/tmp/test.wav"))
        }
    }

    struct MockTranscriber {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Transcriber for MockTranscriber {
        async fn transcribe(&self, _audio: &Path) -> Result<String, TranscriptionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("Test transcription".to_string())
        }
    }

    struct FailingTranscriber;

    #[async_trait]
    impl Transcriber for FailingTranscriber {
        async fn transcribe(&self, _audio: &Path) -> Result<String, TranscriptionError> {
            Err(TranscriptionError::MissingText)
        }
    }

    struct MockClipboard;

    #[async_trait]
    impl Clipboard for MockClipboard {
        async fn copy(&self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    struct BrokenClipboard;

    #[async_trait]
    impl Clipboard for BrokenClipboard {
        async fn copy(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }
    }

    #[tokio::test]
    async fn record_and_transcribe_returns_transcript() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = TranscribePipeline::new(
            MockRecorder,
            MockStore,
            MockTranscriber {
                calls: Arc::clone(&calls),
            },
            MockClipboard,
        );

        let output = pipeline
            .record_and_transcribe(Duration::default_max_duration(), CaptureCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.text, "Test transcription");
        assert_eq!(output.stop_reason, Some(StopReason::UserRequested));
        assert!(output.clipboard_copied);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clipboard_failure_is_not_fatal() {
        let pipeline = TranscribePipeline::new(
            MockRecorder,
            MockStore,
            MockTranscriber {
                calls: Arc::new(AtomicUsize::new(0)),
            },
            BrokenClipboard,
        );

        let output = pipeline
            .record_and_transcribe(Duration::default_max_duration(), CaptureCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.text, "Test transcription");
        assert!(!output.clipboard_copied);
    }

    #[tokio::test]
    async fn transcription_error_propagates() {
        let pipeline =
            TranscribePipeline::new(MockRecorder, MockStore, FailingTranscriber, MockClipboard);

        let err = pipeline
            .record_and_transcribe(Duration::default_max_duration(), CaptureCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Transcription(_)));
    }

    #[tokio::test]
    async fn transcribe_file_skips_recorder() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = TranscribePipeline::new(
            MockRecorder,
            MockStore,
            MockTranscriber {
                calls: Arc::clone(&calls),
            },
            MockClipboard,
        );

        let output = pipeline
            .transcribe_file(Path::new("/tmp/existing.wav"))
            .await
            .unwrap();

        assert_eq!(output.text, "Test transcription");
        assert_eq!(output.audio_path, PathBuf::from("/tmp/existing.wav"));
        assert!(output.stop_reason.is_none());
    }

    #[tokio::test]
    async fn repeated_calls_are_independent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = TranscribePipeline::new(
            MockRecorder,
            MockStore,
            MockTranscriber {
                calls: Arc::clone(&calls),
            },
            MockClipboard,
        );

        let path = Path::new("/tmp/existing.wav");
        pipeline.transcribe_file(path).await.unwrap();
        pipeline.transcribe_file(path).await.unwrap();

        // No caching: two calls, two transcription requests
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
