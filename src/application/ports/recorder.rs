//! Recording port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::application::capture::StopReason;
use crate::domain::recording::{AudioBuffer, Duration};

/// Capture errors. Fatal to the current recording only; the device is
/// released before any of these propagate.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("No audio input device available")]
    NoDevice,

    #[error("Failed to open audio stream: {0}")]
    OpenFailed(String),

    #[error("Failed to read from audio stream: {0}")]
    ReadFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// Progress callback type for reporting recording progress.
/// Parameters: (elapsed_secs, max_secs)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Callbacks for recording status updates
#[derive(Default)]
pub struct CaptureCallbacks {
    /// Called roughly once per second with (elapsed_secs, max_secs)
    pub on_progress: Option<ProgressCallback>,
    /// Called exactly once when remaining time crosses the warning
    /// threshold, with the remaining seconds
    pub on_warning: Option<Box<dyn Fn(u64) + Send + Sync>>,
}

/// Result of one completed recording
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    /// The frozen frame sequence, normalized to the fixed capture format
    pub buffer: AudioBuffer,
    /// Why the recording stopped
    pub reason: StopReason,
}

/// Port for one stop-signal-bounded recording
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Record until the user stop signal or the duration ceiling.
    ///
    /// # Arguments
    /// * `max_duration` - Hard ceiling on recording length
    /// * `callbacks` - Status callbacks for progress and the warning
    ///
    /// # Returns
    /// The frozen buffer and the stop reason, or an error
    async fn record(
        &self,
        max_duration: Duration,
        callbacks: CaptureCallbacks,
    ) -> Result<CaptureOutcome, CaptureError>;
}
