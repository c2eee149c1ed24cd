//! Capture tick engine
//!
//! Pure single-threaded recording loop logic, driven one tick at a time with
//! an explicit elapsed value. The driver owns the device stream and the
//! clock; this engine owns the buffer and the stop/warning decisions, which
//! makes the ordering rules testable without a microphone.

use std::time::Duration as StdDuration;

use crate::application::ports::CaptureError;
use crate::domain::recording::{AudioBuffer, Duration, Frame};

/// Why a recording stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The hard duration ceiling was reached
    MaxDuration,
    /// The user sent the stop signal (blank line / Enter)
    UserRequested,
}

/// Source of one capture chunk per read. Implementations own the device
/// stream; dropping the source releases the device.
pub trait ChunkSource {
    /// Read one chunk from the stream. Blocks for at most roughly one
    /// chunk's worth of audio time.
    fn read_chunk(&mut self) -> Result<Frame, CaptureError>;
}

/// Zero-timeout readiness check for the user stop signal
pub trait StopPoll {
    /// Whether a stop signal (blank line) is pending. Must not block.
    fn stop_requested(&mut self) -> bool;
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The warning threshold was crossed on this tick (fires at most once
    /// per recording)
    pub warned: bool,
    /// Set when the recording stopped on this tick; no chunk was read
    pub stopped: Option<StopReason>,
}

/// One recording's loop state: elapsed-time checks, the single warning, and
/// the append-only buffer.
pub struct CaptureEngine {
    max_duration: StdDuration,
    warning_time: StdDuration,
    warning_shown: bool,
    buffer: AudioBuffer,
}

impl CaptureEngine {
    /// Create an engine for one recording
    pub fn new(max_duration: Duration, warning_time: Duration) -> Self {
        Self {
            max_duration: max_duration.as_std(),
            warning_time: warning_time.as_std(),
            warning_shown: false,
            buffer: AudioBuffer::new(),
        }
    }

    /// Run one iteration of the capture loop.
    ///
    /// Check order is load-bearing: the forced stop at the ceiling is
    /// evaluated before the user-stop poll, so a ceiling hit wins over a
    /// stop signal arriving in the same iteration.
    pub fn tick<S, P>(
        &mut self,
        elapsed: StdDuration,
        source: &mut S,
        stop: &mut P,
    ) -> Result<TickOutcome, CaptureError>
    where
        S: ChunkSource,
        P: StopPoll,
    {
        if elapsed >= self.max_duration {
            return Ok(TickOutcome {
                warned: false,
                stopped: Some(StopReason::MaxDuration),
            });
        }

        let mut warned = false;
        if !self.warning_shown && self.max_duration - elapsed <= self.warning_time {
            self.warning_shown = true;
            warned = true;
        }

        if stop.stop_requested() {
            return Ok(TickOutcome {
                warned,
                stopped: Some(StopReason::UserRequested),
            });
        }

        let frame = source.read_chunk()?;
        self.buffer.push(frame);

        Ok(TickOutcome {
            warned,
            stopped: None,
        })
    }

    /// Whether the warning has fired for this recording
    pub fn warning_shown(&self) -> bool {
        self.warning_shown
    }

    /// Number of frames captured so far
    pub fn frame_count(&self) -> usize {
        self.buffer.frame_count()
    }

    /// Freeze and take the buffer. A zero-frame buffer is a valid result.
    pub fn into_buffer(self) -> AudioBuffer {
        self.buffer
    }
}
