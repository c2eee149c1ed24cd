//! Fixed capture format shared by the engine, the WAV writer, and the
//! transcription client's MIME declaration. These must never diverge.

use std::time::Duration as StdDuration;

/// Sample rate optimized for speech recognition
pub const SAMPLE_RATE: u32 = 16_000;

/// Mono capture
pub const CHANNELS: u16 = 1;

/// 16-bit signed PCM
pub const BITS_PER_SAMPLE: u16 = 16;

/// Samples per capture read
pub const CHUNK_SAMPLES: usize = 1024;

/// Wall-clock time covered by one chunk at the given sample rate
pub fn chunk_duration(sample_rate: u32) -> StdDuration {
    StdDuration::from_secs_f64(CHUNK_SAMPLES as f64 / sample_rate as f64)
}
