//! Frame and AudioBuffer value objects

use super::format::CHUNK_SAMPLES;

/// One fixed-size chunk of mono i16 PCM samples produced by a single capture
/// read. Immutable after construction; has no identity beyond its position in
/// the owning buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    samples: Vec<i16>,
}

impl Frame {
    /// Create a Frame from captured samples
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Get the samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of samples in this frame
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the frame holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Ordered, append-only sequence of frames. Mutable only while one recording
/// is active; frozen by moving it out of the capture engine when the
/// recording stops.
#[derive(Debug, Clone, Default)]
pub struct AudioBuffer {
    frames: Vec<Frame>,
}

impl AudioBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Rebuild a buffer from a flat sample sequence, re-chunked into frames.
    /// The final frame may be shorter than a full chunk.
    pub fn from_samples(samples: &[i16]) -> Self {
        let frames = samples
            .chunks(CHUNK_SAMPLES)
            .map(|chunk| Frame::new(chunk.to_vec()))
            .collect();
        Self { frames }
    }

    /// Append a frame
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Frames in capture order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total number of samples across all frames
    pub fn sample_count(&self) -> usize {
        self.frames.iter().map(Frame::len).sum()
    }

    /// Whether any frames were captured
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Flatten into one contiguous sample sequence in frame order
    pub fn into_samples(self) -> Vec<i16> {
        let mut samples = Vec::with_capacity(self.sample_count());
        for frame in self.frames {
            samples.extend_from_slice(frame.samples());
        }
        samples
    }
}
