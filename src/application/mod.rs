//! Application layer - use cases and port interfaces

pub mod capture;
pub mod pipeline;
pub mod ports;

pub use capture::{CaptureEngine, ChunkSource, StopPoll, StopReason, TickOutcome};
pub use pipeline::{PipelineError, PipelineOutput, TranscribePipeline};
