//! Recording domain - durations, the fixed capture format, frames and buffers

pub mod duration;
pub mod format;
pub mod frame;

pub use duration::Duration;
pub use frame::{AudioBuffer, Frame};
