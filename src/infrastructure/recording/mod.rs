//! Recording adapters: cpal microphone capture and WAV persistence

pub mod cpal_recorder;
pub mod wav;

pub use cpal_recorder::CpalRecorder;
pub use wav::{write_wav, WavStore};
