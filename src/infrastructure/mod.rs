//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, hound, the Whisper API, the clipboard, and the
//! terminal.

pub mod clipboard;
pub mod config;
pub mod input;
pub mod recording;
pub mod transcription;

// Re-export adapters
pub use clipboard::SystemClipboard;
pub use config::TomlConfigStore;
pub use input::TermiosCommandReader;
pub use recording::{CpalRecorder, WavStore};
pub use transcription::WhisperTranscriber;
