//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod input;
pub mod recorder;
pub mod store;
pub mod transcriber;

// Re-export common types
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use input::{CommandReader, InputError};
pub use recorder::{CaptureCallbacks, CaptureError, CaptureOutcome, ProgressCallback, Recorder};
pub use store::{AudioStore, PersistError};
pub use transcriber::{Transcriber, TranscriptionError};
