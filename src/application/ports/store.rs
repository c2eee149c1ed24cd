//! Audio persistence port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::AudioBuffer;

/// Persistence errors
#[derive(Debug, Clone, Error)]
pub enum PersistError {
    #[error("Failed to write audio file: {0}")]
    WriteFailed(String),
}

/// Port for serializing a frozen buffer into an on-disk audio container
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Write the buffer to a new file and return its path.
    /// The file is fully written and closed before this returns.
    async fn save(&self, buffer: &AudioBuffer) -> Result<PathBuf, PersistError>;
}
