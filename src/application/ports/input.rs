//! Terminal command input port interface

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use thiserror::Error;

/// Terminal input errors. Both variants mean the terminal can no longer be
/// trusted and are fatal to the command loop.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    #[error("Failed to query or restore terminal attributes: {0}")]
    TerminalState(String),

    #[error("Failed to read from terminal: {0}")]
    ReadFailed(String),
}

/// Port for timeout-bounded single-character command input
#[async_trait]
pub trait CommandReader: Send + Sync {
    /// Read exactly one character in raw (unbuffered, unechoed) mode.
    ///
    /// Returns `None` if no input arrived within `timeout`; this is a normal
    /// outcome, not a failure. The terminal mode is restored on every exit
    /// path.
    async fn read_command(&self, timeout: StdDuration) -> Result<Option<char>, InputError>;
}
