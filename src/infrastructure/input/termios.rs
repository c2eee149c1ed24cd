//! Raw-mode terminal input over stdin
//!
//! Two primitives built on termios + poll(2):
//! - a timeout-bounded single-character read in raw mode (command input)
//! - a zero-timeout blank-line check in the terminal's normal mode (the
//!   recording stop signal)

use std::io::{self, BufRead, Read};
use std::os::fd::AsFd;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg, Termios};

use crate::application::capture::StopPoll;
use crate::application::ports::{CommandReader, InputError};

/// Scoped raw-mode switch for stdin. The saved attributes are restored on
/// every exit path: explicitly through `restore`, or by `Drop` as a
/// backstop when an error unwinds past the guard.
pub struct RawModeGuard {
    saved: Termios,
    restored: bool,
}

impl RawModeGuard {
    /// Save the current terminal attributes and switch stdin to raw
    /// (unbuffered, unechoed) mode.
    pub fn enter() -> Result<Self, InputError> {
        let stdin = io::stdin();
        let saved = tcgetattr(stdin.as_fd())
            .map_err(|e| InputError::TerminalState(format!("tcgetattr: {}", e)))?;

        let mut raw = saved.clone();
        cfmakeraw(&mut raw);
        tcsetattr(stdin.as_fd(), SetArg::TCSADRAIN, &raw)
            .map_err(|e| InputError::TerminalState(format!("tcsetattr: {}", e)))?;

        Ok(Self {
            saved,
            restored: false,
        })
    }

    /// Restore the saved attributes. Failure means the terminal can no
    /// longer be trusted and is fatal to the caller.
    pub fn restore(mut self) -> Result<(), InputError> {
        self.restored = true;
        let stdin = io::stdin();
        tcsetattr(stdin.as_fd(), SetArg::TCSADRAIN, &self.saved)
            .map_err(|e| InputError::TerminalState(format!("tcsetattr restore: {}", e)))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.restored {
            let stdin = io::stdin();
            let _ = tcsetattr(stdin.as_fd(), SetArg::TCSADRAIN, &self.saved);
        }
    }
}

/// Read exactly one character from stdin in raw mode, waiting at most
/// `timeout` for input. `None` on timeout is a normal outcome.
pub fn read_char(timeout: StdDuration) -> Result<Option<char>, InputError> {
    let guard = RawModeGuard::enter()?;
    let result = read_char_raw(timeout);
    guard.restore()?;
    result
}

fn read_char_raw(timeout: StdDuration) -> Result<Option<char>, InputError> {
    let stdin = io::stdin();
    let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
    let poll_timeout = PollTimeout::try_from(timeout).unwrap_or(PollTimeout::MAX);

    let ready = poll(&mut fds, poll_timeout)
        .map_err(|e| InputError::ReadFailed(format!("poll: {}", e)))?;
    if ready == 0 {
        return Ok(None);
    }

    let mut byte = [0u8; 1];
    let n = stdin
        .lock()
        .read(&mut byte)
        .map_err(|e| InputError::ReadFailed(e.to_string()))?;

    if n == 0 {
        // EOF on stdin: report like a timeout so the caller keeps control
        Ok(None)
    } else {
        Ok(Some(byte[0] as char))
    }
}

/// Zero-timeout stop-signal check during a recording. The terminal is in
/// its normal line-buffered mode here, so a pending line is consumed whole;
/// only a blank line counts as the stop signal.
#[derive(Debug, Default)]
pub struct StdinStopPoll;

impl StdinStopPoll {
    pub fn new() -> Self {
        Self
    }
}

impl StopPoll for StdinStopPoll {
    fn stop_requested(&mut self) -> bool {
        let stdin = io::stdin();
        let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];

        match poll(&mut fds, PollTimeout::ZERO) {
            Ok(n) if n > 0 => {
                let mut line = String::new();
                match stdin.lock().read_line(&mut line) {
                    Ok(_) => line.trim().is_empty(),
                    Err(_) => false,
                }
            }
            _ => false,
        }
    }
}

/// CommandReader adapter: runs the blocking raw-mode read on the blocking
/// thread pool.
pub struct TermiosCommandReader;

impl TermiosCommandReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TermiosCommandReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandReader for TermiosCommandReader {
    async fn read_command(&self, timeout: StdDuration) -> Result<Option<char>, InputError> {
        tokio::task::spawn_blocking(move || read_char(timeout))
            .await
            .map_err(|e| InputError::ReadFailed(format!("Task join error: {}", e)))?
    }
}
