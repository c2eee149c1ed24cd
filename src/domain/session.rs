//! Command-session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Terminated,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Command session entity.
/// Drives the interactive loop's lifecycle.
///
/// State machine:
///   IDLE -> RECORDING (begin_recording)
///   RECORDING -> IDLE (finish_recording)
///   IDLE -> TERMINATED (terminate)
#[derive(Debug, Default)]
pub struct CommandSession {
    state: SessionState,
}

impl CommandSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Check if the session has ended
    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Transition from IDLE to RECORDING
    pub fn begin_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin recording".to_string(),
            });
        }
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from RECORDING back to IDLE
    pub fn finish_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "finish recording".to_string(),
            });
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Transition from IDLE to TERMINATED
    pub fn terminate(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "terminate".to_string(),
            });
        }
        self.state = SessionState::Terminated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = CommandSession::new();
        assert!(session.is_idle());
        assert!(!session.is_recording());
        assert!(!session.is_terminated());
    }

    #[test]
    fn begin_recording_from_idle() {
        let mut session = CommandSession::new();
        assert!(session.begin_recording().is_ok());
        assert!(session.is_recording());
    }

    #[test]
    fn begin_recording_from_recording_fails() {
        let mut session = CommandSession::new();
        session.begin_recording().unwrap();

        let err = session.begin_recording().unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
        assert!(err.action.contains("begin recording"));
    }

    #[test]
    fn finish_recording_from_recording() {
        let mut session = CommandSession::new();
        session.begin_recording().unwrap();

        assert!(session.finish_recording().is_ok());
        assert!(session.is_idle());
    }

    #[test]
    fn finish_recording_from_idle_fails() {
        let mut session = CommandSession::new();

        let err = session.finish_recording().unwrap_err();
        assert_eq!(err.current_state, SessionState::Idle);
    }

    #[test]
    fn terminate_from_idle() {
        let mut session = CommandSession::new();
        assert!(session.terminate().is_ok());
        assert!(session.is_terminated());
    }

    #[test]
    fn terminate_while_recording_fails() {
        let mut session = CommandSession::new();
        session.begin_recording().unwrap();

        let err = session.terminate().unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
    }

    #[test]
    fn full_cycle() {
        let mut session = CommandSession::new();
        assert!(session.is_idle());

        session.begin_recording().unwrap();
        assert!(session.is_recording());

        session.finish_recording().unwrap();
        assert!(session.is_idle());

        // Another recording, then quit
        session.begin_recording().unwrap();
        session.finish_recording().unwrap();
        session.terminate().unwrap();
        assert!(session.is_terminated());
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Recording.to_string(), "recording");
        assert_eq!(SessionState::Terminated.to_string(), "terminated");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: SessionState::Recording,
            action: "terminate".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("terminate"));
        assert!(msg.contains("recording"));
    }
}
