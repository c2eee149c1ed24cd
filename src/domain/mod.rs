//! Domain layer - value objects, the session state machine, and errors

pub mod config;
pub mod error;
pub mod recording;
pub mod session;

pub use session::{CommandSession, SessionState};
