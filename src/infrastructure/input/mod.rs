//! Terminal input adapters

pub mod termios;

pub use termios::{read_char, RawModeGuard, StdinStopPoll, TermiosCommandReader};
