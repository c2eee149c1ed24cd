//! Voxclip - push-to-talk voice transcription for the terminal
//!
//! This crate provides the core functionality for recording audio from the
//! microphone on a single keystroke, transcribing it with the OpenAI Whisper
//! API, and copying the transcript to the system clipboard.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the command-session state machine, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, hound, Whisper API, clipboard, termios)
//! - **CLI**: Command-line interface, argument parsing, and the interactive loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
