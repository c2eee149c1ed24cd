//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// voxclip - voice capture and transcription to the clipboard
#[derive(Parser, Debug)]
#[command(name = "voxclip")]
#[command(version)]
#[command(about = "Record speech, transcribe it, and copy the transcript to the clipboard")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Transcribe an existing audio file instead of recording
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Max recording duration (e.g., 30s, 13m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Directory recordings are written to (defaults to the OS temp dir)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Show the effective configuration
    Show,
    /// Show config file path
    Path,
}
