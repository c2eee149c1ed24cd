//! Application runners for one-shot and interactive modes

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use crate::application::capture::StopReason;
use crate::application::ports::{CaptureCallbacks, CommandReader, ConfigStore};
use crate::application::TranscribePipeline;
use crate::domain::config::AppConfig;
use crate::domain::recording::Duration;
use crate::domain::CommandSession;
use crate::infrastructure::{
    CpalRecorder, SystemClipboard, TermiosCommandReader, TomlConfigStore, WavStore,
    WhisperTranscriber,
};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long one command read may wait before the loop re-polls.
/// Effectively "wait forever" while still bounding every single read.
const COMMAND_TIMEOUT: StdDuration = StdDuration::from_secs(7 * 24 * 60 * 60);

/// Ctrl-C arrives as a raw byte in raw mode; treat it like quit
const CTRL_C: char = '\u{3}';

type AppPipeline = TranscribePipeline<CpalRecorder, WavStore, WhisperTranscriber, SystemClipboard>;

fn build_pipeline(api_key: String, config: &AppConfig) -> AppPipeline {
    TranscribePipeline::new(
        CpalRecorder::new(),
        WavStore::new(config.output_dir_or_temp()),
        WhisperTranscriber::new(api_key),
        SystemClipboard::new(),
    )
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Result<String, String> {
    // Check environment first
    if let Ok(key) = env::var("OPENAI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    // Check config file
    let store = TomlConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    config.api_key.ok_or_else(|| {
        "Missing API key. Set OPENAI_API_KEY or add api_key to the config file (see 'voxclip config init')"
            .to_string()
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = TomlConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Transcribe an existing audio file and exit
pub async fn run_oneshot(file: &Path, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let pipeline = build_pipeline(api_key, config);

    presenter.start_spinner("Transcribing...");
    match pipeline.transcribe_file(file).await {
        Ok(output) => {
            presenter.spinner_success("Transcription complete");
            presenter.output(&output.text);
            if output.clipboard_copied {
                presenter.info("Copied to clipboard");
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Transcription failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the interactive command loop: one key per iteration, recordings
/// triggered by 's', terminated by 'q'.
pub async fn run_interactive(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    // Missing credential is fatal before the loop starts
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let pipeline = build_pipeline(api_key, config);
    let reader = TermiosCommandReader::new();
    let max_duration = config.max_duration_or_default();

    let mut session = CommandSession::new();
    presenter.info("Press 's' to start recording, 'q' to quit");

    while !session.is_terminated() {
        let key = match reader.read_command(COMMAND_TIMEOUT).await {
            Ok(key) => key,
            Err(e) => {
                // Terminal input errors leave the loop unable to continue
                presenter.error(&format!("Terminal input failed: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        };

        match key {
            None => continue, // timeout, keep waiting
            Some('s') => {
                if session.begin_recording().is_err() {
                    continue;
                }
                run_recording(&pipeline, max_duration, &presenter).await;
                if session.finish_recording().is_err() {
                    return ExitCode::from(EXIT_ERROR);
                }
            }
            Some('q') | Some(CTRL_C) => {
                if session.terminate().is_err() {
                    return ExitCode::from(EXIT_ERROR);
                }
            }
            Some(other) => {
                presenter.warn(&format!(
                    "Unknown command '{}'. Press 's' to record, 'q' to quit",
                    other.escape_default()
                ));
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// One recording cycle inside the interactive loop. Failures are reported
/// and the loop continues.
async fn run_recording(pipeline: &AppPipeline, max_duration: Duration, presenter: &Presenter) {
    presenter.info(&format!(
        "Recording (up to {}). Press Enter to stop.",
        max_duration
    ));

    let callbacks = CaptureCallbacks {
        on_progress: Some(Arc::new(|elapsed, max| {
            let bar = Presenter::new().format_progress(elapsed, max);
            eprint!("\r  {}", bar);
            let _ = io::stderr().flush();
        })),
        on_warning: Some(Box::new(|remaining| {
            eprintln!();
            eprintln!("⚠ {}s remaining", remaining);
        })),
    };

    match pipeline.record_and_transcribe(max_duration, callbacks).await {
        Ok(output) => {
            eprintln!();
            if output.stop_reason == Some(StopReason::MaxDuration) {
                presenter.warn("Maximum recording duration reached");
            }
            presenter.success(&format!("Saved recording to {}", output.audio_path.display()));
            presenter.output(&output.text);
            if output.clipboard_copied {
                presenter.info("Copied to clipboard");
            }
        }
        Err(e) => {
            eprintln!();
            presenter.error(&e.to_string());
        }
    }
}
