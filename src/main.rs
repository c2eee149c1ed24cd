//! voxclip CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voxclip::cli::{
    app::{load_merged_config, run_interactive, run_oneshot, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voxclip::domain::config::AppConfig;
use voxclip::domain::recording::Duration;
use voxclip::infrastructure::TomlConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = TomlConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        max_duration: cli.max_duration.clone(),
        output_dir: cli
            .output_dir
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Reject a malformed duration before anything touches the device
    if let Some(s) = config.max_duration.as_ref() {
        if let Err(e) = s.parse::<Duration>() {
            presenter.error(&format!("Invalid max-duration: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    // Route to appropriate handler
    match cli.file {
        Some(file) => run_oneshot(&file, &config).await,
        None => run_interactive(&config).await,
    }
}
