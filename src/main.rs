//! AssemblyTranscribe CLI entry point

use std::process::ExitCode;

use clap::Parser;

use assembly_transcribe::application::AudioSource;
use assembly_transcribe::cli::{
    app::{load_merged_config, poll_policy_from, run_transcribe, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logger,
    presenter::Presenter,
    TranscribeOptions,
};
use assembly_transcribe::domain::config::AppConfig;
use assembly_transcribe::domain::polling::MaxAttempts;
use assembly_transcribe::domain::transcript::AudioUrl;
use assembly_transcribe::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Err(e) = logger::init(cli.verbose) {
        presenter.warn(&format!("Logging unavailable: {}", e));
    }

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let max_attempts = match cli.max_attempts.as_deref().map(str::parse::<MaxAttempts>) {
        Some(Ok(n)) => Some(n.get()),
        Some(Err(e)) => {
            presenter.error(&format!("Invalid max-attempts: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        base_url: cli.base_url.clone(),
        poll_interval: cli.poll_interval.clone(),
        max_attempts,
        timeout: cli.timeout.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let policy = match poll_policy_from(&config) {
        Ok(policy) => policy,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let source = match (cli.file, cli.audio_url) {
        (Some(path), _) => AudioSource::File(path),
        (None, Some(url)) => AudioSource::Url(AudioUrl::new(url)),
        (None, None) => {
            presenter.error("Provide a FILE to upload or --audio-url");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let options = TranscribeOptions {
        source,
        policy,
        base_url: config.base_url_or_default().to_string(),
        api_token: config.api_token(),
        json: cli.json,
    };

    run_transcribe(options).await
}
