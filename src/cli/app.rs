//! Main app runner

use std::env;
use std::process::ExitCode;

use log::warn;

use crate::application::ports::ConfigStore;
use crate::application::{
    AudioSource, TranscribeCallbacks, TranscribeError, TranscribeFileUseCase, TranscribeInput,
};
use crate::domain::config::AppConfig;
use crate::domain::polling::{Duration, PollPolicy};
use crate::domain::transcript::{AudioUrl, TranscriptId, TranscriptState};
use crate::infrastructure::{AssemblyAiClient, TokioClock, XdgConfigStore};

use super::args::TranscribeOptions;
use super::presenter::{format_poll_status, Presenter};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_CANCELLED: u8 = 130;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ASSEMBLY_AI_API_KEY";

/// Upload (if needed), request and poll a transcript, then print it
pub async fn run_transcribe(options: TranscribeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let Some(token) = options.api_token else {
        presenter.error(&TranscribeError::MissingApiKey.to_string());
        return ExitCode::from(EXIT_ERROR);
    };

    // One client per run; both ports share its connection pool
    let client = AssemblyAiClient::with_base_url(token, options.base_url);
    let use_case = TranscribeFileUseCase::new(client.clone(), client, TokioClock::new());

    let shutdown = ShutdownSignal::new(use_case.cancel_token());
    shutdown.setup();

    let first_step = match options.source {
        AudioSource::File(_) => "Uploading...",
        AudioSource::Url(_) => "Submitting transcript request...",
    };
    presenter.start_spinner(first_step);
    let callbacks = spinner_callbacks(&presenter);

    let input = TranscribeInput {
        source: options.source,
        policy: options.policy,
    };

    match use_case.execute(input, callbacks).await {
        Ok(output) => {
            presenter.spinner_success(&format!(
                "Transcript {} ready after {} status checks",
                output.transcript.id, output.polls
            ));

            if options.json {
                let document = serde_json::to_string_pretty(&output.transcript.raw)
                    .unwrap_or_else(|_| output.transcript.raw.to_string());
                presenter.output(&document);
            } else {
                presenter.output(&output.transcript.text);
            }

            ExitCode::from(EXIT_SUCCESS)
        }
        Err(TranscribeError::Cancelled) => {
            presenter.spinner_fail("Cancelled");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            presenter.spinner_fail("Failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Callbacks that keep the spinner message in step with the workflow
fn spinner_callbacks(presenter: &Presenter) -> TranscribeCallbacks {
    let Some(spinner) = presenter.spinner_handle() else {
        return TranscribeCallbacks::default();
    };
    let (on_upload_end, on_submitted, on_poll) = (spinner.clone(), spinner.clone(), spinner);

    TranscribeCallbacks {
        on_upload_start: None,
        on_upload_end: Some(Box::new(move |_url: &AudioUrl| {
            on_upload_end.set_message("Upload complete, requesting transcript...");
        })),
        on_submitted: Some(Box::new(move |id: &TranscriptId| {
            on_submitted.set_message(format!("Transcript {} submitted", id));
        })),
        on_poll: Some(Box::new(move |attempt: u32, state: &TranscriptState| {
            on_poll.set_message(format_poll_status(attempt, state.label()));
        })),
    }
}

/// Build the poll policy from merged config, rejecting invalid values
pub fn poll_policy_from(config: &AppConfig) -> Result<PollPolicy, String> {
    let interval = match config.poll_interval.as_deref() {
        Some(s) => s
            .parse::<Duration>()
            .map_err(|e| format!("Invalid poll-interval: {}", e))?,
        None => Duration::default_poll_interval(),
    };
    let timeout = config
        .timeout
        .as_deref()
        .map(|s| s.parse::<Duration>())
        .transpose()
        .map_err(|e| format!("Invalid timeout: {}", e))?;
    let max_attempts = config
        .max_attempts()
        .map_err(|e| format!("Invalid max-attempts: {}", e))?;

    Ok(PollPolicy::every(interval)
        .with_max_attempts(max_attempts)
        .with_timeout(timeout))
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file {}: {}", store.path().display(), e);
            AppConfig::empty()
        }
    };

    // Build env config
    let env_config = AppConfig {
        api_key: env::var(API_KEY_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
