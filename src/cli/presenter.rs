//! Terminal output: status lines and the spinner go to stderr, results to stdout

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} {elapsed:.dim}";

/// Width of the key column in `config list`
const KEY_WIDTH: usize = 14;

/// Leading glyph of a status line
#[derive(Debug, Clone, Copy)]
enum Mark {
    Success,
    Warning,
    Failure,
}

impl Mark {
    fn glyph(self) -> ColoredString {
        match self {
            Self::Success => "✓".green(),
            Self::Warning => "⚠".yellow(),
            Self::Failure => "✗".red(),
        }
    }

    fn line(self, message: &str) -> String {
        format!("{} {}", self.glyph(), message)
    }
}

pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Show a spinner on stderr until `spinner_success` or `spinner_fail`
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars(SPINNER_TICKS)
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Shared handle to the active spinner, for updates from callbacks
    pub fn spinner_handle(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    pub fn spinner_success(&mut self, message: &str) {
        self.finish_spinner(Mark::Success, message);
    }

    pub fn spinner_fail(&mut self, message: &str) {
        self.finish_spinner(Mark::Failure, message);
    }

    fn finish_spinner(&mut self, mark: Mark, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(mark.line(message));
        }
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", Mark::Success.line(message));
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{}", Mark::Warning.line(message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", Mark::Failure.line(message));
    }

    /// Result text on stdout, nothing else mixed in
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// One aligned `key  value` row for `config list`
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}  {}", format!("{:<width$}", key, width = KEY_WIDTH).cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Spinner message for a status check
pub fn format_poll_status(attempt: u32, status: &str) -> String {
    let label = match status {
        "queued" => "Queued",
        "processing" => "Transcribing",
        "completed" => "Completed",
        "error" => "Failed",
        other => other,
    };
    format!("{}... (check {})", label, attempt)
}
