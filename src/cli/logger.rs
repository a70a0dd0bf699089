//! Stderr logger for the `log` facade
//!
//! Only records from this crate are printed; dependency logs are dropped.
//! Level is Debug with `--verbose` and Warn otherwise.

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

const CRATE_TARGET: &str = "assembly_transcribe";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().starts_with(CRATE_TARGET)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{} {}", level_tag(record.level()), record.args());
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Error => "[error]".red(),
        Level::Warn => "[warn]".yellow(),
        Level::Info => "[info]".cyan(),
        Level::Debug | Level::Trace => "[debug]".dimmed(),
    }
}

/// Level used for the given verbosity
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the logger. Fails if a logger is already installed.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level_for(verbose)))
}
