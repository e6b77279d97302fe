use clap::ValueEnum;
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// How log events are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogMode {
    /// One flattened JSON object per event.
    Json,
    /// Human readable lines.
    Pretty,
}

/// Pretty when a person is watching stderr, JSON otherwise.
pub fn default_log_mode() -> LogMode {
    if io::stderr().is_terminal() {
        LogMode::Pretty
    } else {
        LogMode::Json
    }
}

/// Install the global subscriber.
///
/// Filtering comes from `RUST_LOG` and defaults to "info". Everything goes to
/// stderr: stdin carries the access log and stdout the server URL.
pub fn init_logging(mode: LogMode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match mode {
        LogMode::Json => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .init(),
        LogMode::Pretty => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
}
