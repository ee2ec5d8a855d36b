//! Log subscriber setup.
//!
//! Logs go to stderr unless told otherwise so that ciphertext on stdout
//! stays clean. `RUST_LOG` takes precedence over `--log-level`.

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use clap::ValueEnum;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::CliError;

/// Directive that lets per-stage trace events through.
pub const TRACE_DIRECTIVE: &str = "stecker_core::trace=trace";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogDestination {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output, interleaved with ciphertext.
    Stdout,
    /// Discard all logs.
    Off,
    /// Append to the file given by `--log-file`.
    File,
}

/// Filter directives for `level`, widened to trace events when `trace` is
/// set.
pub fn directives(level: &str, trace: bool) -> String {
    if trace { format!("{level},{TRACE_DIRECTIVE}") } else { level.to_string() }
}

/// Install the global subscriber.
///
/// Fails if a file destination has no path or cannot be opened, or if a
/// subscriber is already installed.
pub fn init(
    destination: LogDestination,
    file: Option<&Path>,
    directives: &str,
) -> Result<(), CliError> {
    let (writer, ansi) = match destination {
        LogDestination::Off => return Ok(()),
        LogDestination::Stderr => (BoxMakeWriter::new(io::stderr), true),
        LogDestination::Stdout => (BoxMakeWriter::new(io::stdout), true),
        LogDestination::File => {
            let path = file.ok_or(CliError::MissingLogFile)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| CliError::io(path, source))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        },
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(ansi))
        .with(filter)
        .try_init()?;

    Ok(())
}
