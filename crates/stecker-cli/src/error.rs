//! CLI error types.

use std::{io, path::PathBuf};

use stecker_core::ConfigurationError;
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Errors that can occur while running the `stecker` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid JSON or does not match the schema.
    #[error("{}: invalid configuration file: {source}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration parsed but cannot build a machine.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Command-line value that cannot be interpreted.
    #[error("--{flag}: {reason}")]
    Argument {
        /// Flag name without the leading dashes.
        flag: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// `--log-dest file` without `--log-file`.
    #[error("--log-dest file requires --log-file")]
    MissingLogFile,

    /// Global subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] TryInitError),

    /// Reading the message from stdin failed.
    #[error("failed to read message: {0}")]
    Input(#[source] io::Error),

    /// Writing the ciphertext failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Returns true if the error is a usage mistake the caller can fix by
    /// changing arguments or configuration.
    ///
    /// Usage errors exit with status 2, everything else with status 1.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Json { .. }
                | Self::Configuration(_)
                | Self::Argument { .. }
                | Self::MissingLogFile
        )
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage_error() { 2 } else { 1 }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
