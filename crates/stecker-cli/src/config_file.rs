//! Machine configuration files.
//!
//! Configurations are stored as pretty-printed JSON. Loading only checks the
//! schema; semantic validation happens when the engine is built, so a file
//! that loads may still be rejected by [`stecker_core::Engine::from_config`].

use std::{fs, path::Path};

use stecker_core::MachineConfig;

use crate::CliError;

/// Read a configuration from `path`.
pub fn load(path: &Path) -> Result<MachineConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::io(path, source))?;
    let config: MachineConfig = serde_json::from_str(&text)
        .map_err(|source| CliError::Json { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), name = %config.name, "loaded configuration");
    Ok(config)
}

/// Write `config` to `path`, replacing any existing file.
pub fn save(path: &Path, config: &MachineConfig) -> Result<(), CliError> {
    let mut text = serde_json::to_string_pretty(config)
        .map_err(|source| CliError::Json { path: path.to_path_buf(), source })?;
    text.push('\n');

    fs::write(path, text).map_err(|source| CliError::io(path, source))?;

    tracing::info!(path = %path.display(), name = %config.name, "saved configuration");
    Ok(())
}
