//! Command-line arguments and how they override a configuration.

use std::path::PathBuf;

use clap::Parser;
use stecker_core::{ALPHABET_LEN, MachineConfig, ROTOR_COUNT, RotorSelection, SteppingMode};

use crate::{CliError, config_file, logging::LogDestination};

/// Three-rotor cipher machine
#[derive(Parser, Debug, Clone)]
#[command(name = "stecker")]
#[command(about = "Encode and decode messages with a three-rotor cipher machine")]
#[command(version)]
pub struct Args {
    /// Machine configuration file (JSON); the M3 preset when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rotor names ordered right, middle, left (e.g. I,II,III)
    #[arg(long, value_delimiter = ',')]
    pub rotors: Option<Vec<String>>,

    /// Starting offsets ordered right, middle, left, as letters or 0-25
    /// (e.g. A,A,A or 0,0,0)
    #[arg(long, value_delimiter = ',')]
    pub offsets: Option<Vec<String>>,

    /// Reflector name
    #[arg(long)]
    pub reflector: Option<String>,

    /// Plugboard pairs separated by spaces (e.g. "AZ BY CX")
    #[arg(short, long)]
    pub plugboard: Option<String>,

    /// Keep every rotor fixed
    #[arg(long)]
    pub no_stepping: bool,

    /// Carry only on a full revolution, without the middle rotor double step
    #[arg(long, conflicts_with = "no_stepping")]
    pub simple_carry: bool,

    /// Group output into blocks of N letters (0 disables grouping)
    #[arg(long, default_value_t = 5)]
    pub chunk: usize,

    /// Log every signal stage at trace level
    #[arg(long)]
    pub trace: bool,

    /// Write the starting configuration to this file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Log destination
    #[arg(long, value_enum, default_value_t = LogDestination::Stderr)]
    pub log_dest: LogDestination,

    /// Log file used with --log-dest file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Message to encode; read from stdin when omitted
    pub message: Vec<String>,
}

impl Args {
    /// Build the machine configuration: the file from `--config` (or the M3
    /// preset), then each machine flag applied on top.
    pub fn machine_config(&self) -> Result<MachineConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => config_file::load(path)?,
            None => MachineConfig::m3(),
        };

        if let Some(names) = &self.rotors {
            config.rotors = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let offset = config.rotors.get(i).map_or(0, |selection| selection.offset);
                    RotorSelection::new(name.trim(), offset)
                })
                .collect();
        }

        if let Some(offsets) = &self.offsets {
            if offsets.len() != ROTOR_COUNT {
                return Err(CliError::Argument {
                    flag: "offsets",
                    reason: format!("expected {ROTOR_COUNT} values, got {}", offsets.len()),
                });
            }
            for (selection, offset) in config.rotors.iter_mut().zip(offsets) {
                selection.offset = parse_offset(offset)?;
            }
        }

        if let Some(reflector) = &self.reflector {
            config.reflector = reflector.trim().to_string();
        }

        if let Some(plugboard) = &self.plugboard {
            config.plugboard =
                plugboard.split_whitespace().map(str::to_ascii_uppercase).collect();
        }

        if self.no_stepping {
            config.set_stepping_mode(SteppingMode::Disabled);
        } else if self.simple_carry {
            config.set_stepping_mode(SteppingMode::SimpleCarry);
        }

        Ok(config)
    }

    /// Message words joined by single spaces, or `None` to read stdin.
    pub fn message(&self) -> Option<String> {
        (!self.message.is_empty()).then(|| self.message.join(" "))
    }
}

/// Parse one offset: a letter (either case) or a number in `0..26`.
pub fn parse_offset(value: &str) -> Result<u8, CliError> {
    let value = value.trim();
    let mut chars = value.chars();

    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_ascii_alphabetic()
    {
        return Ok(c.to_ascii_uppercase() as u8 - b'A');
    }

    match value.parse::<u8>() {
        Ok(offset) if usize::from(offset) < ALPHABET_LEN => Ok(offset),
        _ => Err(CliError::Argument {
            flag: "offsets",
            reason: format!("{value:?} is not a letter or a number in 0..26"),
        }),
    }
}
