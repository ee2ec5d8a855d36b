//! Command-line shell around the stecker engine.
//!
//! Owns everything the engine leaves to its caller: reading and writing
//! configuration files, installing the log subscriber, and moving text
//! between stdin, arguments and stdout.
//!
//! ## Architecture
//!
//! ```text
//! stecker-cli
//!   ├─ Args           (clap flags layered over a MachineConfig)
//!   ├─ config_file    (JSON load/save)
//!   ├─ logging        (tracing-subscriber setup)
//!   └─ run            (build engine, encode, write ciphertext)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod args;
pub mod config_file;
mod error;
pub mod logging;

use std::io::{Read, Write};

pub use args::Args;
pub use error::CliError;
use stecker_core::{Chunking, Engine, TracingSink};

/// Build the machine from `args`, encode the message and write the result
/// followed by a newline to `output`.
///
/// The message comes from the positional arguments, or from `input` when
/// there are none. With `--save-config` the machine is saved at its starting
/// offsets, before anything is encoded.
pub fn run(args: &Args, mut input: impl Read, mut output: impl Write) -> Result<(), CliError> {
    let config = args.machine_config()?;
    let mut engine = Engine::from_config(&config)?;

    tracing::info!(
        name = engine.name(),
        rotors = ?engine.rotors().each_ref().map(|rotor| rotor.name().to_string()),
        reflector = engine.reflector().name(),
        offsets = ?engine.offsets(),
        mode = ?engine.stepping_mode(),
        "machine ready"
    );

    if let Some(path) = &args.save_config {
        config_file::save(path, &engine.to_config())?;
    }

    let message = match args.message() {
        Some(message) => message,
        None => {
            let mut message = String::new();
            input.read_to_string(&mut message).map_err(CliError::Input)?;
            message
        },
    };

    let chunking = Chunking::groups(args.chunk);
    let ciphertext = if args.trace {
        engine.encode_message_traced(&message, chunking, &mut TracingSink)
    } else {
        engine.encode_message(&message, chunking)
    };

    tracing::debug!(letters = ciphertext.len(), offsets = ?engine.offsets(), "message encoded");

    writeln!(output, "{ciphertext}").map_err(CliError::Output)?;
    output.flush().map_err(CliError::Output)
}
