//! Stecker binary.
//!
//! # Usage
//!
//! ```bash
//! # Encode with the M3 preset, output in groups of five
//! stecker "attack at dawn"
//!
//! # Custom rotors, offsets and plugboard; message from stdin
//! echo "attack at dawn" | stecker --rotors IV,II,V --offsets B,U,L --plugboard "AZ BY"
//!
//! # Machine from a file, saving a copy with different offsets
//! stecker --config m3.json --offsets 3,7,0 --save-config today.json "attack at dawn"
//! ```

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use stecker_cli::{Args, CliError, logging};

fn main() -> ExitCode {
    let args = Args::parse();

    match start(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "stecker failed");
            let _ = writeln!(io::stderr().lock(), "stecker: {err}");
            ExitCode::from(err.exit_code())
        },
    }
}

fn start(args: &Args) -> Result<(), CliError> {
    let directives = logging::directives(&args.log_level, args.trace);
    logging::init(args.log_dest, args.log_file.as_deref(), &directives)?;

    stecker_cli::run(args, io::stdin().lock(), io::stdout().lock())
}
