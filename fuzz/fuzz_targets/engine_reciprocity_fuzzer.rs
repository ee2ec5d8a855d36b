//! Fuzz target for [`Engine`] encoding.
//!
//! Drive arbitrary machines and arbitrary text through two identically
//! configured engines.
//!
//! # Strategy
//!
//! - Machine selection: any historical rotors (repeats allowed), any
//!   reflector, any starting offsets and stepping mode
//! - Plugboard: pairs built from fuzz bytes, invalid sets skipped
//! - Text: arbitrary UTF-8, including characters outside the alphabet
//! - Repositioning: offsets changed mid-message on both engines
//!
//! # Invariants
//!
//! - Decoding the ciphertext from the same start returns the normalized text
//! - Output length equals the number of letters in the input
//! - No letter ever encodes to itself
//! - Sender and receiver finish with identical offsets
//! - NEVER panic on any input text

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stecker_core::{
    normalize, Chunking, Engine, MachineConfig, Plugboard, RotorSelection, SteppingMode,
};

const ROTORS: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];
const REFLECTORS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, Arbitrary)]
struct FuzzMachine {
    rotors: [u8; 3],
    offsets: [u8; 3],
    reflector: u8,
    mode: u8,
    plugboard: Vec<(u8, u8)>,
}

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    machine: FuzzMachine,
    /// Message segments; offsets are moved to `reposition` between them.
    segments: Vec<String>,
    reposition: [u8; 3],
    chunk: u8,
}

impl FuzzMachine {
    fn config(&self) -> MachineConfig {
        let mut config = MachineConfig::m3();
        config.rotors = self
            .rotors
            .iter()
            .zip(self.offsets)
            .map(|(&rotor, offset)| {
                RotorSelection::new(ROTORS[usize::from(rotor) % ROTORS.len()], offset % 26)
            })
            .collect();
        config.reflector = REFLECTORS[usize::from(self.reflector) % REFLECTORS.len()].to_string();
        config.set_stepping_mode(match self.mode % 3 {
            0 => SteppingMode::Disabled,
            1 => SteppingMode::SimpleCarry,
            _ => SteppingMode::DoubleStep,
        });
        config.plugboard = self
            .plugboard
            .iter()
            .take(13)
            .map(|&(a, b)| [char::from(b'A' + a % 26), char::from(b'A' + b % 26)].iter().collect())
            .collect();
        config
    }
}

fuzz_target!(|input: FuzzInput| {
    let mut config = input.machine.config();
    if Plugboard::parse(&config.plugboard.join(" ")).is_err() {
        config.plugboard.clear();
    }

    let Ok(mut sender) = Engine::from_config(&config) else {
        panic!("historical machine rejected: {config:?}");
    };
    let mut receiver = sender.clone();
    let reposition = input.reposition.map(|offset| offset % 26);

    for (i, segment) in input.segments.iter().enumerate() {
        if i > 0 {
            sender.set_offsets(reposition);
            receiver.set_offsets(reposition);
        }

        let plaintext = normalize(segment);
        let ciphertext = sender.encode_message(segment, Chunking::None);
        assert_eq!(ciphertext.len(), plaintext.len());

        for (p, c) in plaintext.chars().zip(ciphertext.chars()) {
            assert_ne!(p, c, "{p} encoded to itself");
        }

        let grouped = Chunking::groups(usize::from(input.chunk % 8)).apply(&ciphertext);
        assert_eq!(receiver.encode_message(&grouped, Chunking::None), plaintext);
        assert_eq!(sender.offsets(), receiver.offsets());
    }
});
