//! Stecker Rotor Cipher Engine
//!
//! A three-rotor, reflector and plugboard cipher machine with historically
//! accurate stepping, including the middle rotor double step.
//!
//! # Design
//!
//! The engine is pure: it holds no I/O resources and writes no logs of its
//! own beyond `tracing` events. Configuration arrives as a validated
//! [`MachineConfig`] and diagnostic traces go to a caller-supplied
//! [`TraceSink`]. Loading files and choosing log destinations belong to the
//! outer shell (`stecker-cli`).
//!
//! # Properties
//!
//! - Reciprocity: the same starting state decodes what it encoded
//! - Determinism: rotor offsets are the only mutable state
//! - Total: once constructed, encoding cannot fail
//!
//! ```
//! use stecker_core::{Chunking, Engine, MachineConfig};
//!
//! let mut engine = Engine::from_config(&MachineConfig::m3()).unwrap();
//! let ciphertext = engine.encode_message("attack at dawn", Chunking::None);
//!
//! engine.reset();
//! assert_eq!(engine.encode_message(&ciphertext, Chunking::None), "ATTACKATDAWN");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod alphabet;
pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod plugboard;
pub mod rotor;
pub mod stepping;
pub mod text;
pub mod trace;
pub mod wiring;

pub use alphabet::{ALPHABET_LEN, Letter};
pub use bank::RotorBank;
pub use config::{
    CONFIG_VERSION, MachineConfig, ReflectorDefinition, ResolvedMachine, RotorDefinition,
    RotorSelection,
};
pub use engine::Engine;
pub use error::{ConfigurationError, WiringError};
pub use plugboard::Plugboard;
pub use rotor::{Direction, Reflector, Rotor};
pub use stepping::{Advances, ROTOR_COUNT, RotorStack, Slot, SteppingController, SteppingMode};
pub use text::{Chunking, normalize};
pub use trace::{NullSink, RecordingSink, Stage, StepRecord, TraceRecord, TraceSink, TracingSink};
pub use wiring::Wiring;
