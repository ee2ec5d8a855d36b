//! Test harness for the stecker cipher engine.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference machine written for clarity rather
//! than speed: string wirings, character arithmetic and an odometer carry.
//! Operations are applied to both the model and the real [`stecker_core::Engine`],
//! and their outputs and offsets are compared.
//!
//! # Seeded Machines
//!
//! The `sim` module generates random but valid machine configurations from a
//! `u64` seed, so every failure is reproducible from the seed alone.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim;

pub use model::{ModelMachine, ObservableState, Operation, OperationResult, SmallText};
pub use sim::{random_config, random_plaintext};
