//! Reference model for model-based testing.
//!
//! The model describes WHAT the machine does without sharing any of the
//! engine's code paths for stepping or signal routing. It serves as the
//! oracle against which the engine is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Independence: Different formulation from the engine (odometer arithmetic,
//!   pawl flags, string lookups)
//! - Deterministic: Same inputs produce same outputs

mod machine;
pub mod operation;

pub use machine::{ModelMachine, ObservableState};
pub use operation::{Operation, OperationResult, SmallText};
