//! Per-stage diagnostic trace.
//!
//! The engine reports every stage of the signal path to a [`TraceSink`]
//! supplied by the caller. Where the records end up (nowhere, memory, the
//! `tracing` subscriber) is decided by the sink, not the engine.

use std::fmt;

use crate::{alphabet::Letter, rotor::Direction, stepping::Slot};

/// A point on the signal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Plugboard on the way in.
    PlugboardIn,
    /// A rotor, in either direction.
    Rotor {
        /// Rotor position.
        slot: Slot,
        /// Signal direction.
        direction: Direction,
    },
    /// The reflector.
    Reflector,
    /// Plugboard on the way out.
    PlugboardOut,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlugboardIn => f.write_str("plugboard in"),
            Self::Rotor { slot, direction: Direction::Entering } => write!(f, "{slot} rotor in"),
            Self::Rotor { slot, direction: Direction::Returning } => write!(f, "{slot} rotor out"),
            Self::Reflector => f.write_str("reflector"),
            Self::PlugboardOut => f.write_str("plugboard out"),
        }
    }
}

/// One stage transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Where the transition happened.
    pub stage: Stage,
    /// Symbol before the stage.
    pub input: Letter,
    /// Symbol after the stage.
    pub output: Letter,
}

/// A rotor movement made by the stepping controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    /// Rotor that moved.
    pub slot: Slot,
    /// Offset before the move.
    pub from: u8,
    /// Offset after the move.
    pub to: u8,
}

/// Receiver for trace records.
pub trait TraceSink {
    /// Called once per stage, in signal order.
    fn record(&mut self, record: TraceRecord);

    /// Called once per rotor movement, before the symbol is encoded.
    fn step(&mut self, step: StepRecord) {
        let _ = step;
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _record: TraceRecord) {}
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Stage records in order.
    pub records: Vec<TraceRecord>,
    /// Step records in order.
    pub steps: Vec<StepRecord>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for RecordingSink {
    fn record(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    fn step(&mut self, step: StepRecord) {
        self.steps.push(step);
    }
}

/// Forwards records to `tracing` at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&mut self, record: TraceRecord) {
        tracing::trace!(
            stage = %record.stage,
            input = %record.input,
            output = %record.output,
            "signal"
        );
    }

    fn step(&mut self, step: StepRecord) {
        tracing::trace!(slot = %step.slot, from = step.from, to = step.to, "rotor stepped");
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, record: TraceRecord) {
        (**self).record(record);
    }

    fn step(&mut self, step: StepRecord) {
        (**self).step(step);
    }
}
