//! The cipher engine.
//!
//! [`Engine`] owns the plugboard, the rotor stack, the reflector and the
//! stepping controller. Each call to [`Engine::encode`] steps the rotors and
//! then threads the symbol through the reciprocal signal path:
//!
//! ```text
//! plugboard -> right -> middle -> left -> reflector
//!                                             |
//! plugboard <- right <- middle <- left <------+
//! ```
//!
//! # Invariants
//!
//! - Reciprocity: from identical offsets, encoding the output of `encode`
//!   returns the original input
//! - Determinism: identical configuration and offsets produce identical output
//!   and identical final offsets
//! - Rotor offsets are the only state `encode` mutates
//!
//! An engine is single-threaded by nature (every symbol depends on the offsets
//! left by the previous one). To encode independent messages in parallel,
//! clone the engine: clones share wiring tables and own their offsets.

use crate::{
    alphabet::Letter,
    bank::RotorBank,
    config::{CONFIG_VERSION, MachineConfig, ReflectorDefinition, RotorDefinition, RotorSelection},
    error::ConfigurationError,
    plugboard::Plugboard,
    rotor::{Direction, Reflector, Rotor},
    stepping::{ROTOR_COUNT, RotorStack, Slot, SteppingController, SteppingMode},
    text::{Chunking, normalize_counted},
    trace::{NullSink, Stage, StepRecord, TraceRecord, TraceSink},
};

/// A configured three-rotor machine.
#[derive(Debug, Clone)]
pub struct Engine {
    name: String,
    plugboard: Plugboard,
    rotors: RotorStack,
    reflector: Reflector,
    stepping: SteppingController,
}

impl Engine {
    /// Assemble an engine from parts. Rotors are ordered right, middle, left.
    pub fn new(
        name: impl Into<String>,
        plugboard: Plugboard,
        rotors: RotorStack,
        reflector: Reflector,
        mode: SteppingMode,
    ) -> Self {
        if !reflector.is_well_formed() {
            tracing::warn!(
                reflector = reflector.name(),
                "reflector is not a fixed-point-free involution; output may not be reciprocal"
            );
        }

        Self {
            name: name.into(),
            plugboard,
            rotors,
            reflector,
            stepping: SteppingController::new(mode),
        }
    }

    /// Build an engine from a configuration, using the historical bank.
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigurationError> {
        Self::from_config_with_bank(config, RotorBank::historical())
    }

    /// Build an engine from a configuration, resolving names against `bank`.
    pub fn from_config_with_bank(
        config: &MachineConfig,
        bank: RotorBank,
    ) -> Result<Self, ConfigurationError> {
        let machine = config.resolve_with(bank)?;
        tracing::debug!(
            name = %machine.name,
            right = machine.rotors[Slot::Right.index()].name(),
            middle = machine.rotors[Slot::Middle.index()].name(),
            left = machine.rotors[Slot::Left.index()].name(),
            reflector = machine.reflector.name(),
            mode = ?machine.mode,
            "engine configured"
        );
        Ok(Self::new(
            machine.name,
            machine.plugboard,
            machine.rotors,
            machine.reflector,
            machine.mode,
        ))
    }

    /// Machine name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rotors ordered right, middle, left.
    pub fn rotors(&self) -> &RotorStack {
        &self.rotors
    }

    /// Reflector.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Plugboard.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Active stepping mode.
    pub fn stepping_mode(&self) -> SteppingMode {
        self.stepping.mode()
    }

    /// Switch stepping mode. Offsets are left where they are.
    pub fn set_stepping_mode(&mut self, mode: SteppingMode) {
        self.stepping = SteppingController::new(mode);
    }

    /// Replace the plugboard.
    pub fn set_plugboard(&mut self, plugboard: Plugboard) {
        self.plugboard = plugboard;
    }

    /// Current offsets ordered right, middle, left.
    pub fn offsets(&self) -> [u8; ROTOR_COUNT] {
        [
            self.rotors[Slot::Right.index()].offset(),
            self.rotors[Slot::Middle.index()].offset(),
            self.rotors[Slot::Left.index()].offset(),
        ]
    }

    /// Set offsets ordered right, middle, left (each reduced modulo 26).
    pub fn set_offsets(&mut self, offsets: [u8; ROTOR_COUNT]) {
        for (rotor, offset) in self.rotors.iter_mut().zip(offsets) {
            rotor.set_offset(offset);
        }
    }

    /// Zero every rotor offset. Wiring, plugboard and mode are untouched.
    pub fn reset(&mut self) {
        self.set_offsets([0; ROTOR_COUNT]);
    }

    /// Step the rotors and encode one symbol.
    pub fn encode(&mut self, letter: Letter) -> Letter {
        self.encode_traced(letter, &mut NullSink)
    }

    /// Step the rotors and encode one symbol, reporting every stage to `sink`.
    pub fn encode_traced(&mut self, letter: Letter, sink: &mut impl TraceSink) -> Letter {
        let before = self.offsets();
        let advances = self.stepping.step(&mut self.rotors);
        for slot in advances.slots() {
            sink.step(StepRecord {
                slot,
                from: before[slot.index()],
                to: self.rotors[slot.index()].offset(),
            });
        }

        let mut signal = letter;
        signal = record(sink, Stage::PlugboardIn, signal, self.plugboard.swap(signal));

        for slot in Slot::ALL {
            let direction = Direction::Entering;
            let output = self.rotors[slot.index()].transform(signal, direction);
            signal = record(sink, Stage::Rotor { slot, direction }, signal, output);
        }

        signal = record(sink, Stage::Reflector, signal, self.reflector.reflect(signal));

        for slot in Slot::ALL.into_iter().rev() {
            let direction = Direction::Returning;
            let output = self.rotors[slot.index()].transform(signal, direction);
            signal = record(sink, Stage::Rotor { slot, direction }, signal, output);
        }

        record(sink, Stage::PlugboardOut, signal, self.plugboard.swap(signal))
    }

    /// Encode a single character.
    ///
    /// Lowercase letters are accepted. Anything outside the alphabet returns
    /// `None` and leaves the rotors where they are.
    pub fn encode_char(&mut self, c: char) -> Option<char> {
        let letter = Letter::from_char(c.to_ascii_uppercase())?;
        Some(self.encode(letter).to_char())
    }

    /// Normalize `text` and encode it symbol by symbol.
    pub fn encode_message(&mut self, text: &str, chunking: Chunking) -> String {
        self.encode_message_traced(text, chunking, &mut NullSink)
    }

    /// Like [`Engine::encode_message`], reporting every stage to `sink`.
    pub fn encode_message_traced(
        &mut self,
        text: &str,
        chunking: Chunking,
        sink: &mut impl TraceSink,
    ) -> String {
        let (normalized, dropped) = normalize_counted(text);
        if dropped > 0 {
            tracing::debug!(
                dropped,
                kept = normalized.len(),
                "dropped characters outside the alphabet"
            );
        }

        let encoded: String = normalized
            .chars()
            .filter_map(Letter::from_char)
            .map(|letter| self.encode_traced(letter, &mut *sink).to_char())
            .collect();

        chunking.apply(&encoded)
    }

    /// Snapshot the current state as a configuration.
    ///
    /// Rotors and reflectors that differ from the historical bank entry of
    /// the same name are written out as custom definitions, so the snapshot
    /// resolves back to an identical engine. Distinct rotors sharing a name
    /// are renamed in the snapshot (`X`, `X-2`).
    pub fn to_config(&self) -> MachineConfig {
        let historical = RotorBank::historical();
        let (rotor_bank, selections) = snapshot_rotors(&self.rotors, &historical);

        let reflector_bank = if historical.contains_reflector(&self.reflector) {
            Vec::new()
        } else {
            vec![ReflectorDefinition::from_reflector(&self.reflector)]
        };

        let mut config = MachineConfig {
            version: CONFIG_VERSION,
            name: self.name.clone(),
            plugboard: self
                .plugboard
                .pairs()
                .iter()
                .map(|(a, b)| [a.to_char(), b.to_char()].into_iter().collect())
                .collect(),
            rotors: selections,
            reflector: self.reflector.name().to_string(),
            stepping: true,
            double_step: true,
            rotor_bank,
            reflector_bank,
        };
        config.set_stepping_mode(self.stepping_mode());
        config
    }
}

/// Rotor definitions and selections that rebuild `rotors` exactly.
///
/// Rotors matching their historical namesake are selected by name. Custom
/// rotors get a definition; when two different rotors share a name, or a
/// custom rotor shares a name with a historical one in use, the later one is
/// renamed `NAME-2`, `NAME-3`, ... so no definition shadows another.
fn snapshot_rotors(
    rotors: &RotorStack,
    historical: &RotorBank,
) -> (Vec<RotorDefinition>, Vec<RotorSelection>) {
    let reserved: Vec<&str> = rotors
        .iter()
        .filter(|rotor| historical.contains_rotor(rotor))
        .map(Rotor::name)
        .collect();

    let mut definitions: Vec<RotorDefinition> = Vec::new();
    let mut selections = Vec::with_capacity(ROTOR_COUNT);

    for rotor in rotors {
        if historical.contains_rotor(rotor) {
            selections.push(RotorSelection::new(rotor.name(), rotor.offset()));
            continue;
        }

        let mut definition = RotorDefinition::from_rotor(rotor);
        let existing = definitions.iter().find(|known| {
            known.wiring == definition.wiring
                && known.notches == definition.notches
                && (known.name == definition.name
                    || known.name.starts_with(&format!("{}-", definition.name)))
        });

        let name = match existing {
            Some(known) => known.name.clone(),
            None => {
                let taken = |name: &str| {
                    reserved.contains(&name) || definitions.iter().any(|d| d.name == name)
                };
                if taken(&definition.name) {
                    let base = &definition.name;
                    let renamed =
                        (2..).map(|n| format!("{base}-{n}")).find(|candidate| !taken(candidate));
                    if let Some(renamed) = renamed {
                        definition.name = renamed;
                    }
                }
                let name = definition.name.clone();
                definitions.push(definition);
                name
            },
        };
        selections.push(RotorSelection::new(name, rotor.offset()));
    }

    (definitions, selections)
}

fn record(sink: &mut impl TraceSink, stage: Stage, input: Letter, output: Letter) -> Letter {
    sink.record(TraceRecord { stage, input, output });
    output
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{trace::RecordingSink, wiring::Wiring};

    fn m3(mode: SteppingMode) -> Engine {
        let mut engine = Engine::from_config(&MachineConfig::m3()).unwrap();
        engine.set_stepping_mode(mode);
        engine
    }

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn single_symbol_without_stepping() {
        let mut engine = m3(SteppingMode::Disabled);
        assert_eq!(engine.encode(letter('A')), letter('N'));
        assert_eq!(engine.encode(letter('N')), letter('A'));
        assert_eq!(engine.offsets(), [0, 0, 0]);
    }

    #[test]
    fn rotors_step_before_encoding() {
        let mut engine = m3(SteppingMode::SimpleCarry);
        assert_eq!(engine.encode_message("AA", Chunking::None), "FT");
        assert_eq!(engine.offsets(), [2, 0, 0]);
    }

    #[test]
    fn reset_zeroes_offsets_only() {
        let mut engine = m3(SteppingMode::DoubleStep);
        engine.set_plugboard(Plugboard::parse("AB").unwrap());
        engine.encode_message("HELLO", Chunking::None);
        engine.reset();
        assert_eq!(engine.offsets(), [0, 0, 0]);
        assert_eq!(engine.stepping_mode(), SteppingMode::DoubleStep);
        assert_eq!(engine.plugboard().pairs().len(), 1);
    }

    #[test]
    fn encode_char_skips_non_letters_without_stepping() {
        let mut engine = m3(SteppingMode::DoubleStep);
        assert_eq!(engine.encode_char('3'), None);
        assert_eq!(engine.offsets(), [0, 0, 0]);
        assert_eq!(engine.encode_char('a'), Some('F'));
        assert_eq!(engine.offsets(), [1, 0, 0]);
    }

    #[test]
    fn trace_covers_every_stage_in_order() {
        let mut engine = m3(SteppingMode::DoubleStep);
        let mut sink = RecordingSink::new();
        let output = engine.encode_traced(letter('A'), &mut sink);

        let stages: Vec<_> = sink.records.iter().map(|r| r.stage.to_string()).collect();
        assert_eq!(stages, vec![
            "plugboard in",
            "right rotor in",
            "middle rotor in",
            "left rotor in",
            "reflector",
            "left rotor out",
            "middle rotor out",
            "right rotor out",
            "plugboard out",
        ]);

        for pair in sink.records.windows(2) {
            assert_eq!(pair[0].output, pair[1].input);
        }
        assert_eq!(sink.records[0].input, letter('A'));
        assert_eq!(sink.records[8].output, output);
        assert_eq!(sink.steps, vec![StepRecord { slot: Slot::Right, from: 0, to: 1 }]);
    }

    #[test]
    fn clones_encode_independently() {
        let mut first = m3(SteppingMode::DoubleStep);
        let mut second = first.clone();
        let a = first.encode_message("ATTACKATDAWN", Chunking::None);
        assert_eq!(second.offsets(), [0, 0, 0]);
        let b = second.encode_message("ATTACKATDAWN", Chunking::None);
        assert_eq!(a, b);
        assert_eq!(first.offsets(), second.offsets());
    }

    #[test]
    fn to_config_roundtrips_historical_machine() {
        let mut engine = m3(SteppingMode::SimpleCarry);
        engine.set_plugboard(Plugboard::parse("AZ QP").unwrap());
        engine.set_offsets([3, 7, 11]);

        let config = engine.to_config();
        assert_eq!(config.plugboard, vec!["AZ".to_string(), "QP".to_string()]);
        assert!(config.rotor_bank.is_empty());
        assert!(!config.double_step);

        let mut restored = Engine::from_config(&config).unwrap();
        assert_eq!(restored.offsets(), [3, 7, 11]);
        assert_eq!(
            restored.encode_message("ROUNDTRIP", Chunking::None),
            engine.encode_message("ROUNDTRIP", Chunking::None)
        );
    }

    #[test]
    fn to_config_writes_custom_definitions() {
        let identity = Arc::new(Wiring::identity());
        let rotors = [
            Rotor::new("X", Arc::clone(&identity), []),
            Rotor::new("X", Arc::clone(&identity), []),
            Rotor::new("Y", Arc::clone(&identity), []),
        ];
        let reflector = Reflector::new(
            "R",
            Arc::new(Wiring::from_permutation("BADCFEHGJILKNMPORQTSVUXWZY").unwrap()),
        );
        let engine = Engine::new(
            "custom",
            Plugboard::default(),
            rotors,
            reflector,
            SteppingMode::DoubleStep,
        );

        let config = engine.to_config();
        let names: Vec<_> = config.rotor_bank.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert_eq!(config.reflector_bank.len(), 1);
        assert!(Engine::from_config(&config).is_ok());
    }

    #[test]
    fn to_config_separates_rotors_sharing_a_name() {
        let reversed = Wiring::from_permutation("ZYXWVUTSRQPONMLKJIHGFEDCBA").unwrap();
        let rotors = [
            Rotor::new("X", Arc::new(Wiring::identity()), []),
            Rotor::new("X", Arc::new(reversed), []),
            Rotor::new("Y", Arc::new(Wiring::identity()), []),
        ];
        let reflector = RotorBank::historical().reflector("B").unwrap();
        let mut original =
            Engine::new("shared", Plugboard::default(), rotors, reflector, SteppingMode::Disabled);

        let config = original.to_config();
        let names: Vec<_> = config.rotors.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["X", "X-2", "Y"]);

        let mut restored = Engine::from_config(&config).unwrap();
        assert_eq!(
            original.encode_message("HELLOWORLD", Chunking::None),
            restored.encode_message("HELLOWORLD", Chunking::None)
        );
    }

    #[test]
    fn to_config_keeps_historical_rotor_beside_custom_namesake() {
        let bank = RotorBank::historical();
        let rotors = [
            bank.rotor("I").unwrap().with_offset(3),
            Rotor::new("I", Arc::new(Wiring::identity()), [letter('A')]),
            bank.rotor("III").unwrap(),
        ];
        let reflector = bank.reflector("B").unwrap();
        let mut original =
            Engine::new("mixed", Plugboard::default(), rotors, reflector, SteppingMode::DoubleStep);

        let config = original.to_config();
        assert_eq!(config.rotors[0].name, "I");
        assert_eq!(config.rotors[1].name, "I-2");
        assert_eq!(config.rotors[0].offset, 3);

        let mut restored = Engine::from_config(&config).unwrap();
        let text = "A".repeat(60);
        assert_eq!(
            original.encode_message(&text, Chunking::None),
            restored.encode_message(&text, Chunking::None)
        );
        assert_eq!(original.offsets(), restored.offsets());
    }

    #[test]
    fn malformed_reflector_is_accepted() {
        let rotors = MachineConfig::m3().resolve().unwrap().rotors;
        let reflector = Reflector::new("identity", Arc::new(Wiring::identity()));
        let mut engine =
            Engine::new("legacy", Plugboard::default(), rotors, reflector, SteppingMode::Disabled);
        // Identity reflector sends the signal straight back.
        assert_eq!(engine.encode(letter('Q')), letter('Q'));
    }
}
