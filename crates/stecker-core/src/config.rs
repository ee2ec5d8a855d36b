//! Versioned machine configuration.
//!
//! A [`MachineConfig`] is a plain serde record. It is validated as a whole by
//! [`MachineConfig::resolve`]; either every field checks out and a complete
//! [`ResolvedMachine`] comes back, or the first defect is reported with its
//! field path. There is no partially configured machine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    bank::RotorBank,
    error::ConfigurationError,
    plugboard::{Plugboard, parse_pair},
    rotor::{Reflector, Rotor, parse_notches},
    stepping::{ROTOR_COUNT, RotorStack, SteppingMode},
    wiring::Wiring,
};

/// Schema version written and accepted by this build.
pub const CONFIG_VERSION: u32 = 1;

/// Serialized machine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Schema version, must equal [`CONFIG_VERSION`].
    pub version: u32,
    /// Free-form machine name.
    pub name: String,
    /// Plugboard cables as two-letter pairs, e.g. `["AB", "CD"]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugboard: Vec<String>,
    /// Rotor selections ordered right, middle, left.
    pub rotors: Vec<RotorSelection>,
    /// Reflector name.
    pub reflector: String,
    /// Whether rotors move at all.
    #[serde(default = "enabled")]
    pub stepping: bool,
    /// Notch-driven double stepping (`true`) or simple carry (`false`).
    #[serde(default = "enabled")]
    pub double_step: bool,
    /// Extra rotor definitions. Override historical rotors of the same name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rotor_bank: Vec<RotorDefinition>,
    /// Extra reflector definitions. Override historical reflectors of the
    /// same name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reflector_bank: Vec<ReflectorDefinition>,
}

fn enabled() -> bool {
    true
}

/// A rotor chosen from the bank and its starting offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotorSelection {
    /// Bank name.
    pub name: String,
    /// Starting offset in `0..26`.
    #[serde(default)]
    pub offset: u8,
}

impl RotorSelection {
    /// Selection of `name` at `offset`.
    pub fn new(name: impl Into<String>, offset: u8) -> Self {
        Self { name: name.into(), offset }
    }
}

/// A custom rotor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotorDefinition {
    /// Bank name.
    pub name: String,
    /// 26-letter permutation.
    pub wiring: String,
    /// Notch letters, e.g. `"Q"` or `"ZM"`.
    #[serde(default)]
    pub notches: String,
}

/// A custom reflector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReflectorDefinition {
    /// Bank name.
    pub name: String,
    /// 26-letter permutation.
    pub wiring: String,
}

/// Fully validated machine parts, ready to assemble into an engine.
#[derive(Debug, Clone)]
pub struct ResolvedMachine {
    /// Machine name.
    pub name: String,
    /// Plugboard.
    pub plugboard: Plugboard,
    /// Rotors ordered right, middle, left, at their starting offsets.
    pub rotors: RotorStack,
    /// Reflector.
    pub reflector: Reflector,
    /// Stepping mechanism.
    pub mode: SteppingMode,
}

impl MachineConfig {
    /// Three-rotor service machine: rotor I right, II middle, III left,
    /// reflector B, no plugboard, all offsets 0, double stepping.
    pub fn m3() -> Self {
        Self {
            version: CONFIG_VERSION,
            name: "M3".to_string(),
            plugboard: Vec::new(),
            rotors: vec![
                RotorSelection::new("I", 0),
                RotorSelection::new("II", 0),
                RotorSelection::new("III", 0),
            ],
            reflector: "B".to_string(),
            stepping: true,
            double_step: true,
            rotor_bank: Vec::new(),
            reflector_bank: Vec::new(),
        }
    }

    /// Stepping mode selected by the two flags.
    pub fn stepping_mode(&self) -> SteppingMode {
        SteppingMode::from_flags(self.stepping, self.double_step)
    }

    /// Set both flags from a mode. Disabling keeps `double_step` set so that
    /// turning stepping back on restores the notch mechanism.
    pub fn set_stepping_mode(&mut self, mode: SteppingMode) {
        self.stepping = mode.is_stepping();
        self.double_step = mode != SteppingMode::SimpleCarry;
    }

    /// Validate against the historical bank extended by this configuration's
    /// own definitions.
    pub fn resolve(&self) -> Result<ResolvedMachine, ConfigurationError> {
        self.resolve_with(RotorBank::historical())
    }

    /// Validate against `bank` extended by this configuration's own
    /// definitions.
    pub fn resolve_with(&self, mut bank: RotorBank) -> Result<ResolvedMachine, ConfigurationError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigurationError::UnsupportedVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }

        for (i, definition) in self.rotor_bank.iter().enumerate() {
            bank.insert_rotor(definition.build(i)?);
        }
        for (i, definition) in self.reflector_bank.iter().enumerate() {
            bank.insert_reflector(definition.build(i)?);
        }

        if self.rotors.len() != ROTOR_COUNT {
            return Err(ConfigurationError::RotorCount { count: self.rotors.len() });
        }

        let rotors = self
            .rotors
            .iter()
            .enumerate()
            .map(|(i, selection)| selection.mount(i, &bank))
            .collect::<Result<Vec<_>, _>>()?;
        let rotors: RotorStack = rotors
            .try_into()
            .map_err(|rotors: Vec<Rotor>| ConfigurationError::RotorCount { count: rotors.len() })?;

        let reflector = bank.reflector(&self.reflector).ok_or_else(|| {
            ConfigurationError::UnknownReflector { name: self.reflector.clone() }
        })?;

        let plugboard = self.plugboard()?;

        Ok(ResolvedMachine {
            name: self.name.clone(),
            plugboard,
            rotors,
            reflector,
            mode: self.stepping_mode(),
        })
    }

    fn plugboard(&self) -> Result<Plugboard, ConfigurationError> {
        let pairs = self
            .plugboard
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                parse_pair(pair)
                    .map_err(|e| ConfigurationError::wiring(format!("plugboard[{i}]"), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Plugboard::new(&pairs).map_err(|e| ConfigurationError::wiring("plugboard", e))
    }
}

impl RotorSelection {
    fn mount(&self, index: usize, bank: &RotorBank) -> Result<Rotor, ConfigurationError> {
        let rotor = bank.rotor(&self.name).ok_or_else(|| ConfigurationError::UnknownRotor {
            field: format!("rotors[{index}].name"),
            name: self.name.clone(),
        })?;

        if usize::from(self.offset) >= crate::alphabet::ALPHABET_LEN {
            return Err(ConfigurationError::OffsetOutOfRange {
                field: format!("rotors[{index}].offset"),
                offset: self.offset,
            });
        }

        Ok(rotor.with_offset(self.offset))
    }
}

impl RotorDefinition {
    /// Definition describing `rotor`.
    pub fn from_rotor(rotor: &Rotor) -> Self {
        Self {
            name: rotor.name().to_string(),
            wiring: rotor.wiring().to_permutation_string(),
            notches: rotor.notches().iter().map(|n| n.to_char()).collect(),
        }
    }

    fn build(&self, index: usize) -> Result<Rotor, ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::EmptyName {
                field: format!("rotor_bank[{index}].name"),
            });
        }
        let wiring = Wiring::from_permutation(&self.wiring)
            .map_err(|e| ConfigurationError::wiring(format!("rotor_bank[{index}].wiring"), e))?;
        let notches = parse_notches(&self.notches)
            .map_err(|e| ConfigurationError::wiring(format!("rotor_bank[{index}].notches"), e))?;
        Ok(Rotor::new(self.name.clone(), Arc::new(wiring), notches))
    }
}

impl ReflectorDefinition {
    /// Definition describing `reflector`.
    pub fn from_reflector(reflector: &Reflector) -> Self {
        Self {
            name: reflector.name().to_string(),
            wiring: reflector.wiring().to_permutation_string(),
        }
    }

    fn build(&self, index: usize) -> Result<Reflector, ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::EmptyName {
                field: format!("reflector_bank[{index}].name"),
            });
        }
        let wiring = Wiring::from_permutation(&self.wiring)
            .map_err(|e| ConfigurationError::wiring(format!("reflector_bank[{index}].wiring"), e))?;
        Ok(Reflector::new(self.name.clone(), Arc::new(wiring)))
    }
}
