//! Named rotors and reflectors available to a machine.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    rotor::{Reflector, Rotor, parse_notches},
    wiring::Wiring,
};

/// Standard rotor wirings: name, permutation, notch positions.
const HISTORICAL_ROTORS: &[(&str, &str, &str)] = &[
    ("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q"),
    ("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E"),
    ("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V"),
    ("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", "J"),
    ("V", "VZBRGITYUPSDNHLXAWMJQOFECK", "Z"),
    ("VI", "JPGVOUMFYQBENHZRDKASXLICTW", "ZM"),
    ("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", "ZM"),
    ("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "ZM"),
];

/// Standard reflector wirings: name, permutation.
const HISTORICAL_REFLECTORS: &[(&str, &str)] = &[
    ("A", "EJMZALYXVBWFCRQUONTSPIKHGD"),
    ("B", "YRUHQSLDPXNGOKMIEBFZCWVJAT"),
    ("C", "FVPJIAOYEDRZXWGCTKUQSBNMHL"),
];

/// Rotors and reflectors indexed by name.
///
/// Entries are templates: looking up a rotor returns a fresh copy at offset 0
/// that shares the wiring table with the bank.
#[derive(Debug, Clone, Default)]
pub struct RotorBank {
    rotors: BTreeMap<String, Rotor>,
    reflectors: BTreeMap<String, Reflector>,
}

impl RotorBank {
    /// Empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotors I to VIII and reflectors A, B and C.
    pub fn historical() -> Self {
        let mut bank = Self::new();

        for &(name, permutation, notches) in HISTORICAL_ROTORS {
            match (Wiring::from_permutation(permutation), parse_notches(notches)) {
                (Ok(wiring), Ok(notches)) => {
                    bank.insert_rotor(Rotor::new(name, Arc::new(wiring), notches));
                },
                (Err(error), _) | (_, Err(error)) => {
                    tracing::error!(rotor = name, %error, "historical rotor table is malformed");
                },
            }
        }

        for &(name, permutation) in HISTORICAL_REFLECTORS {
            match Wiring::from_permutation(permutation) {
                Ok(wiring) => bank.insert_reflector(Reflector::new(name, Arc::new(wiring))),
                Err(error) => {
                    tracing::error!(
                        reflector = name,
                        %error,
                        "historical reflector table is malformed"
                    );
                },
            }
        }

        bank
    }

    /// Add or replace a rotor. The stored template is reset to offset 0.
    pub fn insert_rotor(&mut self, rotor: Rotor) {
        self.rotors.insert(rotor.name().to_string(), rotor.with_offset(0));
    }

    /// Add or replace a reflector.
    pub fn insert_reflector(&mut self, reflector: Reflector) {
        self.reflectors.insert(reflector.name().to_string(), reflector);
    }

    /// Fresh copy of the named rotor at offset 0.
    pub fn rotor(&self, name: &str) -> Option<Rotor> {
        self.rotors.get(name).cloned()
    }

    /// The named reflector.
    pub fn reflector(&self, name: &str) -> Option<Reflector> {
        self.reflectors.get(name).cloned()
    }

    /// Rotor names in sorted order.
    pub fn rotor_names(&self) -> impl Iterator<Item = &str> {
        self.rotors.keys().map(String::as_str)
    }

    /// Reflector names in sorted order.
    pub fn reflector_names(&self) -> impl Iterator<Item = &str> {
        self.reflectors.keys().map(String::as_str)
    }

    /// True if `rotor` matches the bank entry of the same name (wiring and
    /// notches; offset is ignored).
    pub fn contains_rotor(&self, rotor: &Rotor) -> bool {
        self.rotors.get(rotor.name()).is_some_and(|known| {
            known.wiring() == rotor.wiring() && known.notches() == rotor.notches()
        })
    }

    /// True if `reflector` matches the bank entry of the same name.
    pub fn contains_reflector(&self, reflector: &Reflector) -> bool {
        self.reflectors.get(reflector.name()).is_some_and(|known| known == reflector)
    }
}
