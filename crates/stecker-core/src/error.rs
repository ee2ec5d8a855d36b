//! Construction-time errors.
//!
//! Once an [`crate::Engine`] exists, encoding cannot fail. Everything that can
//! go wrong is caught while building wirings or validating a configuration.

use thiserror::Error;

/// A permutation or swap list that is not a valid wiring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WiringError {
    /// Permutation string does not contain exactly 26 symbols.
    #[error("expected 26 symbols, got {len}")]
    Length {
        /// Number of symbols supplied.
        len: usize,
    },

    /// Symbol outside `A..=Z`.
    #[error("symbol {symbol:?} is not in the alphabet")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
    },

    /// Symbol used more than once.
    #[error("symbol {symbol} appears more than once")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// Swap pair that connects a symbol to itself.
    #[error("symbol {symbol} cannot be paired with itself")]
    SelfPair {
        /// The symbol.
        symbol: char,
    },

    /// Swap pair that is not exactly two symbols.
    #[error("pair {pair:?} must be exactly two symbols")]
    MalformedPair {
        /// The pair text as supplied.
        pair: String,
    },
}

/// A machine configuration that cannot produce a working engine.
///
/// Variants carry the field path of the offending value, e.g.
/// `rotor_bank[0].wiring` or `rotors[2].offset`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Schema version this build does not understand.
    #[error("unsupported configuration version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the configuration.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// Malformed wiring, notch list or plugboard pair.
    #[error("{field}: {source}")]
    Wiring {
        /// Field path of the wiring.
        field: String,
        /// Underlying wiring defect.
        #[source]
        source: WiringError,
    },

    /// Not exactly three rotors selected.
    #[error("rotors: expected exactly 3 rotors, got {count}")]
    RotorCount {
        /// Number of rotors supplied.
        count: usize,
    },

    /// Starting offset outside `0..26`.
    #[error("{field}: offset {offset} is outside 0..26")]
    OffsetOutOfRange {
        /// Field path of the offset.
        field: String,
        /// The offending offset.
        offset: u8,
    },

    /// Rotor name not present in the bank.
    #[error("{field}: unknown rotor {name:?}")]
    UnknownRotor {
        /// Field path of the selection.
        field: String,
        /// Requested rotor name.
        name: String,
    },

    /// Reflector name not present in the bank.
    #[error("reflector: unknown reflector {name:?}")]
    UnknownReflector {
        /// Requested reflector name.
        name: String,
    },

    /// Rotor or reflector definition without a name.
    #[error("{field}: name must not be empty")]
    EmptyName {
        /// Field path of the definition.
        field: String,
    },
}

impl ConfigurationError {
    /// Returns true if the error comes from a missing bank entry rather than
    /// malformed data.
    ///
    /// Lookup errors can be fixed by extending the bank; the configuration
    /// itself is well-formed.
    pub fn is_lookup_error(&self) -> bool {
        match self {
            Self::UnknownRotor { .. } | Self::UnknownReflector { .. } => true,

            Self::UnsupportedVersion { .. }
            | Self::Wiring { .. }
            | Self::RotorCount { .. }
            | Self::OffsetOutOfRange { .. }
            | Self::EmptyName { .. } => false,
        }
    }

    pub(crate) fn wiring(field: impl Into<String>, source: WiringError) -> Self {
        Self::Wiring { field: field.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rotor_is_lookup_error() {
        let err = ConfigurationError::UnknownRotor {
            field: "rotors[0].name".to_string(),
            name: "IX".to_string(),
        };
        assert!(err.is_lookup_error());
    }

    #[test]
    fn wiring_error_is_not_lookup_error() {
        let err = ConfigurationError::wiring("reflector_bank[0].wiring", WiringError::Length {
            len: 3,
        });
        assert!(!err.is_lookup_error());
    }

    #[test]
    fn error_display_names_field() {
        let err = ConfigurationError::wiring("rotor_bank[1].wiring", WiringError::DuplicateSymbol {
            symbol: 'Q',
        });
        assert_eq!(err.to_string(), "rotor_bank[1].wiring: symbol Q appears more than once");

        let err =
            ConfigurationError::OffsetOutOfRange { field: "rotors[2].offset".into(), offset: 30 };
        assert_eq!(err.to_string(), "rotors[2].offset: offset 30 is outside 0..26");
    }
}
