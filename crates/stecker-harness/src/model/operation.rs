//! Operations for model-based testing.
//!
//! Operations are generated randomly and applied to both the model and the
//! real engine.

use arbitrary::Arbitrary;

/// Operations that can be applied to a machine.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Press a single key (`key % 26` selects the letter).
    Press {
        /// Key index.
        key: u8,
    },

    /// Type a message, including characters outside the alphabet.
    Type {
        /// Message content.
        text: SmallText,
    },

    /// Return every rotor to offset 0.
    Reset,

    /// Move the rotors (each offset reduced modulo 26).
    SetOffsets {
        /// Right rotor.
        right: u8,
        /// Middle rotor.
        middle: u8,
        /// Left rotor.
        left: u8,
    },
}

/// Compact message description for testing.
///
/// Expanded deterministically so shrunk test cases stay readable.
#[derive(Debug, Clone, Arbitrary)]
pub struct SmallText {
    /// Content seed.
    pub seed: u8,
    /// Length in characters (0-63).
    pub len: u8,
}

impl SmallText {
    /// Expand to message text. Roughly one in eight characters is noise
    /// (digit, space or punctuation) and lowercase letters are mixed in.
    pub fn to_text(&self) -> String {
        const NOISE: &[u8] = b" 0123456789.,!?@-";

        (0..self.len % 64)
            .map(|i| {
                let x = self.seed.wrapping_mul(31).wrapping_add(i.wrapping_mul(17));
                match x % 8 {
                    0 => char::from(NOISE[usize::from(x / 8) % NOISE.len()]),
                    1 => char::from(b'a' + x % 26),
                    _ => char::from(b'A' + x % 26),
                }
            })
            .collect()
    }
}

/// Result of applying an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation produced no output.
    Ok,

    /// Encoded output.
    Output(String),
}
