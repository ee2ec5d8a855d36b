//! Rotors and the reflector.
//!
//! A rotor is a fixed [`Wiring`] plus a rotational offset. The offset is added
//! on the way into the wiring core and subtracted on the way out, modelling
//! the rotated entry and exit contacts. It is the only state that changes
//! while a machine encodes.

use std::sync::Arc;

use crate::{
    alphabet::{ALPHABET_LEN, Letter},
    error::WiringError,
    wiring::Wiring,
};

/// Which way the signal crosses a rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the reflector (right to left).
    Entering,
    /// Back from the reflector (left to right).
    Returning,
}

/// A wired rotor with its current offset and notch positions.
///
/// Cloning a rotor shares the wiring table and copies the offset, so two
/// clones step independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    wiring: Arc<Wiring>,
    offset: u8,
    notches: Vec<Letter>,
}

impl Rotor {
    /// Create a rotor at offset 0.
    pub fn new(
        name: impl Into<String>,
        wiring: Arc<Wiring>,
        notches: impl IntoIterator<Item = Letter>,
    ) -> Self {
        let mut notches: Vec<Letter> = notches.into_iter().collect();
        notches.sort_unstable();
        notches.dedup();
        Self { name: name.into(), wiring, offset: 0, notches }
    }

    /// Same rotor at a different starting offset (reduced modulo 26).
    #[must_use]
    pub fn with_offset(mut self, offset: u8) -> Self {
        self.set_offset(offset);
        self
    }

    /// Rotor name, e.g. `"III"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared wiring table.
    pub fn wiring(&self) -> &Arc<Wiring> {
        &self.wiring
    }

    /// Current offset in `0..26`.
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Move the rotor to `offset` (reduced modulo 26).
    pub fn set_offset(&mut self, offset: u8) {
        self.offset = offset % ALPHABET_LEN as u8;
    }

    /// Letter visible in the window at the current offset.
    pub fn window(&self) -> Letter {
        Letter::A.shift(self.offset)
    }

    /// Notch positions, sorted.
    pub fn notches(&self) -> &[Letter] {
        &self.notches
    }

    /// Pass a signal through the rotor.
    pub fn transform(&self, letter: Letter, direction: Direction) -> Letter {
        let entry = letter.shift(self.offset);
        let core = match direction {
            Direction::Entering => self.wiring.forward(entry),
            Direction::Returning => self.wiring.reverse(entry),
        };
        core.unshift(self.offset)
    }

    /// Rotate by one position.
    pub fn advance(&mut self) {
        self.offset = (self.offset + 1) % ALPHABET_LEN as u8;
    }

    /// True if the window shows one of the notch positions.
    pub fn is_at_notch(&self) -> bool {
        self.notches.contains(&self.window())
    }
}

/// Parse a notch list such as `"Q"` or `"ZM"`.
pub fn parse_notches(notches: &str) -> Result<Vec<Letter>, WiringError> {
    notches
        .chars()
        .map(|c| Letter::from_char(c).ok_or(WiringError::InvalidSymbol { symbol: c }))
        .collect()
}

/// The fixed wheel that turns the signal back through the rotor stack.
///
/// Historically the reflector wiring is an involution without fixed points,
/// which is why the machine never encodes a letter as itself. This type does
/// not enforce that; legacy configurations may violate it. Use
/// [`Reflector::is_well_formed`] to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    name: String,
    wiring: Arc<Wiring>,
}

impl Reflector {
    /// Create a reflector.
    pub fn new(name: impl Into<String>, wiring: Arc<Wiring>) -> Self {
        Self { name: name.into(), wiring }
    }

    /// Reflector name, e.g. `"B"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared wiring table.
    pub fn wiring(&self) -> &Arc<Wiring> {
        &self.wiring
    }

    /// Reflect a signal.
    pub fn reflect(&self, letter: Letter) -> Letter {
        self.wiring.forward(letter)
    }

    /// True if the wiring is a self-inverse permutation with no fixed points.
    pub fn is_well_formed(&self) -> bool {
        self.wiring.is_involution() && self.wiring.fixed_points().next().is_none()
    }
}
