//! The fixed 26-symbol alphabet.
//!
//! Every component addresses symbols by their position `0..26`, so a
//! [`Letter`] is a bounds-checked index rather than a `char`. Conversions to
//! and from `char` happen only at the edges (text normalization, display).

use std::fmt;

/// Number of symbols in the alphabet.
pub const ALPHABET_LEN: usize = 26;

/// A single alphabet symbol, `A` through `Z`.
///
/// # Invariants
///
/// - The wrapped index is always `< ALPHABET_LEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// The first symbol, also the zero offset.
    pub const A: Self = Self(0);

    /// Letter at `index`, or `None` if the index is outside the alphabet.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < ALPHABET_LEN { u8::try_from(index).ok().map(Self) } else { None }
    }

    /// Letter for an uppercase ASCII character.
    ///
    /// Lowercase input is rejected here; normalization is the caller's job
    /// (see [`crate::text::normalize`]).
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() { Some(Self(c as u8 - b'A')) } else { None }
    }

    /// Position of this letter in the alphabet.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Uppercase ASCII character for this letter.
    pub fn to_char(self) -> char {
        char::from(b'A' + self.0)
    }

    /// Letter `by` positions further along, wrapping past `Z`.
    pub fn shift(self, by: u8) -> Self {
        Self(((u16::from(self.0) + u16::from(by)) % ALPHABET_LEN as u16) as u8)
    }

    /// Letter `by` positions back, wrapping past `A`.
    ///
    /// Uses floored modulo so the result is always in range, whatever the
    /// magnitude of `by`.
    pub fn unshift(self, by: u8) -> Self {
        let raw = i16::from(self.0) - i16::from(by);
        Self(raw.rem_euclid(ALPHABET_LEN as i16) as u8)
    }

    /// All letters in alphabet order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ALPHABET_LEN as u8).map(Self)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.to_char()
    }
}
