//! Bijective symbol mappings.
//!
//! A [`Wiring`] stores both directions of a permutation in fixed-size tables
//! indexed by [`Letter`], so forward and reverse lookups are O(1) and cannot
//! go out of bounds. Rotors, reflectors and the plugboard all share this type.
//!
//! # Invariants
//!
//! - `reverse[forward[s]] == s` for every letter `s`
//! - Both tables are total bijections over the alphabet
//! - Immutable after construction

use crate::{
    alphabet::{ALPHABET_LEN, Letter},
    error::WiringError,
};

/// A permutation of the alphabet together with its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wiring {
    forward: [Letter; ALPHABET_LEN],
    reverse: [Letter; ALPHABET_LEN],
}

impl Wiring {
    /// The identity mapping.
    pub fn identity() -> Self {
        let mut table = [Letter::A; ALPHABET_LEN];
        for letter in Letter::all() {
            table[letter.index()] = letter;
        }
        Self { forward: table, reverse: table }
    }

    /// Parse a 26-letter permutation string such as `"EKMFLGDQVZNTOWYHXUSPAIBRCJ"`.
    ///
    /// Position `i` of the string is the image of the `i`-th alphabet letter.
    pub fn from_permutation(permutation: &str) -> Result<Self, WiringError> {
        let len = permutation.chars().count();
        if len != ALPHABET_LEN {
            return Err(WiringError::Length { len });
        }

        let mut forward = [Letter::A; ALPHABET_LEN];
        let mut seen = [false; ALPHABET_LEN];

        for (position, c) in permutation.chars().enumerate() {
            let image = Letter::from_char(c).ok_or(WiringError::InvalidSymbol { symbol: c })?;
            if seen[image.index()] {
                return Err(WiringError::DuplicateSymbol { symbol: image.to_char() });
            }
            seen[image.index()] = true;
            forward[position] = image;
        }

        Ok(Self::from_forward(forward))
    }

    /// Build a self-inverse mapping from disjoint letter swaps.
    ///
    /// Letters that do not appear in any pair map to themselves.
    pub fn from_pairs(pairs: &[(Letter, Letter)]) -> Result<Self, WiringError> {
        let mut forward = Self::identity().forward;
        let mut used = [false; ALPHABET_LEN];

        for &(a, b) in pairs {
            if a == b {
                return Err(WiringError::SelfPair { symbol: a.to_char() });
            }
            for letter in [a, b] {
                if used[letter.index()] {
                    return Err(WiringError::DuplicateSymbol { symbol: letter.to_char() });
                }
                used[letter.index()] = true;
            }
            forward[a.index()] = b;
            forward[b.index()] = a;
        }

        Ok(Self::from_forward(forward))
    }

    /// Derive the reverse table. `forward` must already be a bijection.
    fn from_forward(forward: [Letter; ALPHABET_LEN]) -> Self {
        let mut reverse = [Letter::A; ALPHABET_LEN];
        for letter in Letter::all() {
            reverse[forward[letter.index()].index()] = letter;
        }
        Self { forward, reverse }
    }

    /// Image of `letter` under the mapping.
    pub fn forward(&self, letter: Letter) -> Letter {
        self.forward[letter.index()]
    }

    /// Preimage of `letter` under the mapping.
    pub fn reverse(&self, letter: Letter) -> Letter {
        self.reverse[letter.index()]
    }

    /// True if applying the mapping twice is the identity.
    pub fn is_involution(&self) -> bool {
        self.forward == self.reverse
    }

    /// Letters that map to themselves.
    pub fn fixed_points(&self) -> impl Iterator<Item = Letter> + '_ {
        Letter::all().filter(|&letter| self.forward(letter) == letter)
    }

    /// The forward table as a 26-letter permutation string.
    pub fn to_permutation_string(&self) -> String {
        self.forward.iter().map(|letter| letter.to_char()).collect()
    }
}

impl Default for Wiring {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn forward_and_reverse_are_inverse() {
        let wiring = Wiring::from_permutation(ROTOR_I).unwrap();
        for s in Letter::all() {
            assert_eq!(wiring.reverse(wiring.forward(s)), s);
            assert_eq!(wiring.forward(wiring.reverse(s)), s);
        }
        assert_eq!(wiring.forward(letter('A')), letter('E'));
        assert_eq!(wiring.reverse(letter('E')), letter('A'));
    }

    #[test]
    fn permutation_string_roundtrip() {
        let wiring = Wiring::from_permutation(ROTOR_I).unwrap();
        assert_eq!(wiring.to_permutation_string(), ROTOR_I);
    }

    #[test]
    fn rejects_short_permutation() {
        let err = Wiring::from_permutation("ABC").unwrap_err();
        assert_eq!(err, WiringError::Length { len: 3 });
    }

    #[test]
    fn rejects_duplicate_symbol() {
        let err = Wiring::from_permutation("AACDEFGHIJKLMNOPQRSTUVWXYZ").unwrap_err();
        assert_eq!(err, WiringError::DuplicateSymbol { symbol: 'A' });
    }

    #[test]
    fn rejects_lowercase_symbol() {
        let err = Wiring::from_permutation("aBCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap_err();
        assert_eq!(err, WiringError::InvalidSymbol { symbol: 'a' });
    }

    #[test]
    fn pairs_are_self_inverse() {
        let wiring = Wiring::from_pairs(&[(letter('A'), letter('Z')), (letter('Q'), letter('P'))])
            .unwrap();
        assert!(wiring.is_involution());
        assert_eq!(wiring.forward(letter('A')), letter('Z'));
        assert_eq!(wiring.forward(letter('P')), letter('Q'));
        assert_eq!(wiring.forward(letter('M')), letter('M'));
        assert_eq!(wiring.fixed_points().count(), 22);
    }

    #[test]
    fn pairs_reject_reuse_and_self_pair() {
        let reuse = Wiring::from_pairs(&[(letter('A'), letter('B')), (letter('B'), letter('C'))]);
        assert_eq!(reuse.unwrap_err(), WiringError::DuplicateSymbol { symbol: 'B' });

        let selfie = Wiring::from_pairs(&[(letter('K'), letter('K'))]);
        assert_eq!(selfie.unwrap_err(), WiringError::SelfPair { symbol: 'K' });
    }

    #[test]
    fn identity_has_every_fixed_point() {
        let wiring = Wiring::identity();
        assert!(wiring.is_involution());
        assert_eq!(wiring.fixed_points().count(), ALPHABET_LEN);
    }
}
