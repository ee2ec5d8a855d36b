//! The plugboard: optional letter swaps around the rotor stack.

use std::sync::Arc;

use crate::{alphabet::Letter, error::WiringError, wiring::Wiring};

/// Self-inverse partial swap mapping applied before and after the rotors.
///
/// Unplugged letters pass through unchanged. The default plugboard has no
/// cables and is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plugboard {
    pairs: Vec<(Letter, Letter)>,
    wiring: Arc<Wiring>,
}

impl Plugboard {
    /// Plugboard with the given cables. Each letter may appear in at most one
    /// pair.
    pub fn new(pairs: &[(Letter, Letter)]) -> Result<Self, WiringError> {
        let wiring = Wiring::from_pairs(pairs)?;
        Ok(Self { pairs: pairs.to_vec(), wiring: Arc::new(wiring) })
    }

    /// Parse whitespace-separated pairs such as `"AB CD EF"`.
    pub fn parse(text: &str) -> Result<Self, WiringError> {
        let pairs = text.split_whitespace().map(parse_pair).collect::<Result<Vec<_>, _>>()?;
        Self::new(&pairs)
    }

    /// Cables as configured.
    pub fn pairs(&self) -> &[(Letter, Letter)] {
        &self.pairs
    }

    /// Swap `letter` if it is plugged.
    pub fn swap(&self, letter: Letter) -> Letter {
        self.wiring.forward(letter)
    }

    /// True if no cables are plugged.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Parse one two-letter pair such as `"AB"`.
pub fn parse_pair(pair: &str) -> Result<(Letter, Letter), WiringError> {
    let mut chars = pair.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => {
            let a = Letter::from_char(a).ok_or(WiringError::InvalidSymbol { symbol: a })?;
            let b = Letter::from_char(b).ok_or(WiringError::InvalidSymbol { symbol: b })?;
            Ok((a, b))
        },
        _ => Err(WiringError::MalformedPair { pair: pair.to_string() }),
    }
}
