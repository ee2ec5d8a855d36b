//! Rotor stepping.
//!
//! The controller runs once per symbol, before the symbol enters the
//! plugboard. It keeps no state of its own: every decision is made from the
//! rotors' current offsets.
//!
//! # Modes
//!
//! - [`SteppingMode::DoubleStep`]: the notch and pawl mechanism of the
//!   historical machine, including the middle rotor's double step. Default.
//! - [`SteppingMode::SimpleCarry`]: odometer carry. A rotor that completes a
//!   revolution (wraps back to offset 0) advances its left neighbour.
//! - [`SteppingMode::Disabled`]: nothing moves; every position uses the same
//!   substitution.
//!
//! The two moving modes are separate algorithms and are never combined.

use std::fmt;

use crate::rotor::Rotor;

/// Number of rotors in the stack.
pub const ROTOR_COUNT: usize = 3;

/// Rotors ordered right, middle, left (signal entry order).
pub type RotorStack = [Rotor; ROTOR_COUNT];

/// Position of a rotor in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Fast rotor, nearest the keyboard. Advances on every symbol.
    Right,
    /// Middle rotor.
    Middle,
    /// Slow rotor, next to the reflector.
    Left,
}

impl Slot {
    /// All slots in signal entry order.
    pub const ALL: [Self; ROTOR_COUNT] = [Self::Right, Self::Middle, Self::Left];

    /// Index into a [`RotorStack`].
    pub fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Middle => 1,
            Self::Left => 2,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Right => "right",
            Self::Middle => "middle",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// How the rotors advance between symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SteppingMode {
    /// No rotor moves.
    Disabled,
    /// Odometer carry on full revolutions.
    SimpleCarry,
    /// Notch-driven stepping with the middle rotor double step.
    #[default]
    DoubleStep,
}

impl SteppingMode {
    /// Map the two configuration flags onto a mode.
    ///
    /// `double_step` is ignored when `stepping` is off.
    pub fn from_flags(stepping: bool, double_step: bool) -> Self {
        match (stepping, double_step) {
            (false, _) => Self::Disabled,
            (true, false) => Self::SimpleCarry,
            (true, true) => Self::DoubleStep,
        }
    }

    /// Whether any rotor moves in this mode.
    pub fn is_stepping(self) -> bool {
        self != Self::Disabled
    }

    /// Whether the notch mechanism with the middle rotor double step is in
    /// use.
    pub fn is_double_step(self) -> bool {
        self == Self::DoubleStep
    }
}

/// Which rotors moved during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advances([bool; ROTOR_COUNT]);

impl Advances {
    /// True if the rotor in `slot` moved.
    pub fn contains(self, slot: Slot) -> bool {
        self.0[slot.index()]
    }

    /// Slots that moved, right to left.
    pub fn slots(self) -> impl Iterator<Item = Slot> {
        Slot::ALL.into_iter().filter(move |&slot| self.contains(slot))
    }

    fn advance(&mut self, rotors: &mut RotorStack, slot: Slot) {
        rotors[slot.index()].advance();
        self.0[slot.index()] = true;
    }
}

/// Applies a [`SteppingMode`] to a rotor stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SteppingController {
    mode: SteppingMode,
}

impl SteppingController {
    /// Controller for the given mode.
    pub fn new(mode: SteppingMode) -> Self {
        Self { mode }
    }

    /// Active mode.
    pub fn mode(self) -> SteppingMode {
        self.mode
    }

    /// Advance the rotors for one keypress.
    pub fn step(self, rotors: &mut RotorStack) -> Advances {
        match self.mode {
            SteppingMode::Disabled => Advances::default(),
            SteppingMode::SimpleCarry => step_simple_carry(rotors),
            SteppingMode::DoubleStep => step_double(rotors),
        }
    }
}

fn step_simple_carry(rotors: &mut RotorStack) -> Advances {
    let mut advances = Advances::default();

    for slot in Slot::ALL {
        advances.advance(rotors, slot);
        // Carry only on a completed revolution. The left rotor has no
        // neighbour, so the loop ends there regardless.
        if rotors[slot.index()].offset() != 0 {
            break;
        }
    }

    advances
}

fn step_double(rotors: &mut RotorStack) -> Advances {
    let mut advances = Advances::default();

    // Both notch tests read the windows before anything moves.
    let right_at_notch = rotors[Slot::Right.index()].is_at_notch();
    let middle_at_notch = rotors[Slot::Middle.index()].is_at_notch();

    if middle_at_notch {
        // The middle rotor's own notch engages the left pawl, which pushes
        // both the left rotor and the middle rotor. This second move on
        // consecutive keypresses is the double step.
        advances.advance(rotors, Slot::Middle);
        advances.advance(rotors, Slot::Left);
    } else if right_at_notch {
        advances.advance(rotors, Slot::Middle);
    }

    advances.advance(rotors, Slot::Right);
    advances
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{alphabet::Letter, wiring::Wiring};

    fn rotor(notch: char, offset: u8) -> Rotor {
        let notch = Letter::from_char(notch).unwrap();
        Rotor::new("test", Arc::new(Wiring::identity()), [notch]).with_offset(offset)
    }

    fn stack(offsets: [u8; 3]) -> RotorStack {
        // Right notch Q, middle notch E, left notch V.
        [rotor('Q', offsets[0]), rotor('E', offsets[1]), rotor('V', offsets[2])]
    }

    fn offsets(rotors: &RotorStack) -> [u8; 3] {
        [rotors[0].offset(), rotors[1].offset(), rotors[2].offset()]
    }

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(SteppingMode::from_flags(false, true), SteppingMode::Disabled);
        assert_eq!(SteppingMode::from_flags(false, false), SteppingMode::Disabled);
        assert_eq!(SteppingMode::from_flags(true, false), SteppingMode::SimpleCarry);
        assert_eq!(SteppingMode::from_flags(true, true), SteppingMode::DoubleStep);
        assert_eq!(SteppingMode::default(), SteppingMode::DoubleStep);
    }

    #[test]
    fn predicates_match_mode() {
        assert!(!SteppingMode::Disabled.is_stepping());
        assert!(!SteppingMode::Disabled.is_double_step());
        assert!(SteppingMode::SimpleCarry.is_stepping());
        assert!(!SteppingMode::SimpleCarry.is_double_step());
        assert!(SteppingMode::DoubleStep.is_stepping());
        assert!(SteppingMode::DoubleStep.is_double_step());
    }

    #[test]
    fn disabled_moves_nothing() {
        let mut rotors = stack([16, 4, 0]);
        let advances = SteppingController::new(SteppingMode::Disabled).step(&mut rotors);
        assert_eq!(offsets(&rotors), [16, 4, 0]);
        assert_eq!(advances.slots().count(), 0);
    }

    #[test]
    fn simple_carry_moves_right_only_mid_revolution() {
        let mut rotors = stack([16, 4, 0]);
        let advances = SteppingController::new(SteppingMode::SimpleCarry).step(&mut rotors);
        assert_eq!(offsets(&rotors), [17, 4, 0]);
        assert_eq!(advances.slots().collect::<Vec<_>>(), vec![Slot::Right]);
    }

    #[test]
    fn simple_carry_ripples_on_full_revolutions() {
        let mut rotors = stack([25, 25, 7]);
        let advances = SteppingController::new(SteppingMode::SimpleCarry).step(&mut rotors);
        assert_eq!(offsets(&rotors), [0, 0, 8]);
        assert_eq!(advances.slots().collect::<Vec<_>>(), Slot::ALL.to_vec());
    }

    #[test]
    fn simple_carry_left_wraps_without_further_carry() {
        let mut rotors = stack([25, 25, 25]);
        SteppingController::new(SteppingMode::SimpleCarry).step(&mut rotors);
        assert_eq!(offsets(&rotors), [0, 0, 0]);
    }

    #[test]
    fn double_step_right_notch_moves_middle() {
        // Right at Q (16).
        let mut rotors = stack([16, 0, 0]);
        let advances = SteppingController::new(SteppingMode::DoubleStep).step(&mut rotors);
        assert_eq!(offsets(&rotors), [17, 1, 0]);
        assert!(advances.contains(Slot::Middle));
        assert!(!advances.contains(Slot::Left));
    }

    #[test]
    fn double_step_sequence() {
        // Right at O, middle at D: the middle rotor moves onto its notch E,
        // then immediately moves again and carries the left rotor.
        let controller = SteppingController::new(SteppingMode::DoubleStep);
        let mut rotors = stack([14, 3, 0]);
        let mut trace = Vec::new();
        for _ in 0..5 {
            controller.step(&mut rotors);
            trace.push(offsets(&rotors));
        }
        assert_eq!(trace, vec![[15, 3, 0], [16, 3, 0], [17, 4, 0], [18, 5, 1], [19, 5, 1]]);
    }

    #[test]
    fn double_step_left_at_notch_causes_no_further_carry() {
        // Left sits on its own notch V (21); nothing is to its left.
        let mut rotors = stack([0, 0, 21]);
        SteppingController::new(SteppingMode::DoubleStep).step(&mut rotors);
        assert_eq!(offsets(&rotors), [1, 0, 21]);
    }

    #[test]
    fn slot_indices_follow_signal_order() {
        let indices: Vec<_> = Slot::ALL.iter().map(|slot| slot.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(Slot::Middle.to_string(), "middle");
    }
}
