//! String-based reference machine.

use stecker_core::{ConfigurationError, MachineConfig, SteppingMode};

use super::operation::{Operation, OperationResult};

/// Positions in a full odometer cycle of three rotors.
const ODOMETER_CYCLE: usize = 26 * 26 * 26;

/// Rotor as the model sees it: a wiring string, notch letters and a
/// position.
#[derive(Debug, Clone)]
struct ModelRotor {
    wiring: String,
    notches: String,
    position: usize,
}

impl ModelRotor {
    fn window(&self) -> char {
        char::from(b'A' + self.position as u8)
    }

    fn at_notch(&self) -> bool {
        self.notches.contains(self.window())
    }

    fn forward(&self, c: char) -> char {
        let entry = (index(c) + self.position) % 26;
        let wired = self.wiring.as_bytes()[entry];
        letter((usize::from(wired - b'A') + 26 - self.position) % 26)
    }

    fn backward(&self, c: char) -> char {
        let entry = letter((index(c) + self.position) % 26);
        let wired = self.wiring.find(entry).unwrap_or(0);
        letter((wired + 26 - self.position) % 26)
    }
}

/// Reference machine.
///
/// Rotors are stored right to left. Offsets move by plain `usize`
/// arithmetic and the signal path is a sequence of character lookups.
#[derive(Debug, Clone)]
pub struct ModelMachine {
    rotors: [ModelRotor; 3],
    reflector: String,
    plugboard: Vec<(char, char)>,
    mode: SteppingMode,
}

/// Observable state for comparison with the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Offsets, right to left.
    pub offsets: [u8; 3],
}

impl ModelMachine {
    /// Build from a configuration. Lookup and validation go through the
    /// engine's resolver; everything after that is the model's own.
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigurationError> {
        let resolved = config.resolve()?;

        let rotors = resolved.rotors.map(|rotor| ModelRotor {
            wiring: rotor.wiring().to_permutation_string(),
            notches: rotor.notches().iter().map(|n| n.to_char()).collect(),
            position: usize::from(rotor.offset()),
        });

        let plugboard =
            resolved.plugboard.pairs().iter().map(|&(a, b)| (a.to_char(), b.to_char())).collect();

        Ok(Self {
            rotors,
            reflector: resolved.reflector.wiring().to_permutation_string(),
            plugboard,
            mode: resolved.mode,
        })
    }

    /// Apply an operation.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Press { key } => {
                let c = letter(usize::from(key % 26));
                OperationResult::Output(self.press(c).to_string())
            },
            Operation::Type { text } => {
                let output = text
                    .to_text()
                    .chars()
                    .filter(char::is_ascii_alphabetic)
                    .map(|c| self.press(c.to_ascii_uppercase()))
                    .collect();
                OperationResult::Output(output)
            },
            Operation::Reset => {
                for rotor in &mut self.rotors {
                    rotor.position = 0;
                }
                OperationResult::Ok
            },
            Operation::SetOffsets { right, middle, left } => {
                self.rotors[0].position = usize::from(right % 26);
                self.rotors[1].position = usize::from(middle % 26);
                self.rotors[2].position = usize::from(left % 26);
                OperationResult::Ok
            },
        }
    }

    /// Observable state.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState { offsets: self.rotors.each_ref().map(|r| r.position as u8) }
    }

    fn press(&mut self, c: char) -> char {
        self.step();

        let mut c = self.plug(c);
        for rotor in &self.rotors {
            c = rotor.forward(c);
        }
        c = self.reflector.as_bytes()[index(c)].into();
        for rotor in self.rotors.iter().rev() {
            c = rotor.backward(c);
        }
        self.plug(c)
    }

    fn step(&mut self) {
        match self.mode {
            SteppingMode::Disabled => {},
            SteppingMode::SimpleCarry => {
                let [right, middle, left] = self.rotors.each_ref().map(|r| r.position);
                let value = (right + 26 * middle + 676 * left + 1) % ODOMETER_CYCLE;
                self.rotors[0].position = value % 26;
                self.rotors[1].position = value / 26 % 26;
                self.rotors[2].position = value / 676;
            },
            SteppingMode::DoubleStep => {
                // Pawls read the notches before anything moves.
                let middle_pawl = self.rotors[0].at_notch();
                let left_pawl = self.rotors[1].at_notch();

                self.rotors[0].position = (self.rotors[0].position + 1) % 26;
                if middle_pawl || left_pawl {
                    self.rotors[1].position = (self.rotors[1].position + 1) % 26;
                }
                if left_pawl {
                    self.rotors[2].position = (self.rotors[2].position + 1) % 26;
                }
            },
        }
    }

    fn plug(&self, c: char) -> char {
        self.plugboard
            .iter()
            .find_map(|&(a, b)| match c {
                _ if c == a => Some(b),
                _ if c == b => Some(a),
                _ => None,
            })
            .unwrap_or(c)
    }
}

fn index(c: char) -> usize {
    usize::from(c as u8 - b'A')
}

fn letter(i: usize) -> char {
    char::from(b'A' + i as u8)
}
