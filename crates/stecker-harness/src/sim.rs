//! Seeded random machines.
//!
//! Every machine is a pure function of its seed: custom rotor wirings,
//! a fixed-point-free involution reflector, plugboard pairs, starting offsets
//! and stepping mode all come from one [`ChaCha8Rng`] stream.

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use stecker_core::{
    CONFIG_VERSION, MachineConfig, ReflectorDefinition, RotorDefinition, RotorSelection,
    SteppingMode,
};

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Name of the generated reflector.
pub const SIM_REFLECTOR: &str = "SIM";

/// Generate a valid machine configuration from a seed.
///
/// Rotors are named `SIM-0` (right) to `SIM-2` (left) and carry one or two
/// notches. The plugboard holds 0 to 13 pairs.
pub fn random_config(seed: u64) -> MachineConfig {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let rotor_bank: Vec<RotorDefinition> = (0..3)
        .map(|i| {
            let mut notches = LETTERS.to_vec();
            notches.shuffle(&mut rng);
            notches.truncate(rng.gen_range(1..=2));
            notches.sort_unstable();

            RotorDefinition {
                name: format!("SIM-{i}"),
                wiring: permutation(&mut rng),
                notches: String::from_utf8_lossy(&notches).into_owned(),
            }
        })
        .collect();

    let rotors = rotor_bank
        .iter()
        .map(|definition| RotorSelection::new(definition.name.clone(), rng.gen_range(0..26)))
        .collect();

    let mode = match rng.gen_range(0..4) {
        0 => SteppingMode::Disabled,
        1 => SteppingMode::SimpleCarry,
        _ => SteppingMode::DoubleStep,
    };

    let mut config = MachineConfig {
        version: CONFIG_VERSION,
        name: format!("sim-{seed:016x}"),
        plugboard: plugboard(&mut rng),
        rotors,
        reflector: SIM_REFLECTOR.to_string(),
        stepping: true,
        double_step: true,
        rotor_bank,
        reflector_bank: vec![ReflectorDefinition {
            name: SIM_REFLECTOR.to_string(),
            wiring: involution(&mut rng),
        }],
    };
    config.set_stepping_mode(mode);
    config
}

/// Uppercase plaintext of `len` letters drawn from `rng`.
pub fn random_plaintext(rng: &mut impl Rng, len: usize) -> String {
    (0..len).map(|_| char::from(LETTERS[rng.gen_range(0..26)])).collect()
}

fn permutation(rng: &mut ChaCha8Rng) -> String {
    let mut letters = LETTERS.to_vec();
    letters.shuffle(rng);
    String::from_utf8_lossy(&letters).into_owned()
}

/// Shuffle, then pair neighbours: 13 disjoint swaps, no fixed points.
fn involution(rng: &mut ChaCha8Rng) -> String {
    let mut letters = LETTERS.to_vec();
    letters.shuffle(rng);

    let mut wiring = *LETTERS;
    for pair in letters.chunks_exact(2) {
        wiring[usize::from(pair[0] - b'A')] = pair[1];
        wiring[usize::from(pair[1] - b'A')] = pair[0];
    }
    String::from_utf8_lossy(&wiring).into_owned()
}

fn plugboard(rng: &mut ChaCha8Rng) -> Vec<String> {
    let mut letters = LETTERS.to_vec();
    letters.shuffle(rng);
    let pairs = rng.gen_range(0..=13);

    letters
        .chunks_exact(2)
        .take(pairs)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect()
}
