//! Known-answer tests for the M3 reference machine.
//!
//! Rotor I right, II middle, III left, reflector B, empty plugboard, all
//! offsets at A unless a test says otherwise.

use stecker_core::{Chunking, Engine, MachineConfig, Plugboard, SteppingMode};

fn m3(mode: SteppingMode) -> Engine {
    let mut config = MachineConfig::m3();
    config.set_stepping_mode(mode);
    Engine::from_config(&config).unwrap()
}

/// Encode, check the ciphertext, reset and check it decodes back.
fn assert_reciprocal(engine: &mut Engine, plaintext: &str, ciphertext: &str) {
    engine.reset();
    assert_eq!(engine.encode_message(plaintext, Chunking::None), ciphertext);
    engine.reset();
    assert_eq!(engine.encode_message(ciphertext, Chunking::None), plaintext);
    engine.reset();
}

/// Encode one symbol at a time, recording offsets after each.
fn offsets_per_symbol(engine: &mut Engine, text: &str) -> (String, Vec<[u8; 3]>) {
    let mut output = String::new();
    let mut offsets = Vec::new();
    for c in text.chars() {
        output.extend(engine.encode_char(c));
        offsets.push(engine.offsets());
    }
    (output, offsets)
}

#[test]
fn single_symbol_without_stepping() {
    let mut engine = m3(SteppingMode::Disabled);
    assert_reciprocal(&mut engine, "A", "N");
}

#[test]
fn full_keyboard_without_stepping() {
    let mut engine = m3(SteppingMode::Disabled);
    assert_reciprocal(&mut engine, "QWERTYUIOPASDFGHJKLZXCVBNM", "SMHIVZDRKLNQUBJEGOPYCXTFAW");
}

#[test]
fn repeated_letter_steps_substitution() {
    for mode in [SteppingMode::SimpleCarry, SteppingMode::DoubleStep] {
        let mut engine = m3(mode);
        assert_reciprocal(&mut engine, "AA", "FT");
    }
}

#[test]
fn short_message_before_first_carry() {
    for mode in [SteppingMode::SimpleCarry, SteppingMode::DoubleStep] {
        let mut engine = m3(mode);
        assert_reciprocal(&mut engine, "AQRAFDADFGBAK", "FIFMMESGOLQWM");
    }
}

#[test]
fn dirty_input_matches_pre_normalized_input() {
    let mut engine = m3(SteppingMode::SimpleCarry);
    let dirty = engine.encode_message("1234kwisatz@hader2ach", Chunking::None);
    engine.reset();
    let clean = engine.encode_message("KWISATZHADERACH", Chunking::None);
    assert_eq!(dirty, clean);
    assert_eq!(dirty, "NNJJGXXWIMIZGTQ");
}

#[test]
fn sentence_with_double_step_follows_notch_trace() {
    let mut engine = m3(SteppingMode::DoubleStep);
    let plaintext = stecker_core::normalize("So long and thanks for all the fish");
    let (ciphertext, offsets) = offsets_per_symbol(&mut engine, &plaintext);

    assert_eq!(ciphertext, "XLNZBCSCQQPWWFRUEGOHNMLPUZIM");

    // The middle rotor moves when the right rotor leaves its notch Q, on the
    // 17th keypress, and never again within this message.
    let expected: Vec<[u8; 3]> = (1..=28u8).map(|n| [n % 26, u8::from(n >= 17), 0]).collect();
    assert_eq!(offsets, expected);

    engine.reset();
    assert_eq!(
        engine.encode_message(&ciphertext, Chunking::None),
        "SOLONGANDTHANKSFORALLTHEFISH"
    );
}

#[test]
fn sentence_with_simple_carry_differs_after_notch() {
    let mut engine = m3(SteppingMode::SimpleCarry);
    let (ciphertext, offsets) = offsets_per_symbol(&mut engine, "SOLONGANDTHANKSFORALLTHEFISH");

    assert_eq!(ciphertext, "XLNZBCSCQQPWWFRUSMXKGGRLIZIM");

    // Carry happens on the full revolution instead, on the 26th keypress.
    let expected: Vec<[u8; 3]> = (1..=28u8).map(|n| [n % 26, u8::from(n >= 26), 0]).collect();
    assert_eq!(offsets, expected);
}

#[test]
fn middle_rotor_double_steps() {
    // Right rotor at O, middle rotor at D: one position short of the right
    // notch Q, and one short of the middle notch E.
    let mut engine = m3(SteppingMode::DoubleStep);
    engine.set_offsets([14, 3, 0]);

    let (ciphertext, offsets) = offsets_per_symbol(&mut engine, "AAAAAA");

    assert_eq!(ciphertext, "HDZGOV");
    assert_eq!(offsets, vec![
        [15, 3, 0],
        [16, 3, 0],
        // Right leaves Q: middle moves onto its own notch E.
        [17, 4, 0],
        // Middle at its notch: it moves again and carries the left rotor.
        [18, 5, 1],
        [19, 5, 1],
        [20, 5, 1],
    ]);

    engine.set_offsets([14, 3, 0]);
    assert_eq!(engine.encode_message("HDZGOV", Chunking::None), "AAAAAA");
}

#[test]
fn full_revolution_advances_middle_once() {
    let mut engine = m3(SteppingMode::SimpleCarry);
    engine.encode_message(&"A".repeat(26), Chunking::None);
    assert_eq!(engine.offsets(), [0, 1, 0]);

    engine.reset();
    let (_, offsets) = offsets_per_symbol(&mut engine, &"A".repeat(30));
    assert_eq!(&offsets[24..28], &[[25, 0, 0], [0, 1, 0], [1, 1, 0], [2, 1, 0]]);
}

#[test]
fn plugboard_changes_ciphertext() {
    let mut engine = m3(SteppingMode::DoubleStep);
    engine.set_plugboard(Plugboard::parse("AZ BY CX QP").unwrap());
    assert_reciprocal(&mut engine, "HELLOWORLD", "MFNXAYYFAM");

    engine.set_plugboard(Plugboard::default());
    assert_reciprocal(&mut engine, "HELLOWORLD", "MFNCZBBFZM");
}

#[test]
fn plugboard_with_starting_offsets() {
    let mut config = MachineConfig::m3();
    config.plugboard = ["AZ", "BY", "CX", "QP"].into_iter().map(String::from).collect();
    config.rotors[0].offset = 5;
    config.rotors[1].offset = 10;
    config.rotors[2].offset = 20;

    let mut engine = Engine::from_config(&config).unwrap();
    assert_eq!(engine.encode_message("hello world", Chunking::None), "WUBCITFJUH");

    let mut receiver = Engine::from_config(&config).unwrap();
    assert_eq!(receiver.encode_message("WUBCITFJUH", Chunking::None), "HELLOWORLD");
}

#[test]
fn chunked_output() {
    let mut engine = m3(SteppingMode::DoubleStep);
    assert_eq!(
        engine.encode_message("So long and thanks for all the fish", Chunking::groups(5)),
        "XLNZB CSCQQ PWWFR UEGOH NMLPU ZIM"
    );
}

#[test]
fn never_encodes_letter_as_itself() {
    let mut engine = m3(SteppingMode::DoubleStep);
    let plaintext = "A".repeat(26 * 26);
    let ciphertext = engine.encode_message(&plaintext, Chunking::None);
    assert!(!ciphertext.contains('A'));
}
