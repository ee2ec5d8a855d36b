//! Fuzz target for [`MachineConfig`] parsing and validation.
//!
//! Feed arbitrary bytes to the JSON schema, then arbitrary schema-valid
//! configurations to the resolver.
//!
//! # Invariants
//!
//! - Parsing and validation return errors, NEVER panic
//! - A configuration that parses serializes and parses back unchanged
//! - A configuration that builds an engine snapshots to one that builds an
//!   engine with identical behaviour
//! - Every validation error renders a non-empty message

#![no_main]

use libfuzzer_sys::fuzz_target;
use stecker_core::{Chunking, Engine, MachineConfig};

const PROBE: &str = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<MachineConfig>(data) else {
        return;
    };

    let Ok(text) = serde_json::to_string(&config) else {
        panic!("parsed configuration failed to serialize");
    };
    let reparsed: Result<MachineConfig, _> = serde_json::from_str(&text);
    assert!(matches!(reparsed, Ok(ref again) if *again == config));

    match Engine::from_config(&config) {
        Ok(mut engine) => {
            let Ok(mut snapshot) = Engine::from_config(&engine.to_config()) else {
                panic!("snapshot of a valid engine was rejected");
            };
            assert_eq!(
                engine.encode_message(PROBE, Chunking::None),
                snapshot.encode_message(PROBE, Chunking::None)
            );
        },
        Err(err) => {
            assert!(!err.to_string().is_empty());
        },
    }
});
