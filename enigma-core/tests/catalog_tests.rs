#![allow(missing_docs)]
use std::collections::HashSet;
use std::fs;

use enigma_core::catalog::{MachineDescriptor, RotorVariant};
use enigma_core::error::EnigmaError;
use enigma_core::permutation::Permutation;
use enigma_core::session_key::random_session_key;
use tempfile::tempdir;

const TOY_CONFIG: &str = r#"{
    "alphabet": "ABCD",
    "rotor_slots": 2,
    "pawls": 0,
    "rotors": [
        { "name": "R", "variant": "reflector", "wiring": "(AB) (CD)" },
        { "name": "F", "variant": "fixed", "wiring": "(BACD)" }
    ]
}"#;

const SESSION_CONFIG: &str = r#"{
    "alphabet": "ABCDEFGH",
    "rotor_slots": 4,
    "pawls": 2,
    "rotors": [
        { "name": "R1", "variant": "reflector", "wiring": "(AB) (CD) (EF) (GH)" },
        { "name": "R2", "variant": "reflector", "wiring": "(AC) (BD) (EG) (FH)" },
        { "name": "F1", "variant": "fixed", "wiring": "(ABCDEFGH)" },
        { "name": "F2", "variant": "fixed", "wiring": "(HGFEDCBA)" },
        { "name": "M1", "variant": "moving", "notches": "A", "wiring": "(AEBFCGDH)" },
        { "name": "M2", "variant": "moving", "notches": "BC", "wiring": "(AHBGCFDE)" },
        { "name": "M3", "variant": "moving", "notches": "H", "wiring": "(AB) (CDEFGH)" }
    ]
}"#;

#[test]
fn test_descriptor_round_trip() {
    let descriptor = MachineDescriptor::from_json(TOY_CONFIG).unwrap();
    assert_eq!(descriptor.alphabet, "ABCD");
    assert_eq!(descriptor.rotor_slots, 2);
    assert_eq!(descriptor.pawls, 0);
    assert_eq!(descriptor.rotors.len(), 2);
    assert_eq!(descriptor.rotors[0].variant, RotorVariant::Reflector);
    assert_eq!(descriptor.rotors[1].notches, "");

    let json = serde_json::to_string(&descriptor).unwrap();
    let reparsed = MachineDescriptor::from_json(&json).unwrap();
    assert_eq!(reparsed.rotors[1].wiring, "(BACD)");
}

#[test]
fn test_descriptor_builds_a_working_machine() {
    let descriptor = MachineDescriptor::from_json(TOY_CONFIG).unwrap();
    let mut machine = descriptor.build().unwrap();
    machine.insert_rotors(&["R", "F"]).unwrap();
    machine.set_rotors("A").unwrap();
    assert_eq!(machine.convert_message("A").unwrap(), "C");
}

#[test]
fn test_unusable_variant_tag_is_a_parse_error() {
    let bad = TOY_CONFIG.replace("\"fixed\"", "\"sliding\"");
    assert!(matches!(
        MachineDescriptor::from_json(&bad).unwrap_err(),
        EnigmaError::ConfigParse(_)
    ));
}

#[test]
fn test_notches_on_non_moving_rotor_are_rejected() {
    let bad = TOY_CONFIG.replace(
        "\"name\": \"F\", \"variant\": \"fixed\",",
        "\"name\": \"F\", \"variant\": \"fixed\", \"notches\": \"A\",",
    );
    let descriptor = MachineDescriptor::from_json(&bad).unwrap();
    assert_eq!(
        descriptor.build().unwrap_err(),
        EnigmaError::UnexpectedNotches("F".to_string())
    );
}

#[test]
fn test_reflector_wiring_must_be_a_derangement() {
    let bad = TOY_CONFIG.replace("(AB) (CD)", "(AB)");
    let descriptor = MachineDescriptor::from_json(&bad).unwrap();
    assert_eq!(
        descriptor.build().unwrap_err(),
        EnigmaError::NotDerangement("R".to_string())
    );
}

#[test]
fn test_load_reads_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.json");
    fs::write(&path, TOY_CONFIG).unwrap();
    let descriptor = MachineDescriptor::load(&path).unwrap();
    assert_eq!(descriptor.alphabet, "ABCD");
}

#[test]
fn test_load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        MachineDescriptor::load(&path).unwrap_err(),
        EnigmaError::ConfigRead { .. }
    ));
}

#[test]
fn test_session_key_fills_every_slot_correctly() {
    let descriptor = MachineDescriptor::from_json(SESSION_CONFIG).unwrap();
    let reflectors: HashSet<&str> = ["R1", "R2"].into();
    let fixed: HashSet<&str> = ["F1", "F2"].into();
    let moving: HashSet<&str> = ["M1", "M2", "M3"].into();

    for _ in 0..8 {
        let key = random_session_key(&descriptor, 0).unwrap();
        assert_eq!(key.rotors.len(), 4);
        assert!(reflectors.contains(key.rotors[0].as_str()));
        assert!(fixed.contains(key.rotors[1].as_str()));
        assert!(moving.contains(key.rotors[2].as_str()));
        assert!(moving.contains(key.rotors[3].as_str()));
        assert_ne!(key.rotors[2], key.rotors[3]);
        assert_eq!(key.setting.chars().count(), 3);
        assert!(key.setting.chars().all(|ch| descriptor.alphabet.contains(ch)));
        assert_eq!(key.plugboard, "");
    }
}

#[test]
fn test_session_key_plugboard_pairs_are_disjoint() {
    let descriptor = MachineDescriptor::from_json(SESSION_CONFIG).unwrap();
    let key = random_session_key(&descriptor, 3).unwrap();

    let symbols: Vec<char> = key
        .plugboard
        .chars()
        .filter(|ch| !matches!(ch, '(' | ')' | ' '))
        .collect();
    assert_eq!(symbols.len(), 6);
    let distinct: HashSet<char> = symbols.iter().copied().collect();
    assert_eq!(distinct.len(), 6);

    // The generated notation must parse over the machine's alphabet.
    let alphabet = enigma_core::alphabet::Alphabet::new(&descriptor.alphabet).unwrap();
    assert!(Permutation::new(&key.plugboard, alphabet).is_ok());
}

#[test]
fn test_session_key_keys_a_machine() {
    let descriptor = MachineDescriptor::from_json(SESSION_CONFIG).unwrap();
    let key = random_session_key(&descriptor, 2).unwrap();
    let mut machine = descriptor.build().unwrap();
    machine.insert_rotors(&key.rotors).unwrap();
    assert!(machine.rotor(0).reflecting());
    machine.set_rotors(&key.setting).unwrap();
    let plugboard = Permutation::new(&key.plugboard, machine.alphabet().clone()).unwrap();
    machine.set_plugboard(plugboard).unwrap();

    let ciphertext = machine.convert_message("ABCD").unwrap();
    assert_eq!(ciphertext.chars().count(), 4);
}

#[test]
fn test_session_key_rejects_impossible_requests() {
    let descriptor = MachineDescriptor::from_json(SESSION_CONFIG).unwrap();
    assert_eq!(
        random_session_key(&descriptor, 5).unwrap_err(),
        EnigmaError::TooManyPlugboardPairs {
            pairs: 5,
            capacity: 4
        }
    );

    let mut starved = MachineDescriptor::from_json(SESSION_CONFIG).unwrap();
    starved.rotors.retain(|rotor| rotor.variant != RotorVariant::Reflector);
    assert_eq!(
        random_session_key(&starved, 0).unwrap_err(),
        EnigmaError::InsufficientCatalog("reflector".to_string())
    );

    let mut cramped = MachineDescriptor::from_json(SESSION_CONFIG).unwrap();
    cramped.pawls = 4;
    assert_eq!(
        random_session_key(&cramped, 0).unwrap_err(),
        EnigmaError::InvalidRotorCount { slots: 4, pawls: 4 }
    );
}
