// File:    error.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: Error types for the enigma-core library.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Error types for the enigma-core library.
//!
//! Every configuration and usage error is detected eagerly, at
//! construction or setup time; character conversion itself never fails
//! once a machine is validly configured.

use std::fmt;

/// Errors produced by the enigma-core library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// An alphabet was constructed from an empty symbol string.
    EmptyAlphabet,
    /// An alphabet symbol appears more than once.
    DuplicateSymbol(char),
    /// A symbol is not part of the alphabet in use.
    SymbolNotInAlphabet(char),
    /// A cycle string has unbalanced parentheses or stray characters.
    MalformedCycles(String),
    /// A symbol appears in more than one cycle position.
    RepeatedCycleSymbol(char),
    /// A reflector's wiring maps some symbol to itself.
    NotDerangement(String),
    /// Rotor slot or pawl counts violate `1 < slots` and `pawls < slots`.
    InvalidRotorCount {
        /// Number of rotor slots requested.
        slots: usize,
        /// Number of pawls requested.
        pawls: usize,
    },
    /// Two rotors carry the same name.
    DuplicateRotorName(String),
    /// A rotor name does not exist in the catalog.
    UnknownRotorName(String),
    /// The number of selected rotor names does not fill the slots.
    WrongSelectionLength {
        /// Number of names required (one per slot).
        expected: usize,
        /// Number of names supplied.
        actual: usize,
    },
    /// A settings string does not cover exactly the non-reflector slots.
    WrongSettingLength {
        /// Required settings length (`slots - 1`).
        expected: usize,
        /// Supplied settings length.
        actual: usize,
    },
    /// A rotor or plugboard was built over a different alphabet.
    AlphabetMismatch(String),
    /// The rotor inserted into slot 0 is not a reflector.
    ReflectorRequired(String),
    /// A rotor's variant does not fit the slot it was inserted into.
    MisplacedRotor {
        /// Name of the offending rotor.
        name: String,
        /// Slot it was inserted into.
        slot: usize,
    },
    /// A non-moving rotor descriptor declares notch symbols.
    UnexpectedNotches(String),
    /// A setting line does not begin with the `*` marker.
    MissingSettingMarker,
    /// A setting line ends before all required fields were read.
    TruncatedSettingLine,
    /// The catalog has too few rotors of the named variant.
    InsufficientCatalog(String),
    /// More plugboard pairs were requested than the alphabet can hold.
    TooManyPlugboardPairs {
        /// Number of pairs requested.
        pairs: usize,
        /// Maximum number of disjoint pairs for this alphabet.
        capacity: usize,
    },
    /// The operating system entropy source failed.
    RandomSourceFailure(String),
    /// A configuration file could not be read.
    ConfigRead {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
    /// A configuration file could not be parsed.
    ConfigParse(String),
}

impl fmt::Display for EnigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnigmaError::EmptyAlphabet => {
                write!(f, "Alphabet must contain at least one symbol")
            }
            EnigmaError::DuplicateSymbol(ch) => {
                write!(f, "Duplicate symbol '{ch}' in alphabet")
            }
            EnigmaError::SymbolNotInAlphabet(ch) => {
                write!(f, "Symbol '{ch}' is not in the alphabet")
            }
            EnigmaError::MalformedCycles(detail) => {
                write!(f, "Malformed cycle notation: {detail}")
            }
            EnigmaError::RepeatedCycleSymbol(ch) => {
                write!(f, "Symbol '{ch}' appears more than once across the cycles")
            }
            EnigmaError::NotDerangement(name) => {
                write!(f, "Reflector '{name}' maps a symbol to itself")
            }
            EnigmaError::InvalidRotorCount { slots, pawls } => {
                write!(f, "Invalid machine geometry: {slots} slots, {pawls} pawls")
            }
            EnigmaError::DuplicateRotorName(name) => {
                write!(f, "Duplicate rotor name '{name}'")
            }
            EnigmaError::UnknownRotorName(name) => {
                write!(f, "No rotor named '{name}' in the catalog")
            }
            EnigmaError::WrongSelectionLength { expected, actual } => {
                write!(f, "Expected {expected} rotor names, got {actual}")
            }
            EnigmaError::WrongSettingLength { expected, actual } => {
                write!(f, "Expected a settings string of {expected} symbols, got {actual}")
            }
            EnigmaError::AlphabetMismatch(what) => {
                write!(f, "'{what}' was built over a different alphabet")
            }
            EnigmaError::ReflectorRequired(name) => {
                write!(f, "First rotor must be a reflector, '{name}' is not")
            }
            EnigmaError::MisplacedRotor { name, slot } => {
                write!(f, "Rotor '{name}' cannot occupy slot {slot}")
            }
            EnigmaError::UnexpectedNotches(name) => {
                write!(f, "Rotor '{name}' does not rotate and cannot have notches")
            }
            EnigmaError::MissingSettingMarker => {
                write!(f, "Setting line must begin with '*'")
            }
            EnigmaError::TruncatedSettingLine => {
                write!(f, "Setting line ended before all fields were given")
            }
            EnigmaError::InsufficientCatalog(variant) => {
                write!(f, "Not enough {variant} rotors in the catalog")
            }
            EnigmaError::TooManyPlugboardPairs { pairs, capacity } => {
                write!(f, "Requested {pairs} plugboard pairs, alphabet allows at most {capacity}")
            }
            EnigmaError::RandomSourceFailure(message) => {
                write!(f, "Entropy source failure: {message}")
            }
            EnigmaError::ConfigRead { path, message } => {
                write!(f, "Could not read configuration '{path}': {message}")
            }
            EnigmaError::ConfigParse(message) => {
                write!(f, "Could not parse configuration: {message}")
            }
        }
    }
}

impl std::error::Error for EnigmaError {}
