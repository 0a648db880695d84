// File:    lib.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: The main library crate for enigma-core, the cryptographic engine of the Enigma rotor machine simulator.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Enigma Core Library
//!
//! This library provides the cryptographic engine of an electromechanical
//! rotor cipher machine: alphabets, cycle-notation permutations, the three
//! rotor variants, and the machine that composes them into a reciprocal
//! signal path with the historical double-stepping schedule.
//!
//! The engine performs no terminal or file I/O of its own; configuration
//! loading, setting-line syntax and output formatting live in the
//! `enigma-cli` crate.

/// Bijective mapping between machine symbols and contiguous indices.
pub mod alphabet;
/// Typed machine configuration: rotor descriptors and catalog building.
pub mod catalog;
/// Error types for the enigma-core library.
pub mod error;
/// The machine: rotor slots, plugboard, stepping and the signal path.
pub mod machine;
/// Permutations of an alphabet's index range, built from cycle notation.
pub mod permutation;
/// Rotors: the moving, fixed and reflecting variants over a shared wiring.
pub mod rotor;
/// Random session key generation (rotor selection, settings, plugboard).
pub mod session_key;
