// File:    rotor.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: Rotors of the machine, covering the moving, fixed and reflecting variants.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Rotors: a named wiring plus a mutable rotational setting.
//!
//! A single [`Rotor`] type carries all three behavioral variants as a
//! [`RotorKind`] tag, so the stepping algorithm stays variant-agnostic
//! while every `match` remains exhaustive.

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// Behavioral variant of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Rotates during stepping and carries the notch symbols at which it
    /// kicks its left neighbor.
    Moving {
        /// Symbols at which this rotor presents a notch.
        notches: String,
    },
    /// Never rotates; positioned once per session and then inert.
    Fixed,
    /// Never rotates; turns the signal path back rightward. Its wiring
    /// must be a derangement.
    Reflector,
}

/// A single rotor: wiring, name, current setting and variant tag.
///
/// The `setting` is the rotor's rotational offset into its alphabet; it
/// starts at 0 and is the only mutable state.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    wiring: Permutation,
    setting: usize,
    kind: RotorKind,
}

impl Rotor {
    /// Creates a moving rotor with notches at the given symbols.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if a notch symbol is
    /// not in the wiring's alphabet.
    pub fn moving(name: &str, wiring: Permutation, notches: &str) -> Result<Self, EnigmaError> {
        for ch in notches.chars() {
            if !wiring.alphabet().contains(ch) {
                return Err(EnigmaError::SymbolNotInAlphabet(ch));
            }
        }
        Ok(Rotor {
            name: name.to_string(),
            wiring,
            setting: 0,
            kind: RotorKind::Moving {
                notches: notches.to_string(),
            },
        })
    }

    /// Creates a non-rotating rotor.
    pub fn fixed(name: &str, wiring: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            wiring,
            setting: 0,
            kind: RotorKind::Fixed,
        }
    }

    /// Creates a reflector.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::NotDerangement`] if the wiring has a fixed
    /// point; a reflector with one would encode a symbol to itself,
    /// which the mechanism cannot do.
    pub fn reflector(name: &str, wiring: Permutation) -> Result<Self, EnigmaError> {
        if !wiring.derangement() {
            return Err(EnigmaError::NotDerangement(name.to_string()));
        }
        Ok(Rotor {
            name: name.to_string(),
            wiring,
            setting: 0,
            kind: RotorKind::Reflector,
        })
    }

    /// Returns the rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current rotational setting as an index.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Sets the rotational setting directly. `index` must be a valid
    /// index into the rotor's alphabet.
    pub fn set_index(&mut self, index: usize) {
        debug_assert!(index < self.wiring.size());
        self.setting = index;
    }

    /// Sets the rotational setting to the position of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `symbol` is not in
    /// the rotor's alphabet.
    pub fn set_symbol(&mut self, symbol: char) -> Result<(), EnigmaError> {
        self.setting = self.wiring.alphabet().to_index(symbol)?;
        Ok(())
    }

    /// Returns true if this rotor rotates during stepping.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true if this rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns the notch symbols; empty for non-moving variants.
    pub fn notches(&self) -> &str {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            RotorKind::Fixed | RotorKind::Reflector => "",
        }
    }

    /// Returns true iff the symbol at the current setting is a notch.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => {
                let current = self.wiring.alphabet().to_char(self.setting);
                notches.contains(current)
            }
            RotorKind::Fixed | RotorKind::Reflector => false,
        }
    }

    /// Advances the setting by one position, wrapping at the alphabet
    /// size. No-op for non-moving variants.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = self.wiring.wrap(self.setting as isize + 1);
        }
    }

    /// Converts index `c` through the wiring in the forward direction,
    /// compensating for the current rotational offset.
    ///
    /// The rotor behaves as if mechanically rotated by `setting`: the
    /// entering contact is `c + setting`, and the offset is subtracted
    /// back from the wired result.
    pub fn convert_forward(&self, c: usize) -> usize {
        let contact = self.wiring.wrap(c as isize + self.setting as isize);
        self.wiring
            .wrap(self.wiring.permute(contact) as isize - self.setting as isize)
    }

    /// Converts index `c` through the wiring in the backward direction,
    /// the exact inverse of [`convert_forward`](Self::convert_forward)
    /// at the same setting.
    pub fn convert_backward(&self, c: usize) -> usize {
        let contact = self.wiring.wrap(c as isize + self.setting as isize);
        self.wiring
            .wrap(self.wiring.invert(contact) as isize - self.setting as isize)
    }

    /// Returns the rotor's wiring.
    pub fn permutation(&self) -> &Permutation {
        &self.wiring
    }

    /// Returns the alphabet the rotor operates over.
    pub fn alphabet(&self) -> &Alphabet {
        self.wiring.alphabet()
    }
}
