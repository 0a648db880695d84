// File:    machine.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: The complete machine, composing rotor slots and plugboard into the stepping schedule and signal path.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The complete rotor machine.
//!
//! A [`Machine`] owns the full rotor catalog in a single arena and keeps
//! the active slots as arena indices, so slot 0 being the reflector is a
//! structural position rather than a convention to re-check. Per
//! character it advances the rotor state, then runs the signal through
//! plugboard, rotors (right to left), back (left to right, skipping the
//! reflector) and the plugboard again.

use std::collections::HashMap;

use log::debug;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Per-character trace hook.
///
/// Installed via [`Machine::set_observer`], invoked once per converted
/// character after stepping. Replaces a process-wide verbosity flag, so
/// the engine carries no ambient global state.
pub trait StepObserver {
    /// Reports one conversion step. `positions` holds the settings of
    /// slots `1..` as symbols, left to right; `input` is the symbol fed
    /// in, `plugged` the symbol after the first plugboard pass and
    /// `output` the final result.
    fn on_step(&mut self, positions: &[char], input: char, plugged: char, output: char);
}

/// A complete machine: rotor slots, plugboard and stepping schedule.
///
/// Slot 0 is the reflector position, slot `num_rotors - 1` the fastest
/// rotor. One instance serves one message stream at a time; there is no
/// internal synchronization.
pub struct Machine {
    alphabet: Alphabet,
    num_rotors: usize,
    pawls: usize,
    catalog: Vec<Rotor>,
    by_name: HashMap<String, usize>,
    slots: Vec<usize>,
    plugboard: Permutation,
    observer: Option<Box<dyn StepObserver>>,
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("alphabet", &self.alphabet)
            .field("num_rotors", &self.num_rotors)
            .field("pawls", &self.pawls)
            .field("catalog", &self.catalog)
            .field("by_name", &self.by_name)
            .field("slots", &self.slots)
            .field("plugboard", &self.plugboard)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, `pawls` pawls and the
    /// given rotor catalog. The plugboard starts as the identity.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::InvalidRotorCount`] unless
    /// `1 < num_rotors` and `pawls < num_rotors`;
    /// [`EnigmaError::AlphabetMismatch`] if a catalog rotor was built
    /// over a different alphabet; [`EnigmaError::DuplicateRotorName`] if
    /// two catalog rotors share a name.
    pub fn new(
        alphabet: Alphabet,
        num_rotors: usize,
        pawls: usize,
        catalog: Vec<Rotor>,
    ) -> Result<Self, EnigmaError> {
        if num_rotors < 2 || pawls >= num_rotors {
            return Err(EnigmaError::InvalidRotorCount {
                slots: num_rotors,
                pawls,
            });
        }
        let mut by_name = HashMap::with_capacity(catalog.len());
        for (index, rotor) in catalog.iter().enumerate() {
            if rotor.alphabet() != &alphabet {
                return Err(EnigmaError::AlphabetMismatch(rotor.name().to_string()));
            }
            if by_name.insert(rotor.name().to_string(), index).is_some() {
                return Err(EnigmaError::DuplicateRotorName(rotor.name().to_string()));
            }
        }
        let plugboard = Permutation::identity(alphabet.clone());
        Ok(Machine {
            alphabet,
            num_rotors,
            pawls,
            catalog,
            by_name,
            slots: Vec::new(),
            plugboard,
            observer: None,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, and thus of rotating rotors.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the common alphabet of the machine.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the rotor in slot `k`; slot 0 is the reflector position,
    /// slot `num_rotors() - 1` the fastest rotor.
    ///
    /// # Panics
    ///
    /// Panics if no rotors have been inserted or `k` is out of range.
    pub fn rotor(&self, k: usize) -> &Rotor {
        self.slot(k)
    }

    /// Fills the slots with the catalog rotors named in `names`, in
    /// order; `names[0]` names the reflector. Every selected rotor is
    /// reset to setting 0.
    ///
    /// Variant placement (a reflector in slot 0, moving rotors in the
    /// rightmost `pawls` slots) is the caller's responsibility to check
    /// before use, via [`rotor`](Self::rotor) and the rotor capability
    /// queries.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::WrongSelectionLength`] unless exactly
    /// `num_rotors()` names are given; [`EnigmaError::UnknownRotorName`]
    /// for a name missing from the catalog;
    /// [`EnigmaError::DuplicateRotorName`] if a name is selected twice.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EnigmaError> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::WrongSelectionLength {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }
        let mut slots = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let &index = self
                .by_name
                .get(name)
                .ok_or_else(|| EnigmaError::UnknownRotorName(name.to_string()))?;
            if slots.contains(&index) {
                return Err(EnigmaError::DuplicateRotorName(name.to_string()));
            }
            slots.push(index);
        }
        for &index in &slots {
            self.catalog[index].set_index(0);
        }
        let chosen: Vec<&str> = slots.iter().map(|&index| self.catalog[index].name()).collect();
        debug!("inserted rotors: {chosen:?}");
        self.slots = slots;
        Ok(())
    }

    /// Sets the rotors in slots `1..num_rotors()` according to
    /// `setting`, left to right; the reflector is never set this way.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::WrongSettingLength`] unless `setting` has
    /// exactly `num_rotors() - 1` symbols, and
    /// [`EnigmaError::SymbolNotInAlphabet`] for a foreign symbol.
    ///
    /// # Panics
    ///
    /// Panics if no rotors have been inserted.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let expected = self.num_rotors - 1;
        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != expected {
            return Err(EnigmaError::WrongSettingLength {
                expected,
                actual: symbols.len(),
            });
        }
        for (k, &ch) in symbols.iter().enumerate() {
            let index = self.alphabet.to_index(ch)?;
            let slot = self.slots[k + 1];
            self.catalog[slot].set_index(index);
        }
        debug!("rotors set to {setting:?}");
        Ok(())
    }

    /// Returns the current plugboard permutation.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Replaces the plugboard.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::AlphabetMismatch`] if `plugboard` was built
    /// over a different alphabet than the machine's.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<(), EnigmaError> {
        if plugboard.alphabet() != &self.alphabet {
            return Err(EnigmaError::AlphabetMismatch("plugboard".to_string()));
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Installs a per-character trace observer.
    pub fn set_observer(&mut self, observer: Box<dyn StepObserver>) {
        self.observer = Some(observer);
    }

    /// Removes the trace observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Converts the input index `c`, after first advancing the machine.
    ///
    /// Total over `0..alphabet().size()`; never fails once the machine
    /// is set up.
    ///
    /// # Panics
    ///
    /// Panics if no rotors have been inserted or `c` is out of range.
    pub fn convert(&mut self, c: usize) -> usize {
        self.advance_rotors();
        let plugged = self.plugboard.permute(c);
        let mut signal = plugged;
        for k in (0..self.num_rotors).rev() {
            signal = self.slot(k).convert_forward(signal);
        }
        for k in 1..self.num_rotors {
            signal = self.slot(k).convert_backward(signal);
        }
        let output = self.plugboard.permute(signal);
        if let Some(mut observer) = self.observer.take() {
            let positions: Vec<char> = (1..self.num_rotors)
                .map(|k| self.alphabet.to_char(self.slot(k).setting()))
                .collect();
            observer.on_step(
                &positions,
                self.alphabet.to_char(c),
                self.alphabet.to_char(plugged),
                self.alphabet.to_char(output),
            );
            self.observer = Some(observer);
        }
        output
    }

    /// Converts every symbol of `message` in order, updating the rotor
    /// state as a side effect of each character. The output has the
    /// same length as the input.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] at the first symbol
    /// outside the machine's alphabet; symbols before it have already
    /// advanced the rotors.
    ///
    /// # Panics
    ///
    /// Panics if no rotors have been inserted.
    pub fn convert_message(&mut self, message: &str) -> Result<String, EnigmaError> {
        let mut converted = String::with_capacity(message.len());
        for ch in message.chars() {
            let index = self.alphabet.to_index(ch)?;
            let converted_index = self.convert(index);
            converted.push(self.alphabet.to_char(converted_index));
        }
        Ok(converted)
    }

    /// Advances the rotor state by one keystroke.
    ///
    /// Slots `1..num_rotors - 1` are visited once, in increasing order:
    /// a slot advances when it rotates and its right neighbor sits at a
    /// notch, or when its left neighbor rotates and it sits at a notch
    /// itself. The rightmost slot then advances unconditionally. Notch
    /// state is read at visit time, which is what lets a middle rotor at
    /// its notch advance on two consecutive keystrokes (the double
    /// step). The visitation order is observable in the ciphertext and
    /// must not change.
    fn advance_rotors(&mut self) {
        for k in 1..self.num_rotors - 1 {
            let right_at_notch = self.slot(k).rotates() && self.slot(k + 1).at_notch();
            let kicked_by_left = self.slot(k - 1).rotates() && self.slot(k).at_notch();
            if right_at_notch || kicked_by_left {
                self.slot_mut(k).advance();
            }
        }
        self.slot_mut(self.num_rotors - 1).advance();
    }

    fn slot(&self, k: usize) -> &Rotor {
        &self.catalog[self.slots[k]]
    }

    fn slot_mut(&mut self, k: usize) -> &mut Rotor {
        let index = self.slots[k];
        &mut self.catalog[index]
    }
}
