use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Behavioral variant tag of a configured rotor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotorVariant {
    /// Rotates during stepping; requires notch symbols to be useful.
    Moving,
    /// Positioned once per session, then inert.
    Fixed,
    /// Turns the signal path back; wiring must be a derangement.
    Reflector,
}

/// Configuration of a single rotor.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RotorDescriptor {
    /// Unique rotor name, used for slot selection.
    pub name: String,
    /// Behavioral variant.
    pub variant: RotorVariant,
    /// Notch symbols; moving rotors only, must be empty otherwise.
    #[serde(default)]
    pub notches: String,
    /// Wiring in cycle notation, e.g. `"(AELTPHQXRU) (BKNW) (S)"`.
    pub wiring: String,
}

impl RotorDescriptor {
    /// Builds the rotor this descriptor describes.
    ///
    /// # Errors
    ///
    /// Returns any wiring parse error, [`EnigmaError::UnexpectedNotches`]
    /// if a non-moving descriptor declares notches, and
    /// [`EnigmaError::NotDerangement`] for an invalid reflector wiring.
    pub fn build(&self, alphabet: &Alphabet) -> Result<Rotor, EnigmaError> {
        let wiring = Permutation::new(&self.wiring, alphabet.clone())?;
        match self.variant {
            RotorVariant::Moving => Rotor::moving(&self.name, wiring, &self.notches),
            RotorVariant::Fixed => {
                if !self.notches.is_empty() {
                    return Err(EnigmaError::UnexpectedNotches(self.name.clone()));
                }
                Ok(Rotor::fixed(&self.name, wiring))
            }
            RotorVariant::Reflector => {
                if !self.notches.is_empty() {
                    return Err(EnigmaError::UnexpectedNotches(self.name.clone()));
                }
                Rotor::reflector(&self.name, wiring)
            }
        }
    }
}

/// Complete machine configuration: alphabet, geometry and rotor catalog.
///
/// This is the on-disk form of a machine; sessions (rotor selection,
/// settings, plugboard) are keyed separately per message.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MachineDescriptor {
    /// Ordered alphabet symbols.
    pub alphabet: String,
    /// Number of rotor slots; slot 0 is the reflector position.
    pub rotor_slots: usize,
    /// Number of pawls, i.e. moving rotors counted from the right.
    pub pawls: usize,
    /// Every rotor available to this machine.
    pub rotors: Vec<RotorDescriptor>,
}

impl MachineDescriptor {
    /// Parses a descriptor from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::ConfigParse`] on malformed JSON or an
    /// unusable variant tag.
    pub fn from_json(text: &str) -> Result<Self, EnigmaError> {
        serde_json::from_str(text).map_err(|e| EnigmaError::ConfigParse(e.to_string()))
    }

    /// Loads a descriptor from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::ConfigRead`] if the file cannot be read
    /// and [`EnigmaError::ConfigParse`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, EnigmaError> {
        let text = fs::read_to_string(path).map_err(|e| EnigmaError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Builds the machine this descriptor describes, validating the
    /// alphabet, every rotor wiring and the machine geometry.
    ///
    /// # Errors
    ///
    /// Propagates any alphabet, wiring, rotor or geometry error.
    pub fn build(&self) -> Result<Machine, EnigmaError> {
        let alphabet = Alphabet::new(&self.alphabet)?;
        let mut catalog = Vec::with_capacity(self.rotors.len());
        for descriptor in &self.rotors {
            catalog.push(descriptor.build(&alphabet)?);
        }
        debug!(
            "built catalog of {} rotors over a {}-symbol alphabet",
            catalog.len(),
            alphabet.size()
        );
        Machine::new(alphabet, self.rotor_slots, self.pawls, catalog)
    }
}
