// File:    session_key.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: Generates random session key material (rotor selection, settings, plugboard) from the OS entropy source.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use rand::{TryRngCore, rngs::OsRng};

use crate::alphabet::Alphabet;
use crate::catalog::{MachineDescriptor, RotorVariant};
use crate::error::EnigmaError;

/// A freshly generated machine setup for one message session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    /// Rotor names in slot order, reflector first.
    pub rotors: Vec<String>,
    /// Initial settings for slots `1..`, one symbol per slot.
    pub setting: String,
    /// Plugboard in cycle notation; empty when no pairs were requested.
    pub plugboard: String,
}

/// Generates a random session key for the machine described by
/// `descriptor`: a random reflector for slot 0, random fixed rotors for
/// the middle slots, random moving rotors for the rightmost `pawls`
/// slots (all without replacement), a random settings string, and
/// `pairs` disjoint plugboard transpositions.
///
/// # Errors
///
/// Returns [`EnigmaError::InvalidRotorCount`] for a bad geometry,
/// [`EnigmaError::InsufficientCatalog`] if a variant cannot fill its
/// slots, [`EnigmaError::TooManyPlugboardPairs`] if `2 * pairs` exceeds
/// the alphabet, and [`EnigmaError::RandomSourceFailure`] if the OS
/// entropy source fails.
pub fn random_session_key(
    descriptor: &MachineDescriptor,
    pairs: usize,
) -> Result<SessionKey, EnigmaError> {
    let alphabet = Alphabet::new(&descriptor.alphabet)?;
    if descriptor.rotor_slots < 2 || descriptor.pawls >= descriptor.rotor_slots {
        return Err(EnigmaError::InvalidRotorCount {
            slots: descriptor.rotor_slots,
            pawls: descriptor.pawls,
        });
    }
    if pairs * 2 > alphabet.size() {
        return Err(EnigmaError::TooManyPlugboardPairs {
            pairs,
            capacity: alphabet.size() / 2,
        });
    }

    let mut rng = OsRng;

    let mut reflectors = names_of(descriptor, RotorVariant::Reflector);
    let mut fixed = names_of(descriptor, RotorVariant::Fixed);
    let mut moving = names_of(descriptor, RotorVariant::Moving);
    let fixed_slots = descriptor.rotor_slots - 1 - descriptor.pawls;
    if reflectors.is_empty() {
        return Err(EnigmaError::InsufficientCatalog("reflector".to_string()));
    }
    if fixed.len() < fixed_slots {
        return Err(EnigmaError::InsufficientCatalog("fixed".to_string()));
    }
    if moving.len() < descriptor.pawls {
        return Err(EnigmaError::InsufficientCatalog("moving".to_string()));
    }

    shuffle(&mut rng, &mut reflectors)?;
    shuffle(&mut rng, &mut fixed)?;
    shuffle(&mut rng, &mut moving)?;

    let mut rotors = Vec::with_capacity(descriptor.rotor_slots);
    rotors.push(reflectors[0].clone());
    rotors.extend(fixed.iter().take(fixed_slots).cloned());
    rotors.extend(moving.iter().take(descriptor.pawls).cloned());

    let mut setting = String::with_capacity(descriptor.rotor_slots - 1);
    for _ in 1..descriptor.rotor_slots {
        setting.push(alphabet.to_char(random_index(&mut rng, alphabet.size())?));
    }

    let mut plugboard = String::new();
    if pairs > 0 {
        let mut indices: Vec<usize> = (0..alphabet.size()).collect();
        shuffle(&mut rng, &mut indices)?;
        for pair in indices.chunks(2).take(pairs) {
            if !plugboard.is_empty() {
                plugboard.push(' ');
            }
            plugboard.push('(');
            plugboard.push(alphabet.to_char(pair[0]));
            plugboard.push(alphabet.to_char(pair[1]));
            plugboard.push(')');
        }
    }

    Ok(SessionKey {
        rotors,
        setting,
        plugboard,
    })
}

/// Collects the names of every catalog rotor of the given variant.
fn names_of(descriptor: &MachineDescriptor, variant: RotorVariant) -> Vec<String> {
    descriptor
        .rotors
        .iter()
        .filter(|rotor| rotor.variant == variant)
        .map(|rotor| rotor.name.clone())
        .collect()
}

/// Draws a uniform index below `bound` from the OS entropy source.
///
/// Rejection sampling over two-byte draws keeps the distribution exact.
fn random_index(rng: &mut OsRng, bound: usize) -> Result<usize, EnigmaError> {
    debug_assert!(bound > 0 && bound <= usize::from(u16::MAX) + 1);
    let range = usize::from(u16::MAX) + 1;
    let zone = range - (range % bound);
    loop {
        let mut buffer = [0u8; 2];
        rng.try_fill_bytes(&mut buffer)
            .map_err(|e| EnigmaError::RandomSourceFailure(e.to_string()))?;
        let draw = usize::from(u16::from_be_bytes(buffer));
        if draw < zone {
            return Ok(draw % bound);
        }
    }
}

/// Fisher-Yates shuffle driven by [`random_index`].
fn shuffle<T>(rng: &mut OsRng, items: &mut [T]) -> Result<(), EnigmaError> {
    for i in (1..items.len()).rev() {
        let j = random_index(rng, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}
