// File:    session.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: The session driver: setting-line parsing, message conversion and output grouping.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use std::error::Error;
use std::io::{BufRead, Write};

use enigma_core::error::EnigmaError;
use enigma_core::machine::{Machine, StepObserver};
use enigma_core::permutation::Permutation;
use log::debug;

/// Width of the printed ciphertext groups.
const GROUP_WIDTH: usize = 5;

/// `--verbose` observer: one stderr line per converted character, in the
/// form `[POSITIONS] in -> plugged -> out`.
pub(crate) struct StderrTrace;

impl StepObserver for StderrTrace {
    fn on_step(&mut self, positions: &[char], input: char, plugged: char, output: char) {
        let positions: String = positions.iter().collect();
        eprintln!("[{positions}] {input} -> {plugged} -> {output}");
    }
}

/// Drives one full input stream through `machine`.
///
/// The first line must be a setting line (`* NAMES SETTING [CYCLES]`);
/// later setting lines re-key the machine between messages. Every other
/// line is stripped of whitespace, converted, and written in
/// five-character groups; a blank line is written for a blank message.
pub(crate) fn process<R: BufRead, W: Write + ?Sized>(
    machine: &mut Machine,
    input: R,
    output: &mut W,
) -> Result<(), Box<dyn Error>> {
    let mut keyed = false;
    for line in input.lines() {
        let line = line?;
        if line.trim_start().starts_with('*') {
            set_up(machine, &line)?;
            keyed = true;
        } else if keyed {
            let message: String = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            let converted = machine.convert_message(&message)?;
            writeln!(output, "{}", group(&converted))?;
        } else {
            return Err(Box::new(EnigmaError::MissingSettingMarker));
        }
    }
    Ok(())
}

/// Applies one setting line: inserts the named rotors, checks their
/// placement, sets their positions and installs the plugboard.
fn set_up(machine: &mut Machine, line: &str) -> Result<(), EnigmaError> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("*") {
        return Err(EnigmaError::MissingSettingMarker);
    }

    let names: Vec<&str> = tokens.by_ref().take(machine.num_rotors()).collect();
    if names.len() != machine.num_rotors() {
        return Err(EnigmaError::TruncatedSettingLine);
    }
    machine.insert_rotors(&names)?;

    if !machine.rotor(0).reflecting() {
        return Err(EnigmaError::ReflectorRequired(
            machine.rotor(0).name().to_string(),
        ));
    }
    // Fixed rotors fill the left slots, moving rotors the rightmost
    // `pawls`; a reflector anywhere past slot 0 never fits.
    let first_moving = machine.num_rotors() - machine.num_pawls();
    for k in 1..machine.num_rotors() {
        let rotor = machine.rotor(k);
        if rotor.reflecting() || rotor.rotates() != (k >= first_moving) {
            return Err(EnigmaError::MisplacedRotor {
                name: rotor.name().to_string(),
                slot: k,
            });
        }
    }

    let setting = tokens.next().ok_or(EnigmaError::TruncatedSettingLine)?;
    machine.set_rotors(setting)?;

    let cycles: Vec<&str> = tokens.collect();
    let plugboard = Permutation::new(&cycles.join(" "), machine.alphabet().clone())?;
    machine.set_plugboard(plugboard)?;
    debug!("machine re-keyed from setting line");
    Ok(())
}

/// Formats converted text into space-separated groups; the last group
/// may be short.
fn group(text: &str) -> String {
    let mut formatted = String::with_capacity(text.len() + text.len() / GROUP_WIDTH);
    for (count, ch) in text.chars().enumerate() {
        if count > 0 && count % GROUP_WIDTH == 0 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }
    formatted
}
