// File:    permutation.rs
// Author:  apezoo
// Date:    2025-09-02
//
// Description: Cycle-notation permutations over an alphabet's index range.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Permutations of the index range of an alphabet.
//!
//! A permutation is written in cycle notation, `"(cccc) (cc) ..."`:
//! within a cycle each symbol maps to its successor and the last wraps
//! to the first. Symbols absent from every cycle map to themselves, so
//! the empty string denotes the identity. Whitespace is ignored
//! everywhere, including inside a cycle.

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A bijection over `0..alphabet.size()`, with its precomputed inverse.
///
/// Both directions are total O(1) table lookups; the tables are mutual
/// inverses by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Alphabet,
    forward: Vec<usize>,
    backward: Vec<usize>,
}

impl Permutation {
    /// Builds the permutation specified by `cycles` over `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::MalformedCycles`] for unbalanced or nested
    /// parentheses, an empty cycle, or a symbol outside any cycle;
    /// [`EnigmaError::SymbolNotInAlphabet`] if a cycle mentions a foreign
    /// symbol; [`EnigmaError::RepeatedCycleSymbol`] if a symbol occurs in
    /// more than one cycle position (the mapping would not be a
    /// bijection).
    pub fn new(cycles: &str, alphabet: Alphabet) -> Result<Self, EnigmaError> {
        let size = alphabet.size();
        let mut forward: Vec<Option<usize>> = vec![None; size];
        let mut backward: Vec<Option<usize>> = vec![None; size];

        for group in parse_cycles(cycles)? {
            let mut indices = Vec::with_capacity(group.len());
            for &ch in &group {
                indices.push(alphabet.to_index(ch)?);
            }
            for (k, &from) in indices.iter().enumerate() {
                let to = indices[(k + 1) % indices.len()];
                if forward[from].is_some() {
                    return Err(EnigmaError::RepeatedCycleSymbol(alphabet.to_char(from)));
                }
                forward[from] = Some(to);
                if backward[to].is_some() {
                    return Err(EnigmaError::RepeatedCycleSymbol(alphabet.to_char(to)));
                }
                backward[to] = Some(from);
            }
        }

        // Symbols not mentioned in any cycle are fixed points.
        let forward = forward
            .iter()
            .enumerate()
            .map(|(index, mapped)| mapped.unwrap_or(index))
            .collect();
        let backward = backward
            .iter()
            .enumerate()
            .map(|(index, mapped)| mapped.unwrap_or(index))
            .collect();

        Ok(Permutation {
            alphabet,
            forward,
            backward,
        })
    }

    /// The identity permutation over `alphabet`; every symbol is fixed.
    pub fn identity(alphabet: Alphabet) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            forward: (0..size).collect(),
            backward: (0..size).collect(),
        }
    }

    /// Returns the size of the alphabet this permutation acts on.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Normalizes `value` into `0..size()` using floored modulo, so
    /// negative inputs wrap from the top.
    pub fn wrap(&self, value: isize) -> usize {
        let size = self.size() as isize;
        value.rem_euclid(size) as usize
    }

    /// Applies the permutation to index `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is out of range.
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p]
    }

    /// Applies the inverse permutation to index `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of range.
    pub fn invert(&self, c: usize) -> usize {
        self.backward[c]
    }

    /// Applies the permutation to the symbol `p`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `p` is absent.
    pub fn permute_char(&self, p: char) -> Result<char, EnigmaError> {
        Ok(self.alphabet.to_char(self.permute(self.alphabet.to_index(p)?)))
    }

    /// Applies the inverse permutation to the symbol `c`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is absent.
    pub fn invert_char(&self, c: char) -> Result<char, EnigmaError> {
        Ok(self.alphabet.to_char(self.invert(self.alphabet.to_index(c)?)))
    }

    /// Returns true iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(index, &mapped)| index != mapped)
    }

    /// Returns the alphabet used to initialize this permutation.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

/// Splits cycle notation into groups of symbols.
///
/// Whitespace is skipped everywhere; any other character must sit inside
/// a parenthesized group.
fn parse_cycles(cycles: &str) -> Result<Vec<Vec<char>>, EnigmaError> {
    let mut groups = Vec::new();
    let mut current: Option<Vec<char>> = None;
    for ch in cycles.chars() {
        match ch {
            '(' => {
                if current.is_some() {
                    return Err(EnigmaError::MalformedCycles("nested '('".to_string()));
                }
                current = Some(Vec::new());
            }
            ')' => match current.take() {
                Some(group) => {
                    if group.is_empty() {
                        return Err(EnigmaError::MalformedCycles(
                            "empty cycle '()'".to_string(),
                        ));
                    }
                    groups.push(group);
                }
                None => {
                    return Err(EnigmaError::MalformedCycles("unmatched ')'".to_string()));
                }
            },
            ch if ch.is_whitespace() => {}
            ch => match current.as_mut() {
                Some(group) => group.push(ch),
                None => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "symbol '{ch}' outside a cycle"
                    )));
                }
            },
        }
    }
    if current.is_some() {
        return Err(EnigmaError::MalformedCycles("unclosed '('".to_string()));
    }
    Ok(groups)
}
