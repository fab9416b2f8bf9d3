//! Elementary (Wolfram) cellular automata.

use crate::{
    cells::{State, ALIVE, DEAD},
    error::Error,
    rules::Rule,
};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The eight `{left, self, right}` patterns, in Wolfram's order.
///
/// The `i`-th pattern maps to the `(7 - i)`-th bit of the rule number,
/// i.e. the binary expansion of the number is read from the most
/// significant bit down.
pub const PATTERNS: [[u8; 3]; 8] = [
    [1, 1, 1],
    [1, 1, 0],
    [1, 0, 1],
    [1, 0, 0],
    [0, 1, 1],
    [0, 1, 0],
    [0, 0, 1],
    [0, 0, 0],
];

/// An elementary cellular automaton rule, numbered from 0 to 255.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct Wolfram {
    number: u8,
    /// Next state, indexed by the pattern read as a 3-bit integer.
    table: [State; 8],
}

impl Wolfram {
    /// Builds the lookup table of a rule.
    pub fn new(number: u8) -> Self {
        let mut table = [DEAD; 8];
        for (i, pattern) in PATTERNS.iter().enumerate() {
            let bit = (number >> (7 - i)) & 1;
            table[Self::pattern_index(pattern)] = State(bit);
        }
        Wolfram { number, table }
    }

    /// The rule number.
    #[inline]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// The lookup table, indexed by the pattern read as a 3-bit integer.
    #[inline]
    pub fn table(&self) -> &[State; 8] {
        &self.table
    }

    #[inline]
    fn pattern_index(pattern: &[u8; 3]) -> usize {
        ((pattern[0] << 2) | (pattern[1] << 1) | pattern[2]) as usize
    }

    /// The next state of a cell.
    #[inline]
    pub fn next(&self, left: State, center: State, right: State) -> State {
        let bit = |s: State| u8::from(s == ALIVE);
        self.table[Self::pattern_index(&[bit(left), bit(center), bit(right)])]
    }
}

impl Default for Wolfram {
    fn default() -> Self {
        Wolfram::new(30)
    }
}

impl From<u8> for Wolfram {
    fn from(number: u8) -> Self {
        Wolfram::new(number)
    }
}

impl From<Wolfram> for u8 {
    fn from(rule: Wolfram) -> Self {
        rule.number
    }
}

/// Accepts `30`, `W30` and `rule30` (case-insensitive).
impl FromStr for Wolfram {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        let digits = lower
            .strip_prefix("rule")
            .or_else(|| lower.strip_prefix('w'))
            .unwrap_or(&lower)
            .trim();
        digits
            .parse::<u8>()
            .map(Wolfram::new)
            .map_err(|_| Error::ParseWolframError(trimmed.to_string()))
    }
}

/// The window is `[left, self, right]`.
impl Rule for Wolfram {
    type Cell = State;

    #[inline]
    fn apply(&self, _cell: State, nbhd: &[State]) -> State {
        self.next(nbhd[0], nbhd[1], nbhd[2])
    }
}
