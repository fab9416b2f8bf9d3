//! Totalistic Life-like rules.

use crate::{
    cells::{State, ALIVE, DEAD},
    error::Error,
    rules::Rule,
};
use ca_rules::ParseLife;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Totalistic Life-like rules.
///
/// The default is Conway's Game of Life, `B3/S23`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Life {
    /// `birth[n]`: whether a dead cell with `n` living neighbors is born.
    birth: [bool; 9],
    /// `survival[n]`: whether a living cell with `n` living neighbors survives.
    survival: [bool; 9],
}

impl Life {
    /// Constructs a new rule from the `b` and `s` data.
    ///
    /// Neighbor counts above 8 are ignored.
    pub fn new(b: Vec<u8>, s: Vec<u8>) -> Self {
        let mut birth = [false; 9];
        let mut survival = [false; 9];
        for n in b.into_iter().filter(|&n| n <= 8) {
            birth[n as usize] = true;
        }
        for n in s.into_iter().filter(|&n| n <= 8) {
            survival[n as usize] = true;
        }
        Life { birth, survival }
    }

    /// Conway's Game of Life.
    pub fn conway() -> Self {
        Life::new(vec![3], vec![2, 3])
    }

    /// The next state of a cell with `alives` living neighbors.
    #[inline]
    pub fn next(&self, state: State, alives: usize) -> State {
        let table = if state == ALIVE {
            &self.survival
        } else {
            &self.birth
        };
        if table.get(alives).copied().unwrap_or(false) {
            ALIVE
        } else {
            DEAD
        }
    }

    /// The rule string, in `B/S` notation.
    pub fn rule_string(&self) -> String {
        let digits = |table: &[bool; 9]| {
            (0..9)
                .filter(|&n| table[n])
                .map(|n| char::from(b'0' + n as u8))
                .collect::<String>()
        };
        format!("B{}/S{}", digits(&self.birth), digits(&self.survival))
    }
}

impl Default for Life {
    fn default() -> Self {
        Life::conway()
    }
}

/// A parser for the rule.
impl ParseLife for Life {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(b, s)
    }
}

impl FromStr for Life {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ParseLife::parse_rule(input).map_err(Error::ParseRuleError)
    }
}

/// Sums the living cells of the window, which should be the Moore ring.
impl Rule for Life {
    type Cell = State;

    #[inline]
    fn apply(&self, cell: State, nbhd: &[State]) -> State {
        let alives = nbhd.iter().filter(|&&s| s == ALIVE).count();
        self.next(cell, alives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_table() {
        let life = Life::conway();
        for n in 0..=8 {
            let survive = if n == 2 || n == 3 { ALIVE } else { DEAD };
            let born = if n == 3 { ALIVE } else { DEAD };
            assert_eq!(life.next(ALIVE, n), survive, "alive with {} neighbors", n);
            assert_eq!(life.next(DEAD, n), born, "dead with {} neighbors", n);
        }
    }

    #[test]
    fn apply_counts_living_neighbors() {
        let life = Life::default();
        let nbhd = [ALIVE, DEAD, ALIVE, DEAD, DEAD, ALIVE, DEAD, DEAD];
        assert_eq!(life.apply(DEAD, &nbhd), ALIVE);
        assert_eq!(life.apply(ALIVE, &nbhd), ALIVE);
        assert_eq!(life.apply(ALIVE, &nbhd[..2]), DEAD);
    }

    #[test]
    fn parse() -> Result<(), Error> {
        let rule: Life = "B36/S23".parse()?;
        assert_eq!(rule.rule_string(), "B36/S23");
        assert_eq!(rule.next(DEAD, 6), ALIVE);
        assert_eq!("B3/S23".parse::<Life>()?, Life::conway());
        assert!("foo".parse::<Life>().is_err());
        Ok(())
    }
}
