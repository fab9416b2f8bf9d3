use super::Model;
use crate::{
    error::Error,
    rng::Seeds,
    rules::{Rule, Wolfram},
    step::{scan, UpdateScheme},
    topology::{Torus, Window},
    world::Grid,
};

/// An elementary cellular automaton on a ring.
#[derive(Clone, Debug, PartialEq)]
pub struct WolframModel {
    rule: Wolfram,
    window: Window,
    scheme: UpdateScheme,
}

impl WolframModel {
    /// The rule applied to `[left, self, right]` of every cell.
    ///
    /// The ring needs at least 3 cells.
    pub fn new(rule: Wolfram, length: usize, scheme: UpdateScheme) -> Result<Self, Error> {
        let torus = Torus::ring(length)?;
        let window = Window::line(torus, 1, true)?;
        if window.len() != 3 {
            return Err(Error::WindowTooLarge {
                radius: 1,
                rows: 1,
                cols: length,
            });
        }
        Ok(WolframModel {
            rule,
            window,
            scheme,
        })
    }

    /// The rule.
    pub fn rule(&self) -> &Wolfram {
        &self.rule
    }

    /// Length of the ring.
    pub fn length(&self) -> usize {
        self.window.torus().cols()
    }
}

impl Model for WolframModel {
    type State = Grid;

    fn step(&self, state: &Grid, _seeds: &Seeds, _generation: u64) -> Grid {
        scan(state, &self.window, self.scheme, |_, cell, nbhd| {
            self.rule.apply(cell, nbhd)
        })
    }

    fn population(&self, state: &Grid) -> usize {
        state.population()
    }

    fn scheme(&self) -> UpdateScheme {
        self.scheme
    }

    fn name(&self) -> &'static str {
        "wolfram"
    }

    fn plaintext(&self, state: &Grid) -> String {
        state.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::{ALIVE, DEAD};

    #[test]
    fn rule_30_from_a_single_cell() -> Result<(), Error> {
        let model = WolframModel::new(Wolfram::new(30), 7, UpdateScheme::Synchronous)?;
        let mut row = Grid::row(vec![DEAD; 7]);
        row[(0, 3)] = ALIVE;
        let seeds = Seeds::new(0);
        let row = model.step(&row, &seeds, 1);
        assert_eq!(row.to_string(), "..ooo..\n");
        let row = model.step(&row, &seeds, 2);
        assert_eq!(row.to_string(), ".oo..o.\n");
        Ok(())
    }

    #[test]
    fn wraps_at_the_ends() -> Result<(), Error> {
        let model = WolframModel::new(Wolfram::new(90), 5, UpdateScheme::Synchronous)?;
        let row = Grid::row(vec![ALIVE, DEAD, DEAD, DEAD, DEAD]);
        let row = model.step(&row, &Seeds::new(0), 1);
        assert_eq!(row.as_slice(), &[DEAD, ALIVE, DEAD, DEAD, ALIVE]);
        Ok(())
    }

    #[test]
    fn short_rings_are_rejected() {
        assert_eq!(
            WolframModel::new(Wolfram::default(), 2, UpdateScheme::Synchronous),
            Err(Error::WindowTooLarge {
                radius: 1,
                rows: 1,
                cols: 2
            })
        );
    }
}
