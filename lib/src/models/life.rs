use super::Model;
use crate::{
    error::Error,
    rng::Seeds,
    rules::{Life, Rule},
    step::{scan, UpdateScheme},
    topology::{Torus, Window},
    world::Grid,
};

/// A Life-like cellular automaton on a torus.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeModel {
    rule: Life,
    window: Window,
    scheme: UpdateScheme,
}

impl LifeModel {
    /// The rule applied to the Moore ring of every cell.
    ///
    /// Both dimensions must be at least 3, so that every cell has eight
    /// distinct neighbors.
    pub fn new(rule: Life, torus: Torus, scheme: UpdateScheme) -> Result<Self, Error> {
        let window = Window::moore(torus)?;
        if window.len() != 8 {
            return Err(Error::WindowTooLarge {
                radius: 1,
                rows: torus.rows(),
                cols: torus.cols(),
            });
        }
        Ok(LifeModel {
            rule,
            window,
            scheme,
        })
    }

    /// The rule.
    pub fn rule(&self) -> &Life {
        &self.rule
    }

    /// The window.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Model for LifeModel {
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
        "life"
    }

    fn plaintext(&self, state: &Grid) -> String {
        state.to_string()
    }
}
