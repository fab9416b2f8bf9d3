use super::Model;
use crate::{
    cells::VOID,
    error::Error,
    rng::Seeds,
    rules::{Decision, Schelling},
    step::{relocate, UpdateScheme},
    topology::{Torus, Window},
    world::Grid,
};

/// Schelling's segregation model on a torus.
///
/// Scans the grid row-major. Each occupied cell draws from its own stream,
/// keyed by the generation and the flat index of the cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SchellingModel {
    rule: Schelling,
    window: Window,
    scheme: UpdateScheme,
}

impl SchellingModel {
    /// The rule applied to the Moore ring of every agent.
    ///
    /// Both dimensions must be at least 3.
    pub fn new(rule: Schelling, torus: Torus, scheme: UpdateScheme) -> Result<Self, Error> {
        let window = Window::moore(torus)?;
        if window.len() != 8 {
            return Err(Error::WindowTooLarge {
                radius: 1,
                rows: torus.rows(),
                cols: torus.cols(),
            });
        }
        Ok(SchellingModel {
            rule,
            window,
            scheme,
        })
    }

    /// The rule.
    pub fn rule(&self) -> &Schelling {
        &self.rule
    }

    /// Number of agents that are not satisfied with their window.
    pub fn unsatisfied(&self, state: &Grid) -> usize {
        let torus = state.torus();
        let mut nbhd = Vec::with_capacity(self.window.len());
        (0..torus.len())
            .map(|index| torus.coord(index))
            .filter(|&coord| {
                let agent = state[coord];
                if agent.is_void() {
                    return false;
                }
                self.window.gather(state, coord, &mut nbhd);
                !self.rule.is_satisfied(agent, &nbhd)
            })
            .count()
    }
}

impl Model for SchellingModel {
    type State = Grid;

    fn step(&self, state: &Grid, seeds: &Seeds, generation: u64) -> Grid {
        relocate(
            state,
            &self.window,
            self.scheme,
            VOID,
            |index, _, agent, nbhd| {
                let mut rng = seeds.cell(generation, index);
                match self.rule.decide(agent, nbhd, &mut rng) {
                    Decision::Stay => None,
                    Decision::Move(slot) => Some(slot),
                }
            },
        )
    }

    fn population(&self, state: &Grid) -> usize {
        state.population()
    }

    fn scheme(&self) -> UpdateScheme {
        self.scheme
    }

    fn name(&self) -> &'static str {
        "schelling"
    }

    fn plaintext(&self, state: &Grid) -> String {
        state.to_string()
    }
}
