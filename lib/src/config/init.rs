//! Initial states.

use crate::{
    cells::{Coord, State, ALIVE, DEAD, VOID},
    error::Error,
    models::{Agent, CueState},
    rules::AgentType,
    topology::Torus,
    world::Grid,
};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn check_unit(name: &'static str, value: f64) -> Result<(), Error> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfUnitRange { name, value })
    }
}

/// Each cell is alive iff a uniform draw is below `density`.
fn random_cells<R: Rng + ?Sized>(len: usize, density: f64, rng: &mut R) -> Vec<State> {
    (0..len)
        .map(|_| if rng.gen::<f64>() < density { ALIVE } else { DEAD })
        .collect()
}

/// Copies a plaintext pattern to the top left corner of an empty grid.
///
/// Every state of the pattern must pass `valid`.
fn place_pattern<F>(torus: Torus, text: &str, valid: F) -> Result<Grid, Error>
where
    F: Fn(State) -> bool,
{
    let pattern = Grid::from_plaintext(text)?;
    let mut grid = Grid::filled(torus.rows(), torus.cols(), DEAD);
    for index in 0..pattern.len() {
        let coord = pattern.torus().coord(index);
        let state = pattern[coord];
        if !valid(state) {
            return Err(Error::InvalidState(coord, state));
        }
        if state != DEAD {
            grid.set(coord, state)?;
        }
    }
    Ok(grid)
}

/// The initial state of a Life grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridInit {
    /// Random cells, alive with probability `density`.
    Random {
        /// Probability for a cell to be alive.
        density: f64,
    },
    /// The listed cells are alive.
    Cells(Vec<Coord>),
    /// A pattern in Plaintext format, copied to the top left corner.
    Plaintext(String),
}

impl Default for GridInit {
    fn default() -> Self {
        GridInit::Random { density: 0.1 }
    }
}

impl GridInit {
    /// Checks the parameters without building anything.
    pub fn check(&self) -> Result<(), Error> {
        match *self {
            GridInit::Random { density } => check_unit("density", density),
            _ => Ok(()),
        }
    }

    /// Builds the grid.
    pub fn build<R: Rng + ?Sized>(&self, torus: Torus, rng: &mut R) -> Result<Grid, Error> {
        self.check()?;
        match self {
            GridInit::Random { density } => {
                Grid::from_vec(torus.rows(), torus.cols(), random_cells(torus.len(), *density, rng))
            }
            GridInit::Cells(cells) => {
                let mut grid = Grid::filled(torus.rows(), torus.cols(), DEAD);
                for &coord in cells {
                    grid.set(coord, ALIVE)?;
                }
                Ok(grid)
            }
            GridInit::Plaintext(text) => place_pattern(torus, text, |s| s == DEAD || s == ALIVE),
        }
    }
}

/// The initial state of an elementary cellular automaton.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RowInit {
    /// A single living cell in the middle.
    Center,
    /// Random cells, alive with probability `density`.
    Random {
        /// Probability for a cell to be alive.
        density: f64,
    },
    /// The listed cells are alive.
    Cells(Vec<usize>),
}

impl Default for RowInit {
    fn default() -> Self {
        RowInit::Center
    }
}

impl RowInit {
    /// Checks the parameters without building anything.
    pub fn check(&self) -> Result<(), Error> {
        match *self {
            RowInit::Random { density } => check_unit("density", density),
            _ => Ok(()),
        }
    }

    /// Builds the row.
    pub fn build<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<Grid, Error> {
        self.check()?;
        let mut row = Grid::row(vec![DEAD; length]);
        match self {
            RowInit::Center => row.set((0, length / 2), ALIVE)?,
            RowInit::Random { density } => row = Grid::row(random_cells(length, *density, rng)),
            RowInit::Cells(cells) => {
                for &col in cells {
                    row.set((0, col), ALIVE)?;
                }
            }
        }
        Ok(row)
    }
}

/// The initial population of a Schelling grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PopulationInit {
    /// Every cell first draws an agent type, with probabilities proportional
    /// to the frequencies of the types; then an independent draw below
    /// `voids` empties it.
    Random {
        /// Probability for a cell to be void.
        voids: f64,
    },
    /// A pattern in Plaintext format, copied to the top left corner.
    ///
    /// `.` is a void; `A` is the agent type `1`, `B` the type `2`, and so on.
    Plaintext(String),
}

impl Default for PopulationInit {
    fn default() -> Self {
        PopulationInit::Random { voids: 0.5 }
    }
}

impl PopulationInit {
    /// Checks the parameters without building anything.
    pub fn check(&self, types: &[AgentType]) -> Result<(), Error> {
        if let PopulationInit::Random { voids } = *self {
            check_unit("voids", voids)?;
            if types.iter().any(|t| !(t.frequency > 0.0)) {
                return Err(Error::NonPositiveError);
            }
        }
        Ok(())
    }

    /// Builds the grid.
    pub fn build<R: Rng + ?Sized>(
        &self,
        torus: Torus,
        types: &[AgentType],
        rng: &mut R,
    ) -> Result<Grid, Error> {
        self.check(types)?;
        match self {
            PopulationInit::Random { voids } => {
                let total: f64 = types.iter().map(|t| t.frequency).sum();
                let mut cells: Vec<State> = (0..torus.len())
                    .map(|_| {
                        let mut draw = rng.gen::<f64>() * total;
                        for agent_type in types {
                            if draw < agent_type.frequency {
                                return State(agent_type.id);
                            }
                            draw -= agent_type.frequency;
                        }
                        types.last().map_or(VOID, |t| State(t.id))
                    })
                    .collect();
                for cell in cells.iter_mut() {
                    if rng.gen::<f64>() < *voids {
                        *cell = VOID;
                    }
                }
                Grid::from_vec(torus.rows(), torus.cols(), cells)
            }
            PopulationInit::Plaintext(text) => place_pattern(torus, text, |s| {
                s.is_void() || types.iter().any(|t| t.id == s.0)
            }),
        }
    }
}

/// The initial agents and spaces of the cultural space model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CueInit {
    /// Characters are `round(characters × U[0, 1))`,
    /// positions are uniform over the spaces.
    Random,
    /// Every agent has the same character and position,
    /// every space the same character.
    Uniform {
        /// Character of every agent.
        agent: f64,
        /// Position of every agent.
        position: usize,
        /// Character of every space.
        space: f64,
    },
    /// Literal agents and spaces.
    ///
    /// Their numbers must match the numbers of agents and spaces
    /// of the configuration.
    Explicit {
        /// The agents.
        agents: Vec<Agent>,
        /// Characters of the spaces.
        spaces: Vec<f64>,
    },
}

impl Default for CueInit {
    fn default() -> Self {
        CueInit::Random
    }
}

impl CueInit {
    /// Builds the state. The shape is checked by the model.
    pub fn build<R: Rng + ?Sized>(
        &self,
        agents: usize,
        spaces: usize,
        characters: usize,
        rng: &mut R,
    ) -> CueState {
        match self {
            CueInit::Random => {
                let scale = characters as f64;
                let agents = (0..agents)
                    .map(|_| Agent {
                        character: (scale * rng.gen::<f64>()).round(),
                        position: rng.gen_range(0..spaces),
                    })
                    .collect();
                let spaces = (0..spaces)
                    .map(|_| (scale * rng.gen::<f64>()).round())
                    .collect();
                CueState { agents, spaces }
            }
            CueInit::Uniform {
                agent,
                position,
                space,
            } => CueState {
                agents: vec![
                    Agent {
                        character: *agent,
                        position: *position,
                    };
                    agents
                ],
                spaces: vec![*space; spaces],
            },
            CueInit::Explicit { agents, spaces } => CueState {
                agents: agents.clone(),
                spaces: spaces.clone(),
            },
        }
    }
}
