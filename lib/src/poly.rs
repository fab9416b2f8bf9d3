//! A polymorphic simulation.

use crate::{
    models::{CueModel, CueState, LifeModel, Model, SchellingModel, WolframModel},
    simulation::{Output, Simulation},
    world::Grid,
};
use from_variants::FromVariants;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polymorphic [`Simulation`].
#[non_exhaustive]
#[derive(Clone, Debug, FromVariants)]
pub enum PolySimulation {
    /// A [`Simulation`] of a Life-like rule.
    Life(Simulation<LifeModel>),
    /// A [`Simulation`] of an elementary cellular automaton.
    Wolfram(Simulation<WolframModel>),
    /// A [`Simulation`] of Schelling's segregation model.
    Schelling(Simulation<SchellingModel>),
    /// A [`Simulation`] of the cultural space model.
    Cue(Simulation<CueModel>),
}

/// The output of a [`PolySimulation`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, FromVariants)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PolyOutput {
    /// Output of the grid models.
    Grid(Output<Grid>),
    /// Output of the cultural space model.
    Cue(Output<CueState>),
}

macro_rules! dispatch {
    ($self: expr, $sim: ident => $action: expr) => {
        match $self {
            PolySimulation::Life($sim) => $action,
            PolySimulation::Wolfram($sim) => $action,
            PolySimulation::Schelling($sim) => $action,
            PolySimulation::Cue($sim) => $action,
        }
    };
}

impl PolySimulation {
    /// Computes exactly one generation.
    #[inline]
    pub fn step(&mut self) {
        dispatch!(self, sim => {
            sim.step();
        })
    }

    /// Number of generations computed so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        dispatch!(self, sim => sim.generation())
    }

    /// The run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        dispatch!(self, sim => sim.seed())
    }

    /// Number of living cells, or of agents.
    #[inline]
    pub fn population(&self) -> usize {
        dispatch!(self, sim => sim.population())
    }

    /// The current state as text.
    ///
    /// Grids are displayed in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    #[inline]
    pub fn plaintext(&self) -> String {
        dispatch!(self, sim => sim.plaintext())
    }

    /// The current grid, for the grid models.
    pub fn grid(&self) -> Option<&Grid> {
        match self {
            PolySimulation::Life(sim) => Some(sim.state()),
            PolySimulation::Wolfram(sim) => Some(sim.state()),
            PolySimulation::Schelling(sim) => Some(sim.state()),
            PolySimulation::Cue(_) => None,
        }
    }

    /// Computes `steps` generations.
    #[inline]
    pub fn run(&mut self, steps: u64, trace: bool) -> PolyOutput {
        dispatch!(self, sim => sim.run(steps, trace).into())
    }

    /// Computes `steps` generations, calling `observer` with the generation
    /// number and the text of each state.
    pub fn run_with<F>(&mut self, steps: u64, trace: bool, mut observer: F) -> PolyOutput
    where
        F: FnMut(u64, String),
    {
        dispatch!(self, sim => {
            let model = sim.model().clone();
            sim.run_with(steps, trace, |generation: u64, state: &_| {
                observer(generation, model.plaintext(state))
            })
            .into()
        })
    }
}
