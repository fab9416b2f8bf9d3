//! The simulation driver.

use crate::{
    models::{CueState, Model},
    rng::Seeds,
    world::Grid,
};
use log::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Receives every generation of a run.
///
/// Implemented for closures `FnMut(u64, &S)`.
pub trait Observer<S> {
    /// Called once after each generation is computed.
    fn observe(&mut self, generation: u64, state: &S);
}

impl<S, F: FnMut(u64, &S)> Observer<S> for F {
    #[inline]
    fn observe(&mut self, generation: u64, state: &S) {
        self(generation, state)
    }
}

/// Every state of a run.
///
/// Frame `0` is the initial state, frame `t` the state after `t` generations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct History<S> {
    frames: Vec<S>,
}

impl<S> History<S> {
    /// An empty history with room for `frames` frames.
    pub fn with_capacity(frames: usize) -> Self {
        History {
            frames: Vec::with_capacity(frames),
        }
    }

    pub(crate) fn push(&mut self, state: S) {
        self.frames.push(state);
    }

    /// All frames.
    #[inline]
    pub fn frames(&self) -> &[S] {
        &self.frames
    }

    /// The frame of a generation.
    #[inline]
    pub fn get(&self, t: usize) -> Option<&S> {
        self.frames.get(t)
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there is no frame.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl History<Grid> {
    /// `(time, rows, cols)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        let (rows, cols) = self.frames.first().map_or((0, 0), Grid::shape);
        (self.frames.len(), rows, cols)
    }

    /// The states of all frames as a flat time-major buffer.
    pub fn to_array(&self) -> Vec<u8> {
        self.frames
            .iter()
            .flat_map(|grid| grid.iter().map(|state| state.0))
            .collect()
    }
}

impl History<CueState> {
    /// Characters of the agents, `time × agents`.
    pub fn agent_characters(&self) -> Vec<f64> {
        self.frames
            .iter()
            .flat_map(|state| state.agents.iter().map(|agent| agent.character))
            .collect()
    }

    /// Positions of the agents, `time × agents`.
    pub fn agent_positions(&self) -> Vec<usize> {
        self.frames
            .iter()
            .flat_map(|state| state.agents.iter().map(|agent| agent.position))
            .collect()
    }

    /// Characters of the spaces, `time × spaces`.
    pub fn space_characters(&self) -> Vec<f64> {
        self.frames
            .iter()
            .flat_map(|state| state.spaces.iter().copied())
            .collect()
    }
}

/// The result of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Output<S> {
    /// The run seed, so that the run can be repeated.
    pub seed: u64,
    /// Number of generations computed.
    pub generations: u64,
    /// The state before the run.
    pub start: S,
    /// The state after the run.
    pub end: S,
    /// Every state, if tracing was enabled.
    pub history: Option<History<S>>,
}

/// A running model.
///
/// Owns the current state; each step replaces it with the next one.
#[derive(Clone, Debug)]
pub struct Simulation<M: Model> {
    model: M,
    seeds: Seeds,
    generation: u64,
    state: M::State,
}

impl<M: Model> Simulation<M> {
    /// Starts a simulation at generation `0`.
    pub fn new(model: M, initial: M::State, seeds: Seeds) -> Self {
        let population = model.population(&initial);
        info!(
            "Starting {} simulation with seed {}, population {}.",
            model.name(),
            seeds.run(),
            population
        );
        if population == 0 {
            warn!("The initial state of the {} simulation is empty.", model.name());
        }
        Simulation {
            model,
            seeds,
            generation: 0,
            state: initial,
        }
    }

    /// The model.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seeds.run()
    }

    /// Number of generations computed so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> &M::State {
        &self.state
    }

    /// Number of living cells, or of agents, in the current state.
    #[inline]
    pub fn population(&self) -> usize {
        self.model.population(&self.state)
    }

    /// The current state as text.
    #[inline]
    pub fn plaintext(&self) -> String {
        self.model.plaintext(&self.state)
    }

    /// Computes exactly one generation.
    pub fn step(&mut self) -> &M::State {
        self.generation += 1;
        self.state = self.model.step(&self.state, &self.seeds, self.generation);
        debug!(
            "Generation {}: population {}.",
            self.generation,
            self.population()
        );
        &self.state
    }

    /// Computes `steps` generations.
    ///
    /// With `trace`, every state is kept in the history of the output.
    pub fn run(&mut self, steps: u64, trace: bool) -> Output<M::State> {
        self.run_with(steps, trace, |_: u64, _: &M::State| {})
    }

    /// Computes `steps` generations, passing each of them to the observer.
    pub fn run_with<O>(&mut self, steps: u64, trace: bool, mut observer: O) -> Output<M::State>
    where
        O: Observer<M::State>,
    {
        let start = self.state.clone();
        let mut history = if trace {
            let mut history = History::with_capacity(steps as usize + 1);
            history.push(start.clone());
            Some(history)
        } else {
            None
        };
        for _ in 0..steps {
            self.step();
            observer.observe(self.generation, &self.state);
            if let Some(history) = history.as_mut() {
                history.push(self.state.clone());
            }
        }
        info!(
            "Finished {} generations at generation {}, population {}.",
            steps,
            self.generation,
            self.population()
        );
        Output {
            seed: self.seeds.run(),
            generations: steps,
            start,
            end: self.state.clone(),
            history,
        }
    }
}
