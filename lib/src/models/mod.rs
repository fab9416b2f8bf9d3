//! The four model families, each a rule and a window driven by the stepper.

mod cue;
mod life;
mod schelling;
mod wolfram;

pub use cue::{Agent, CueModel, CueState};
pub use life::LifeModel;
pub use schelling::SchellingModel;
pub use wolfram::WolframModel;

use crate::{rng::Seeds, step::UpdateScheme};
use std::fmt::Debug;

/// A model: takes one state to the next.
pub trait Model {
    /// The state of a generation.
    type State: Clone + Debug + PartialEq;

    /// Computes the next generation.
    ///
    /// `generation` is the number of the generation being produced,
    /// so the first step produces generation `1`. Random draws are taken
    /// from `seeds` keyed by this number, never from a shared generator.
    fn step(&self, state: &Self::State, seeds: &Seeds, generation: u64) -> Self::State;

    /// Number of living cells, or of agents.
    fn population(&self, state: &Self::State) -> usize;

    /// The update scheme of the model.
    fn scheme(&self) -> UpdateScheme;

    /// A short name, for logging.
    fn name(&self) -> &'static str;

    /// Renders a state as text.
    fn plaintext(&self, state: &Self::State) -> String;
}
