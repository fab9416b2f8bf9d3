//! Simulation configuration.

use crate::{
    error::Error,
    poly::{PolyOutput, PolySimulation},
    rng::Seeds,
    step::UpdateScheme,
};
use educe::Educe;
use from_variants::FromVariants;
use log::info;

mod init;
mod model;

pub use init::{CueInit, GridInit, PopulationInit, RowInit};
pub use model::{CueConfig, LifeConfig, SchellingConfig, WolframConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which model to simulate, and its parameters.
#[derive(Clone, Debug, PartialEq, FromVariants)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum ModelConfig {
    /// A Life-like cellular automaton.
    Life(LifeConfig),
    /// An elementary cellular automaton.
    Wolfram(WolframConfig),
    /// Schelling's segregation model.
    Schelling(SchellingConfig),
    /// The 1-D cultural space model.
    Cue(CueConfig),
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::Life(LifeConfig::default())
    }
}

/// Simulation configuration.
///
/// The simulation will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of generations of a run.
    #[educe(Default = 100)]
    pub steps: u64,

    /// The run seed.
    ///
    /// `None` means that the seed is taken from the system clock.
    pub seed: Option<u64>,

    /// Whether to keep every generation in the output.
    #[educe(Default = true)]
    pub trace: bool,

    /// The update scheme.
    ///
    /// `None` means the default scheme of the model: synchronous for
    /// Life and Wolfram rules, sequential for Schelling and cultural
    /// space models.
    pub scheme: Option<UpdateScheme>,

    /// The model.
    pub model: ModelConfig,
}

impl Config {
    /// Sets up a new configuration for a model.
    pub fn new<M: Into<ModelConfig>>(model: M) -> Self {
        Config {
            model: model.into(),
            ..Config::default()
        }
    }

    /// Sets the number of generations.
    pub fn set_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the run seed.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Sets whether to keep every generation.
    pub fn set_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Sets the update scheme.
    pub fn set_scheme<T: Into<Option<UpdateScheme>>>(mut self, scheme: T) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the model.
    pub fn set_model<M: Into<ModelConfig>>(mut self, model: M) -> Self {
        self.model = model.into();
        self
    }

    /// The seeds of the run, from the configured seed or from the clock.
    pub fn seeds(&self) -> Seeds {
        match self.seed {
            Some(seed) => Seeds::new(seed),
            None => {
                let seeds = Seeds::from_clock();
                info!("No seed given, using {} from the clock.", seeds.run());
                seeds
            }
        }
    }

    /// Creates a new simulation from the configuration.
    ///
    /// Returns an error if any parameter is invalid.
    /// No state is created before the parameters are checked.
    pub fn simulation(&self) -> Result<PolySimulation, Error> {
        if self.steps == 0 {
            return Err(Error::NonPositiveError);
        }
        let seeds = self.seeds();
        let simulation: PolySimulation = match &self.model {
            ModelConfig::Life(config) => config.simulation(self.scheme, seeds)?.into(),
            ModelConfig::Wolfram(config) => config.simulation(self.scheme, seeds)?.into(),
            ModelConfig::Schelling(config) => config.simulation(self.scheme, seeds)?.into(),
            ModelConfig::Cue(config) => config.simulation(self.scheme, seeds)?.into(),
        };
        Ok(simulation)
    }

    /// Creates a simulation and runs it for the configured number of steps.
    pub fn run(&self) -> Result<PolyOutput, Error> {
        let mut simulation = self.simulation()?;
        Ok(simulation.run(self.steps, self.trace))
    }
}
