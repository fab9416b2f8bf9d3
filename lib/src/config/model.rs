//! Parameters of each model.

use super::init::{CueInit, GridInit, PopulationInit, RowInit};
use crate::{
    error::Error,
    models::{CueModel, LifeModel, SchellingModel, WolframModel},
    rng::Seeds,
    rules::{AgentType, Cue, Life, Schelling, VoidPolicy, Wolfram},
    simulation::Simulation,
    step::UpdateScheme,
    topology::Torus,
};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Life-like cellular automaton.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LifeConfig {
    /// Number of rows.
    #[educe(Default = 60)]
    pub rows: usize,

    /// Number of columns.
    #[educe(Default = 60)]
    pub cols: usize,

    /// The rule string of the cellular automaton.
    #[educe(Default(expression = "String::from(\"B3/S23\")"))]
    pub rule_string: String,

    /// The initial state.
    pub init: GridInit,
}

impl LifeConfig {
    /// Sets up a new configuration with given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        LifeConfig {
            rows,
            cols,
            ..LifeConfig::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the initial state.
    pub fn set_init(mut self, init: GridInit) -> Self {
        self.init = init;
        self
    }

    /// Builds the simulation. The default scheme is synchronous.
    pub fn simulation(
        &self,
        scheme: Option<UpdateScheme>,
        seeds: Seeds,
    ) -> Result<Simulation<LifeModel>, Error> {
        let torus = Torus::new(self.rows, self.cols)?;
        let rule: Life = self.rule_string.parse()?;
        let model = LifeModel::new(rule, torus, scheme.unwrap_or(UpdateScheme::Synchronous))?;
        let initial = self.init.build(torus, &mut seeds.init())?;
        Ok(Simulation::new(model, initial, seeds))
    }
}

/// An elementary cellular automaton.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WolframConfig {
    /// Length of the ring.
    #[educe(Default = 50)]
    pub length: usize,

    /// The rule number.
    #[educe(Default = 30)]
    pub rule: u8,

    /// The initial state.
    pub init: RowInit,
}

impl WolframConfig {
    /// Sets up a new configuration with given length.
    pub fn new(length: usize) -> Self {
        WolframConfig {
            length,
            ..WolframConfig::default()
        }
    }

    /// Sets the rule number.
    pub fn set_rule(mut self, rule: u8) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the initial state.
    pub fn set_init(mut self, init: RowInit) -> Self {
        self.init = init;
        self
    }

    /// Builds the simulation. The default scheme is synchronous.
    pub fn simulation(
        &self,
        scheme: Option<UpdateScheme>,
        seeds: Seeds,
    ) -> Result<Simulation<WolframModel>, Error> {
        let model = WolframModel::new(
            Wolfram::new(self.rule),
            self.length,
            scheme.unwrap_or(UpdateScheme::Synchronous),
        )?;
        let initial = self.init.build(self.length, &mut seeds.init())?;
        Ok(Simulation::new(model, initial, seeds))
    }
}

fn default_agent_types() -> Vec<AgentType> {
    vec![
        AgentType::new(1, "A", 0.8, 4.0),
        AgentType::new(2, "B", 0.6, 5.0),
    ]
}

/// Schelling's segregation model.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchellingConfig {
    /// Number of rows.
    #[educe(Default = 60)]
    pub rows: usize,

    /// Number of columns.
    #[educe(Default = 60)]
    pub cols: usize,

    /// The agent types.
    #[educe(Default(expression = "default_agent_types()"))]
    pub agent_types: Vec<AgentType>,

    /// Whether agents also want empty space around them.
    pub void_policy: VoidPolicy,

    /// The initial population.
    pub init: PopulationInit,
}

impl SchellingConfig {
    /// Sets up a new configuration with given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        SchellingConfig {
            rows,
            cols,
            ..SchellingConfig::default()
        }
    }

    /// Sets the agent types.
    pub fn set_agent_types(mut self, agent_types: Vec<AgentType>) -> Self {
        self.agent_types = agent_types;
        self
    }

    /// Sets the void policy.
    pub fn set_void_policy(mut self, void_policy: VoidPolicy) -> Self {
        self.void_policy = void_policy;
        self
    }

    /// Sets the initial population.
    pub fn set_init(mut self, init: PopulationInit) -> Self {
        self.init = init;
        self
    }

    /// Builds the simulation. The default scheme is sequential.
    pub fn simulation(
        &self,
        scheme: Option<UpdateScheme>,
        seeds: Seeds,
    ) -> Result<Simulation<SchellingModel>, Error> {
        let torus = Torus::new(self.rows, self.cols)?;
        let rule = Schelling::new(&self.agent_types, self.void_policy)?;
        let model = SchellingModel::new(rule, torus, scheme.unwrap_or(UpdateScheme::Sequential))?;
        let initial = self
            .init
            .build(torus, &self.agent_types, &mut seeds.init())?;
        Ok(Simulation::new(model, initial, seeds))
    }
}

/// The 1-D cultural space model.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CueConfig {
    /// Number of agents.
    #[educe(Default = 50)]
    pub agents: usize,

    /// Number of spaces.
    #[educe(Default = 50)]
    pub spaces: usize,

    /// Random characters are drawn from `0..=characters`.
    #[educe(Default = 100)]
    pub characters: usize,

    /// How far an agent looks for its next space.
    #[educe(Default = 3)]
    pub radius: usize,

    /// Maximal discrepancy for an interaction.
    #[educe(Default = 10.0)]
    pub delta_sigma: f64,

    /// Weight of the space in the new character of an agent.
    #[educe(Default = 0.1)]
    pub r_agents: f64,

    /// Weight of the agent in the new character of a space.
    #[educe(Default = 0.1)]
    pub r_spaces: f64,

    /// The initial agents and spaces.
    pub init: CueInit,
}

impl CueConfig {
    /// Sets up a new configuration with given numbers of agents and spaces.
    pub fn new(agents: usize, spaces: usize) -> Self {
        CueConfig {
            agents,
            spaces,
            ..CueConfig::default()
        }
    }

    /// Sets the range of random characters.
    pub fn set_characters(mut self, characters: usize) -> Self {
        self.characters = characters;
        self
    }

    /// Sets the radius of the window.
    pub fn set_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the maximal discrepancy for an interaction.
    pub fn set_delta_sigma(mut self, delta_sigma: f64) -> Self {
        self.delta_sigma = delta_sigma;
        self
    }

    /// Sets the interaction weights of agents and spaces.
    pub fn set_rates(mut self, r_agents: f64, r_spaces: f64) -> Self {
        self.r_agents = r_agents;
        self.r_spaces = r_spaces;
        self
    }

    /// Sets the initial state.
    pub fn set_init(mut self, init: CueInit) -> Self {
        self.init = init;
        self
    }

    /// Builds the simulation. Only the sequential scheme is supported.
    pub fn simulation(
        &self,
        scheme: Option<UpdateScheme>,
        seeds: Seeds,
    ) -> Result<Simulation<CueModel>, Error> {
        let rule = Cue {
            delta_sigma: self.delta_sigma,
            r_agents: self.r_agents,
            r_spaces: self.r_spaces,
        };
        let model = CueModel::new(
            rule,
            self.spaces,
            self.radius,
            scheme.unwrap_or(UpdateScheme::Sequential),
        )?;
        let initial = self
            .init
            .build(self.agents, self.spaces, self.characters, &mut seeds.init());
        if initial.agents.len() != self.agents {
            return Err(Error::AgentCountError {
                expected: self.agents,
                found: initial.agents.len(),
            });
        }
        model.check(&initial)?;
        Ok(Simulation::new(model, initial, seeds))
    }
}
