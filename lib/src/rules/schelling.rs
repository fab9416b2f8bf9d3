//! Schelling's model of segregation.

use crate::{
    cells::{State, VOID},
    error::Error,
};
use educe::Educe;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A type of agent.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentType {
    /// The state of the cells holding this agent. `0` is reserved for voids.
    #[educe(Default = 1)]
    pub id: u8,

    /// A label, only used for display.
    pub name: String,

    /// The minimal fraction of like neighbors among non-void neighbors
    /// for an agent to stay.
    #[educe(Default = 0.5)]
    pub tolerance: f64,

    /// Relative frequency of this type in a random initial state.
    #[educe(Default = 1.0)]
    pub frequency: f64,
}

impl AgentType {
    /// A new agent type.
    pub fn new<S: ToString>(id: u8, name: S, tolerance: f64, frequency: f64) -> Self {
        AgentType {
            id,
            name: name.to_string(),
            tolerance,
            frequency,
        }
    }
}

/// Whether empty space around an agent matters to its satisfaction.
#[derive(Clone, Copy, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VoidPolicy {
    /// Only the match score matters.
    #[educe(Default)]
    Ignore,

    /// The fraction of void cells in the window must also be at least this value.
    Require(f64),
}

/// What an agent does in one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Stays where it is.
    Stay,
    /// Moves to the void cell in this slot of its window.
    Move(usize),
}

/// The movement rule of the Schelling model.
#[derive(Clone, Debug, PartialEq)]
pub struct Schelling {
    /// Tolerance of each agent type, indexed by id. `None` for unknown ids.
    tolerances: Vec<Option<f64>>,
    void_policy: VoidPolicy,
}

impl Schelling {
    /// Builds the rule from the agent types.
    ///
    /// Fails if there is no type, if an id is `0` or used twice,
    /// or if a tolerance or the void policy is outside of `[0, 1]`.
    pub fn new(types: &[AgentType], void_policy: VoidPolicy) -> Result<Self, Error> {
        if types.is_empty() {
            return Err(Error::NoAgentTypes);
        }
        let mut tolerances = vec![None; 256];
        for agent_type in types {
            let id = agent_type.id;
            if id == VOID.0 || tolerances[id as usize].is_some() {
                return Err(Error::AgentTypeError(id));
            }
            let tolerance = agent_type.tolerance;
            if !(0.0..=1.0).contains(&tolerance) {
                return Err(Error::OutOfUnitRange {
                    name: "tolerance",
                    value: tolerance,
                });
            }
            tolerances[id as usize] = Some(tolerance);
        }
        if let VoidPolicy::Require(ratio) = void_policy {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::OutOfUnitRange {
                    name: "void ratio",
                    value: ratio,
                });
            }
        }
        let last = tolerances.iter().rposition(Option::is_some).unwrap_or(0);
        tolerances.truncate(last + 1);
        Ok(Schelling {
            tolerances,
            void_policy,
        })
    }

    /// The tolerance of an agent type, if the type is known.
    #[inline]
    pub fn tolerance(&self, agent: State) -> Option<f64> {
        self.tolerances.get(agent.0 as usize).copied().flatten()
    }

    /// The void policy.
    #[inline]
    pub fn void_policy(&self) -> VoidPolicy {
        self.void_policy
    }

    /// Fraction of like neighbors among the non-void neighbors.
    ///
    /// `0` when every neighbor is void.
    pub fn match_score(agent: State, nbhd: &[State]) -> f64 {
        let non_void = nbhd.iter().filter(|s| !s.is_void()).count();
        if non_void == 0 {
            return 0.0;
        }
        let matches = nbhd.iter().filter(|&&s| s == agent).count();
        matches as f64 / non_void as f64
    }

    /// Whether an agent is content with its window.
    pub fn is_satisfied(&self, agent: State, nbhd: &[State]) -> bool {
        let tolerance = self.tolerance(agent).unwrap_or(0.0);
        if Self::match_score(agent, nbhd) < tolerance {
            return false;
        }
        match self.void_policy {
            VoidPolicy::Ignore => true,
            VoidPolicy::Require(ratio) => {
                let voids = nbhd.iter().filter(|s| s.is_void()).count();
                !nbhd.is_empty() && voids as f64 / nbhd.len() as f64 >= ratio
            }
        }
    }

    /// Decides whether the agent in a cell moves, and where.
    ///
    /// Voids never move. A satisfied agent stays. An unsatisfied agent moves
    /// to one of the void cells of its window, chosen uniformly; if there is
    /// none, it stays.
    pub fn decide<R: Rng + ?Sized>(&self, agent: State, nbhd: &[State], rng: &mut R) -> Decision {
        if agent.is_void() || self.is_satisfied(agent, nbhd) {
            return Decision::Stay;
        }
        let voids = nbhd.iter().filter(|s| s.is_void()).count();
        if voids == 0 {
            return Decision::Stay;
        }
        let pick = rng.gen_range(0..voids);
        nbhd.iter()
            .enumerate()
            .filter(|(_, s)| s.is_void())
            .nth(pick)
            .map_or(Decision::Stay, |(slot, _)| Decision::Move(slot))
    }
}
