use super::Model;
use crate::{
    error::Error,
    rng::Seeds,
    rules::Cue,
    step::UpdateScheme,
    topology::{Torus, Window},
};
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An agent of the cultural space model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Agent {
    /// The character of the agent.
    pub character: f64,
    /// Index of the space the agent stands on.
    pub position: usize,
}

/// Agents and spaces of one generation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CueState {
    /// The agents, in a fixed order.
    pub agents: Vec<Agent>,
    /// The characters of the spaces, a ring.
    pub spaces: Vec<f64>,
}

/// The 1-D cultural space model.
///
/// Agents act one after the other, in index order, and each sees the
/// spaces as left by the agents before it.
#[derive(Clone, Debug, PartialEq)]
pub struct CueModel {
    rule: Cue,
    window: Window,
}

impl CueModel {
    /// Agents look at the spaces within `radius` of their position,
    /// their own space excluded.
    ///
    /// Only [`UpdateScheme::Sequential`] is supported.
    pub fn new(rule: Cue, spaces: usize, radius: usize, scheme: UpdateScheme) -> Result<Self, Error> {
        if scheme != UpdateScheme::Sequential {
            return Err(Error::UnsupportedScheme(scheme));
        }
        for &(name, value) in &[
            ("delta_sigma", rule.delta_sigma),
            ("r_agents", rule.r_agents),
            ("r_spaces", rule.r_spaces),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(Error::NegativeError { name, value });
            }
        }
        let window = Window::line(Torus::ring(spaces)?, radius, false)?;
        Ok(CueModel { rule, window })
    }

    /// The rule.
    pub fn rule(&self) -> &Cue {
        &self.rule
    }

    /// Number of spaces.
    pub fn spaces(&self) -> usize {
        self.window.torus().cols()
    }

    /// Checks that a state fits the ring of spaces.
    pub fn check(&self, state: &CueState) -> Result<(), Error> {
        if state.spaces.len() != self.spaces() {
            return Err(Error::ShapeError {
                expected: self.spaces(),
                found: state.spaces.len(),
            });
        }
        match state
            .agents
            .iter()
            .position(|agent| agent.position >= self.spaces())
        {
            Some(index) => Err(Error::AgentPositionError(index)),
            None => Ok(()),
        }
    }
}

impl Model for CueModel {
    type State = CueState;

    fn step(&self, state: &CueState, seeds: &Seeds, generation: u64) -> CueState {
        let mut next = state.clone();
        let CueState { agents, spaces } = &mut next;
        let mut candidates = Vec::with_capacity(self.window.len());
        let mut scores = vec![0.0; self.window.len()];
        for (index, agent) in agents.iter_mut().enumerate() {
            let coord = (0, agent.position);
            candidates.clear();
            candidates.extend(self.window.resolve(coord).map(|(_, col)| spaces[col]));
            self.rule.scores(agent.character, &candidates, &mut scores);

            let mut rng = seeds.agent(generation, index);
            let slot = self.rule.choose(&scores, &mut rng);
            let (_, target) = self.window.resolve_slot(coord, slot);
            agent.position = target;
            if scores[slot] > 0.0 {
                let (character, space) = self.rule.interact(agent.character, spaces[target]);
                agent.character = character;
                spaces[target] = space;
            }
        }
        next
    }

    fn population(&self, state: &CueState) -> usize {
        state.agents.len()
    }

    fn scheme(&self) -> UpdateScheme {
        UpdateScheme::Sequential
    }

    fn name(&self) -> &'static str {
        "cue"
    }

    /// One line per space: its index, its character,
    /// and the characters of the agents standing on it.
    fn plaintext(&self, state: &CueState) -> String {
        let mut text = String::new();
        for (position, space) in state.spaces.iter().enumerate() {
            let _ = write!(text, "{:>4} {:>8.2} |", position, space);
            for agent in state.agents.iter().filter(|a| a.position == position) {
                let _ = write!(text, " {:.2}", agent.character);
            }
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agents_stay_in_their_window() -> Result<(), Error> {
        let model = CueModel::new(Cue::default(), 10, 2, UpdateScheme::Sequential)?;
        let state = CueState {
            agents: vec![
                Agent {
                    character: 3.0,
                    position: 0,
                },
                Agent {
                    character: 50.0,
                    position: 5,
                },
            ],
            spaces: (0..10).map(|i| i as f64 * 10.0).collect(),
        };
        let seeds = Seeds::new(11);
        let next = model.step(&state, &seeds, 1);
        let near = |from: usize, to: usize| {
            let d = (from + 10 - to) % 10;
            d == 1 || d == 2 || d == 8 || d == 9
        };
        assert!(near(0, next.agents[0].position));
        assert!(near(5, next.agents[1].position));
        assert_eq!(next, model.step(&state, &seeds, 1));
        Ok(())
    }

    #[test]
    fn far_spaces_do_not_interact() -> Result<(), Error> {
        let rule = Cue {
            delta_sigma: 1.0,
            r_agents: 1.0,
            r_spaces: 1.0,
        };
        let model = CueModel::new(rule, 3, 1, UpdateScheme::Sequential)?;
        let state = CueState {
            agents: vec![Agent {
                character: 0.0,
                position: 0,
            }],
            spaces: vec![0.0, 100.0, 100.0],
        };
        let next = model.step(&state, &Seeds::new(5), 1);
        assert_eq!(next.agents[0].character, 0.0);
        assert_eq!(next.spaces, state.spaces);
        assert_ne!(next.agents[0].position, 0);
        Ok(())
    }

    #[test]
    fn invalid_parameters() -> Result<(), Error> {
        assert_eq!(
            CueModel::new(Cue::default(), 10, 1, UpdateScheme::Synchronous),
            Err(Error::UnsupportedScheme(UpdateScheme::Synchronous))
        );
        let rule = Cue {
            r_spaces: -1.0,
            ..Cue::default()
        };
        assert_eq!(
            CueModel::new(rule, 10, 1, UpdateScheme::Sequential),
            Err(Error::NegativeError {
                name: "r_spaces",
                value: -1.0
            })
        );
        let rule = Cue {
            r_agents: f64::INFINITY,
            ..Cue::default()
        };
        assert_eq!(
            CueModel::new(rule, 10, 1, UpdateScheme::Sequential),
            Err(Error::NegativeError {
                name: "r_agents",
                value: f64::INFINITY
            })
        );
        let rule = Cue {
            delta_sigma: f64::NAN,
            ..Cue::default()
        };
        assert!(matches!(
            CueModel::new(rule, 10, 1, UpdateScheme::Sequential),
            Err(Error::NegativeError {
                name: "delta_sigma",
                ..
            })
        ));
        let model = CueModel::new(Cue::default(), 4, 1, UpdateScheme::Sequential)?;
        let state = CueState {
            agents: vec![Agent::default(), Agent { character: 1.0, position: 4 }],
            spaces: vec![0.0; 4],
        };
        assert_eq!(model.check(&state), Err(Error::AgentPositionError(1)));
        Ok(())
    }
}
