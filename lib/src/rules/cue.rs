//! The 1-D cultural space model.
//!
//! Agents with a continuous "character" walk on a ring of public spaces,
//! each with its own character. In every step an agent picks a nearby space,
//! preferring spaces that resemble it, moves there, and if the two are close
//! enough they become more alike.

use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The interaction rule.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cue {
    /// Spaces whose discrepancy with the agent exceeds this value
    /// get a zero interaction score.
    pub delta_sigma: f64,
    /// Weight of the space in the new character of the agent.
    pub r_agents: f64,
    /// Weight of the agent in the new character of the space.
    pub r_spaces: f64,
}

impl Cue {
    /// Interaction scores of the candidate spaces.
    ///
    /// `score = max_discrepancy - discrepancy + 1`, or `0` when the
    /// discrepancy exceeds `delta_sigma`.
    pub fn scores(&self, agent: f64, spaces: &[f64], scores: &mut [f64]) {
        debug_assert_eq!(spaces.len(), scores.len());
        let max = spaces
            .iter()
            .map(|&space| (agent - space).abs())
            .fold(0.0, f64::max);
        for (score, &space) in scores.iter_mut().zip(spaces) {
            let discrepancy = (agent - space).abs();
            *score = if discrepancy <= self.delta_sigma {
                max - discrepancy + 1.0
            } else {
                0.0
            };
        }
    }

    /// Samples a candidate with probability proportional to its score.
    ///
    /// Falls back to a uniform choice when every score is zero.
    pub fn choose<R: Rng + ?Sized>(&self, scores: &[f64], rng: &mut R) -> usize {
        match WeightedIndex::new(scores) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.gen_range(0..scores.len()),
        }
    }

    /// The new characters of an agent and a space after they interact.
    #[inline]
    pub fn interact(&self, agent: f64, space: f64) -> (f64, f64) {
        (
            (agent + self.r_agents * space) / (1.0 + self.r_agents),
            (space + self.r_spaces * agent) / (1.0 + self.r_spaces),
        )
    }
}

impl Default for Cue {
    fn default() -> Self {
        Cue {
            delta_sigma: 10.0,
            r_agents: 0.1,
            r_spaces: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn scores() {
        let cue = Cue {
            delta_sigma: 5.0,
            ..Cue::default()
        };
        let mut scores = [0.0; 4];
        cue.scores(10.0, &[10.0, 12.0, 20.0, 6.0], &mut scores);
        assert_eq!(scores, [11.0, 9.0, 0.0, 7.0]);
    }

    #[test]
    fn zero_scores_fall_back_to_uniform() {
        let cue = Cue::default();
        let mut seen = [false; 3];
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            seen[cue.choose(&[0.0; 3], &mut rng)] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn zero_score_is_never_chosen() {
        let cue = Cue::default();
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_ne!(cue.choose(&[1.0, 0.0, 2.0], &mut rng), 1);
        }
    }

    #[test]
    fn interact() {
        let cue = Cue {
            delta_sigma: 1.0,
            r_agents: 1.0,
            r_spaces: 3.0,
        };
        assert_eq!(cue.interact(2.0, 6.0), (4.0, 3.0));
    }
}
