//! Transition rules.
//!
//! Rules are pure: they see a cell and the values of its window, never the
//! grid or the history. Randomness, when a rule needs it, is passed in.
//!
//! For the notations of Life-like rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod cue;
mod life;
mod schelling;
mod wolfram;

pub use cue::Cue;
pub use life::Life;
pub use schelling::{AgentType, Decision, Schelling, VoidPolicy};
pub use wolfram::{Wolfram, PATTERNS};

/// A deterministic cell rule.
///
/// Maps the value of a cell and the values of its window
/// to the value of the cell in the next generation.
///
/// Implemented by [`Life`] and [`Wolfram`]. The movement rules
/// [`Schelling`] and [`Cue`] need a random draw and have their own methods.
pub trait Rule {
    /// The value of a cell.
    type Cell: Copy;

    /// The next value of a cell.
    fn apply(&self, cell: Self::Cell, nbhd: &[Self::Cell]) -> Self::Cell;
}
