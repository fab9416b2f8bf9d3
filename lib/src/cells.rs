//! Cell states and coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a cell.
///
/// For Life and Wolfram rules a cell is either [`DEAD`] or [`ALIVE`].
/// For the Schelling model `0` is a [`VOID`] and `1..=255` are agent type ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(pub u8);

/// The Dead state.
pub const DEAD: State = State(0);
/// The Alive state.
pub const ALIVE: State = State(1);
/// An empty cell in the Schelling model.
pub const VOID: State = State(0);

impl State {
    /// Whether the cell is empty (dead, or void).
    #[inline]
    pub fn is_void(self) -> bool {
        self == VOID
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed.
pub type Coord = (usize, usize);
