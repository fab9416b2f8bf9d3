//! All kinds of errors in this crate.

use crate::{
    cells::{Coord, State},
    step::UpdateScheme,
};
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// Every variant except [`Error::SetCellError`] is a configuration error,
/// reported before any state is created.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// Unable to set cell at {0:?}: it lies outside of the grid.
    SetCellError(Coord),
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// Invalid Wolfram rule: {0:?}. Expected a number between 0 and 255.
    ParseWolframError(String),
    /// Width / height / length / steps / radius should be positive.
    NonPositiveError,
    /// A window of radius {radius} does not fit in a {rows}x{cols} grid.
    WindowTooLarge {
        /// Radius of the window.
        radius: usize,
        /// Number of rows of the grid.
        rows: usize,
        /// Number of columns of the grid.
        cols: usize,
    },
    /// {name} should be between 0 and 1, got {value}.
    OutOfUnitRange {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// {name} should be a finite non-negative number, got {value}.
    NegativeError {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Expected {expected} cells, got {found}.
    ShapeError {
        /// Number of cells required by the shape.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
    /// Expected {expected} agents, got {found}.
    AgentCountError {
        /// Number of agents in the configuration.
        expected: usize,
        /// Number of agents supplied.
        found: usize,
    },
    /// Agent type id {0} is reserved or used twice.
    AgentTypeError(u8),
    /// At least one agent type is required.
    NoAgentTypes,
    /// Agent {0} is placed outside of the spaces.
    AgentPositionError(usize),
    /// The {0:?} update scheme is not supported by this model.
    UnsupportedScheme(UpdateScheme),
    /// Invalid character {0:?} in a plaintext pattern.
    PatternError(char),
    /// Cell at {0:?} has invalid state: {1:?}.
    InvalidState(Coord, State),
}
