//! This module defines the core data structures and types shared by the simulator,
//! including transitions, head directions, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The blank symbol, both on the tape and in machine descriptions.
pub const BLANK_SYMBOL: char = '_';
/// The default number of levels explored before a run is declared inconclusive.
pub const DEFAULT_MAX_DEPTH: usize = 15;
/// The maximum allowed size for a machine description in bytes.
pub const MAX_DESCRIPTION_SIZE: usize = 65536; // 64KB

/// A single choice in the transition relation.
///
/// Several transitions may share the same `(state, symbol)` key; their order is the
/// order in which the simulator explores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the machine moves to.
    pub next_state: String,
    /// The symbol written under the head.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(next_state: impl Into<String>, write: char, direction: Direction) -> Self {
        Self {
            next_state: next_state.into(),
            write,
            direction,
        }
    }
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left, never past the first cell.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Applies the move to a head position. The tape is bounded on the left, so
    /// moving left from cell 0 leaves the head where it is.
    pub fn apply(self, head: usize) -> usize {
        match self {
            Direction::Left => head.saturating_sub(1),
            Direction::Right => head + 1,
        }
    }

    /// Returns the single-letter form used in machine descriptions.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// Represents the errors that can occur while loading or validating a machine.
///
/// Running a loaded machine never fails: stuck branches, rejection and depth
/// exhaustion are all ordinary outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NtmError {
    /// Indicates an error during the parsing of a machine description.
    #[error("Machine parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a machine that is structurally incomplete or fails a strict check.
    #[error("Machine validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading machine descriptions from disk.
    #[error("File error: {0}")]
    FileError(String),
}
