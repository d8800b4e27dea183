//! A configuration is one instantaneous description of the machine: control state,
//! head position and tape contents. Configurations are values; applying a transition
//! produces a new configuration with its own copy of the tape.

use crate::types::{Transition, BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    state: String,
    head: usize,
    tape: Vec<char>,
}

impl Configuration {
    pub fn new(state: impl Into<String>, head: usize, tape: Vec<char>) -> Self {
        Self {
            state: state.into(),
            head,
            tape,
        }
    }

    /// Creates the starting configuration for `input`: head on the first cell and the
    /// input followed by a single blank.
    pub fn initial(start_state: &str, input: &str) -> Self {
        let mut tape: Vec<char> = input.chars().collect();
        tape.push(BLANK_SYMBOL);

        Self::new(start_state, 0, tape)
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Returns the symbol under the head. Cells past the end of the tape read as blank
    /// without being materialized.
    pub fn symbol(&self) -> char {
        self.tape.get(self.head).copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Applies `transition`, returning the successor configuration.
    ///
    /// The written symbol replaces the cell under the head, or is appended when the head
    /// sits past the end of the tape.
    pub fn apply(&self, transition: &Transition) -> Configuration {
        let mut tape = self.tape.clone();
        match tape.get_mut(self.head) {
            Some(cell) => *cell = transition.write,
            None => tape.push(transition.write),
        }

        Configuration {
            state: transition.next_state.clone(),
            head: transition.direction.apply(self.head),
            tape,
        }
    }
}

/// Renders `<left> [<state>] <head symbol> <right>`.
impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let split = self.head.min(self.tape.len());
        let left: String = self.tape[..split].iter().collect();
        let right: String = self.tape.iter().skip(self.head + 1).collect();

        write!(f, "{} [{}] {} {}", left, self.state, self.symbol(), right)
    }
}
