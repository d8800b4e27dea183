//! This module defines the `Machine` struct, the immutable description of a
//! nondeterministic single-tape Turing Machine: its special states and its
//! transition relation.

use crate::types::{Direction, NtmError, Transition};
use std::collections::{BTreeSet, HashMap};

/// An immutable nondeterministic Turing Machine.
///
/// States are opaque identifiers implied by the transition keys. The reject state is
/// carried for reporting only: the simulator rejects when every branch gets stuck,
/// not when a branch reaches the reject state.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    name: String,
    start_state: String,
    accept_state: String,
    reject_state: String,
    rules: HashMap<String, HashMap<char, Vec<Transition>>>,
}

impl Machine {
    /// Starts building a machine with the given name.
    pub fn builder(name: impl Into<String>) -> MachineBuilder {
        MachineBuilder {
            name: name.into(),
            ..MachineBuilder::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    pub fn accept_state(&self) -> &str {
        &self.accept_state
    }

    pub fn reject_state(&self) -> &str {
        &self.reject_state
    }

    /// Returns the transitions for `(state, symbol)` in declaration order.
    ///
    /// An empty slice means the configuration is stuck; this is how a branch dies and
    /// is not an error.
    pub fn transitions_for(&self, state: &str, symbol: char) -> &[Transition] {
        self.rules
            .get(state)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns every transition leaving `state`, whatever the symbol read.
    pub fn transitions_from(&self, state: &str) -> impl Iterator<Item = &Transition> {
        self.rules
            .get(state)
            .into_iter()
            .flat_map(|by_symbol| by_symbol.values())
            .flatten()
    }

    /// Checks whether any transition is keyed on `state`.
    pub fn has_transitions_from(&self, state: &str) -> bool {
        self.rules.contains_key(state)
    }

    /// Returns the states that appear as the source of a transition, sorted.
    pub fn source_states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        states.sort_unstable();
        states
    }

    /// Returns the number of distinct states mentioned anywhere in the machine.
    pub fn state_count(&self) -> usize {
        let mut states: BTreeSet<&str> = BTreeSet::new();
        states.insert(&self.start_state);
        states.insert(&self.accept_state);
        states.insert(&self.reject_state);

        for (state, by_symbol) in &self.rules {
            states.insert(state);
            for transition in by_symbol.values().flatten() {
                states.insert(&transition.next_state);
            }
        }

        states.len()
    }

    /// Returns the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.rules
            .values()
            .flat_map(|by_symbol| by_symbol.values())
            .map(Vec::len)
            .sum()
    }
}

/// Collects the parts of a `Machine` before freezing them.
#[derive(Debug, Default)]
pub struct MachineBuilder {
    name: String,
    start_state: Option<String>,
    accept_state: Option<String>,
    reject_state: Option<String>,
    rules: HashMap<String, HashMap<char, Vec<Transition>>>,
}

impl MachineBuilder {
    pub fn start_state(mut self, state: impl Into<String>) -> Self {
        self.start_state = Some(state.into());
        self
    }

    pub fn accept_state(mut self, state: impl Into<String>) -> Self {
        self.accept_state = Some(state.into());
        self
    }

    pub fn reject_state(mut self, state: impl Into<String>) -> Self {
        self.reject_state = Some(state.into());
        self
    }

    /// Appends a transition; chaining form of [`MachineBuilder::add_transition`].
    pub fn transition(
        mut self,
        state: impl Into<String>,
        read: char,
        next_state: impl Into<String>,
        write: char,
        direction: Direction,
    ) -> Self {
        self.add_transition(state, read, Transition::new(next_state, write, direction));
        self
    }

    /// Appends a transition after any already declared for the same `(state, read)`.
    pub fn add_transition(&mut self, state: impl Into<String>, read: char, transition: Transition) {
        self.rules
            .entry(state.into())
            .or_default()
            .entry(read)
            .or_default()
            .push(transition);
    }

    /// Freezes the machine. The start, accept and reject states are mandatory.
    pub fn build(self) -> Result<Machine, NtmError> {
        Ok(Machine {
            start_state: required(self.start_state, "start")?,
            accept_state: required(self.accept_state, "accept")?,
            reject_state: required(self.reject_state, "reject")?,
            name: self.name,
            rules: self.rules,
        })
    }
}

fn required(state: Option<String>, role: &str) -> Result<String, NtmError> {
    state.ok_or_else(|| NtmError::ValidationError(format!("Missing '{role}' state")))
}
