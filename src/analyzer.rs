//! This module provides lints for machine descriptions. None of these conditions stop a
//! machine from running; they point at rules that can never matter or at outcomes that
//! are decided before the first step.

use crate::machine::Machine;
use crate::types::NtmError;
use std::collections::HashSet;
use std::fmt;

/// A suspicious property of a machine.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// The start state has no outgoing rules and is not the accept state, so every input
    /// is rejected at depth 1.
    StartStateWithoutRules(String),
    /// No sequence of rules leads from the start state to the accept state.
    AcceptStateUnreachable(String),
    /// Rules keyed on the accept state never fire; accepting configurations stop the run.
    RulesFromAcceptState(String),
    /// Rules keyed on the reject state are explored like any other, since rejection only
    /// happens when every branch is stuck.
    RulesFromRejectState(String),
    /// States with outgoing rules that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::StartStateWithoutRules(state) => {
                write!(f, "Start state has no transitions: {}", state)
            }
            AnalysisWarning::AcceptStateUnreachable(state) => {
                write!(f, "Accept state is unreachable: {}", state)
            }
            AnalysisWarning::RulesFromAcceptState(state) => {
                write!(f, "Transitions from accept state are never taken: {}", state)
            }
            AnalysisWarning::RulesFromRejectState(state) => {
                write!(f, "Transitions from reject state are still explored: {}", state)
            }
            AnalysisWarning::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {:?}", states)
            }
        }
    }
}

impl From<AnalysisWarning> for NtmError {
    /// Converts an `AnalysisWarning` into a `NtmError::ValidationError` for strict loading.
    fn from(warning: AnalysisWarning) -> Self {
        NtmError::ValidationError(warning.to_string())
    }
}

/// Runs every lint against `machine`, returning the warnings in a stable order.
pub fn analyze(machine: &Machine) -> Vec<AnalysisWarning> {
    let reachable = reachable_states(machine);

    [
        check_start_state(machine),
        check_accept_reachable(machine, &reachable),
        check_accept_rules(machine),
        check_reject_rules(machine),
        check_unreachable_states(machine, &reachable),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Fails with the first warning, if any.
pub fn analyze_strict(machine: &Machine) -> Result<(), NtmError> {
    match analyze(machine).into_iter().next() {
        Some(warning) => Err(warning.into()),
        None => Ok(()),
    }
}

/// Collects every state reachable from the start state, ignoring the symbols read.
fn reachable_states(machine: &Machine) -> HashSet<&str> {
    let mut visited = HashSet::new();
    let mut queue = vec![machine.start_state()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for transition in machine.transitions_from(state) {
            if !visited.contains(transition.next_state.as_str()) {
                queue.push(&transition.next_state);
            }
        }
    }

    visited
}

fn check_start_state(machine: &Machine) -> Option<AnalysisWarning> {
    let start = machine.start_state();
    (!machine.has_transitions_from(start) && start != machine.accept_state())
        .then(|| AnalysisWarning::StartStateWithoutRules(start.to_string()))
}

fn check_accept_reachable(
    machine: &Machine,
    reachable: &HashSet<&str>,
) -> Option<AnalysisWarning> {
    let accept = machine.accept_state();
    (!reachable.contains(accept)).then(|| AnalysisWarning::AcceptStateUnreachable(accept.to_string()))
}

fn check_accept_rules(machine: &Machine) -> Option<AnalysisWarning> {
    let accept = machine.accept_state();
    machine
        .has_transitions_from(accept)
        .then(|| AnalysisWarning::RulesFromAcceptState(accept.to_string()))
}

fn check_reject_rules(machine: &Machine) -> Option<AnalysisWarning> {
    let reject = machine.reject_state();
    machine
        .has_transitions_from(reject)
        .then(|| AnalysisWarning::RulesFromRejectState(reject.to_string()))
}

fn check_unreachable_states(
    machine: &Machine,
    reachable: &HashSet<&str>,
) -> Option<AnalysisWarning> {
    let unreachable: Vec<String> = machine
        .source_states()
        .into_iter()
        .filter(|state| !reachable.contains(state))
        .map(String::from)
        .collect();

    (!unreachable.is_empty()).then_some(AnalysisWarning::UnreachableStates(unreachable))
}
