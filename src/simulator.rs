//! This module defines the `Simulator`, which explores every computation path of a
//! nondeterministic machine breadth-first, one level of the configuration tree at a
//! time, up to a depth bound.

use crate::configuration::Configuration;
use crate::machine::Machine;
use crate::observer::{NoopObserver, Observer};
use crate::tracer::trace_path;
use crate::tree::{ExplorationTree, Node};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A configuration in the accept state was reached.
    Accepted,
    /// Every branch got stuck before the depth bound.
    Rejected,
    /// The depth bound was reached with live branches left.
    DepthExhausted,
}

/// Summary of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub input: String,
    pub outcome: Outcome,
    /// Level of the accepting configuration, the level after the last non-empty one on
    /// rejection, or the depth bound on exhaustion.
    pub depth: usize,
    /// Number of successor configurations generated.
    pub transitions: usize,
    /// Mean number of configurations per explored level.
    pub nondeterminism: f64,
}

impl RunResult {
    pub fn accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }
}

/// Everything a run produced: the result, the tree it built, and the traced path when
/// the input was accepted.
#[derive(Debug, Clone)]
pub struct Exploration {
    pub result: RunResult,
    pub tree: ExplorationTree,
    pub path: Option<Vec<Configuration>>,
}

/// Runs inputs against a borrowed machine. Runs share nothing with each other.
pub struct Simulator<'m> {
    machine: &'m Machine,
}

impl<'m> Simulator<'m> {
    pub fn new(machine: &'m Machine) -> Self {
        Self { machine }
    }

    pub fn machine(&self) -> &Machine {
        self.machine
    }

    /// Runs `input` for at most `max_depth` levels.
    pub fn run(&self, input: &str, max_depth: usize) -> RunResult {
        self.explore(input, max_depth, &mut NoopObserver).result
    }

    /// Runs `input`, reporting progress to `observer`.
    pub fn run_with_observer(
        &self,
        input: &str,
        max_depth: usize,
        observer: &mut dyn Observer,
    ) -> RunResult {
        self.explore(input, max_depth, observer).result
    }

    /// Runs `input` and keeps the exploration tree and traced path.
    ///
    /// Levels are processed in order and each level in generation order, so the first
    /// accepting configuration found is the earliest one at the shallowest depth.
    pub fn explore(&self, input: &str, max_depth: usize, observer: &mut dyn Observer) -> Exploration {
        let machine = self.machine;
        let mut tree = ExplorationTree::new(Configuration::initial(machine.start_state(), input));
        let mut transitions = 0;
        let mut level_sizes: Vec<usize> = Vec::new();

        observer.on_start(machine, input);

        for depth in 0..max_depth {
            let current = tree.level(depth).unwrap_or(&[]);
            let mut next_level = Vec::new();
            level_sizes.push(current.len());

            debug!(depth, configurations = current.len(), "exploring level");

            for (index, node) in current.iter().enumerate() {
                let config = &node.configuration;
                observer.on_visit(depth, config);

                if config.state() == machine.accept_state() {
                    let path = trace_path(machine, &tree, depth, index);
                    let result = RunResult {
                        input: input.to_string(),
                        outcome: Outcome::Accepted,
                        depth,
                        transitions,
                        nondeterminism: mean(&level_sizes),
                    };
                    return self.conclude(result, tree, Some(path), observer);
                }

                for transition in machine.transitions_for(config.state(), config.symbol()) {
                    next_level.push(Node {
                        configuration: config.apply(transition),
                        parent: Some(index),
                    });
                    transitions += 1;
                }
            }

            let exhausted = next_level.is_empty();
            tree.push_level(next_level);

            if exhausted {
                let result = RunResult {
                    input: input.to_string(),
                    outcome: Outcome::Rejected,
                    depth: depth + 1,
                    transitions,
                    nondeterminism: mean(&level_sizes),
                };
                return self.conclude(result, tree, None, observer);
            }
        }

        let result = RunResult {
            input: input.to_string(),
            outcome: Outcome::DepthExhausted,
            depth: max_depth,
            transitions,
            nondeterminism: mean(&level_sizes),
        };
        self.conclude(result, tree, None, observer)
    }

    fn conclude(
        &self,
        result: RunResult,
        tree: ExplorationTree,
        path: Option<Vec<Configuration>>,
        observer: &mut dyn Observer,
    ) -> Exploration {
        info!(
            machine = self.machine.name(),
            input = %result.input,
            outcome = ?result.outcome,
            depth = result.depth,
            transitions = result.transitions,
            "run concluded"
        );
        observer.on_conclude(&result, path.as_deref());

        Exploration { result, tree, path }
    }
}

fn mean(sizes: &[usize]) -> f64 {
    if sizes.is_empty() {
        return 0.0;
    }
    sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
}
