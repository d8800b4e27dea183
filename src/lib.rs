//! This crate provides the core logic for a nondeterministic Turing Machine simulator.
//! It explores every computation path of a machine breadth-first up to a depth bound,
//! reports whether some path accepts, and traces the accepting path. It also includes
//! modules for loading and linting machine descriptions and for rendering run reports.

pub mod analyzer;
pub mod configuration;
pub mod loader;
pub mod machine;
pub mod observer;
pub mod parser;
pub mod programs;
pub mod report;
pub mod simulator;
pub mod tracer;
pub mod tree;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the lint entry points from the analyzer module.
pub use analyzer::{analyze, analyze_strict, AnalysisWarning};
/// Re-exports the `Configuration` struct from the configuration module.
pub use configuration::Configuration;
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the `Machine` model and its builder.
pub use machine::{Machine, MachineBuilder};
/// Re-exports the observer hooks.
pub use observer::{NoopObserver, Observer};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `MachineInfo`, `MachineManager`, and `MACHINES` from the programs module.
pub use programs::{MachineInfo, MachineManager, MACHINES};
/// Re-exports the report renderers.
pub use report::{summary_table, summary_table_with_comments, TraceWriter};
/// Re-exports the exploration engine and its results.
pub use simulator::{Exploration, Outcome, RunResult, Simulator};
/// Re-exports the path tracer.
pub use tracer::{is_parent, trace_path};
/// Re-exports the exploration tree.
pub use tree::{ExplorationTree, Node};
/// Re-exports the shared types.
pub use types::{
    Direction, NtmError, Transition, BLANK_SYMBOL, DEFAULT_MAX_DEPTH, MAX_DESCRIPTION_SIZE,
};
