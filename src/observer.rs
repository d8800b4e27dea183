//! Hooks for watching a run without the simulator doing any I/O itself.

use crate::configuration::Configuration;
use crate::machine::Machine;
use crate::simulator::RunResult;

/// Receives simulation events. Every method defaults to doing nothing.
pub trait Observer {
    /// Called once before the initial configuration is visited.
    fn on_start(&mut self, _machine: &Machine, _input: &str) {}

    /// Called for each configuration as it is checked, in exploration order.
    fn on_visit(&mut self, _depth: usize, _configuration: &Configuration) {}

    /// Called once with the final result and, on acceptance, the traced path.
    fn on_conclude(&mut self, _result: &RunResult, _path: Option<&[Configuration]>) {}
}

/// An observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
