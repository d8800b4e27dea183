use crate::machine::Machine;
use crate::types::NtmError;

use std::sync::RwLock;

// Built-in machine descriptions
const MACHINE_TEXTS: [&str; 3] = [
    include_str!("../machines/a_plus.csv"),
    include_str!("../machines/contains_aa.csv"),
    include_str!("../machines/runaway.csv"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<Machine>> = RwLock::new(Vec::new());
}

pub struct MachineManager;

impl MachineManager {
    /// Parses the built-in machines into the shared registry.
    pub fn load() -> Result<(), NtmError> {
        let mut machines = Vec::new();

        for text in MACHINE_TEXTS {
            match crate::parser::parse(text) {
                Ok(machine) => machines.push(machine),
                Err(e) => tracing::error!("Failed to parse built-in machine: {}", e),
            }
        }

        let mut write_guard = MACHINES
            .write()
            .map_err(|_| NtmError::FileError("Failed to acquire write lock".to_string()))?;
        *write_guard = machines;

        Ok(())
    }

    /// Loads the registry on first use.
    fn ensure_loaded() {
        let empty = MACHINES.read().map(|m| m.is_empty()).unwrap_or(true);
        if empty {
            if let Err(e) = Self::load() {
                tracing::error!("Failed to load built-in machines: {}", e);
            }
        }
    }

    /// Get the number of available machines
    pub fn get_machine_count() -> usize {
        Self::ensure_loaded();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn get_machine_by_index(index: usize) -> Result<Machine, NtmError> {
        Self::ensure_loaded();

        MACHINES
            .read()
            .map_err(|_| NtmError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| NtmError::ValidationError(format!("Machine index {} out of range", index)))
    }

    /// Get a machine by its name
    pub fn get_machine_by_name(name: &str) -> Result<Machine, NtmError> {
        Self::ensure_loaded();

        MACHINES
            .read()
            .map_err(|_| NtmError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|machine| machine.name() == name)
            .cloned()
            .ok_or_else(|| NtmError::ValidationError(format!("Machine '{}' not found", name)))
    }

    /// List all machine names
    pub fn list_machine_names() -> Vec<String> {
        Self::ensure_loaded();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|m| m.name().to_string()).collect())
            .unwrap_or_default()
    }

    /// Get information about a machine by its index
    pub fn get_machine_info(index: usize) -> Result<MachineInfo, NtmError> {
        let machine = Self::get_machine_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: machine.name().to_string(),
            start_state: machine.start_state().to_string(),
            accept_state: machine.accept_state().to_string(),
            state_count: machine.state_count(),
            transition_count: machine.transition_count(),
        })
    }

    /// Search for machines by name
    pub fn search_machines(query: &str) -> Vec<usize> {
        Self::ensure_loaded();

        let query = query.to_lowercase();
        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .enumerate()
                    .filter(|(_, machine)| machine.name().to_lowercase().contains(&query))
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the original description text of a machine by its index
    pub fn get_machine_text_by_index(index: usize) -> Result<&'static str, NtmError> {
        MACHINE_TEXTS.get(index).copied().ok_or_else(|| {
            NtmError::ValidationError(format!("Machine text index {} out of range", index))
        })
    }
}

#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub accept_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{Outcome, Simulator};
    use crate::types::DEFAULT_MAX_DEPTH;

    #[test]
    fn test_machine_manager_initialization() {
        assert!(MachineManager::load().is_ok());
        assert_eq!(MachineManager::get_machine_count(), MACHINE_TEXTS.len());
    }

    #[test]
    fn test_ensure_loaded_populates_registry_once() {
        MachineManager::ensure_loaded();
        let first = MACHINES.read().unwrap().clone();
        MachineManager::ensure_loaded();
        let second = MACHINES.read().unwrap().clone();

        assert_eq!(first.len(), MACHINE_TEXTS.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_machine_names() {
        let names = MachineManager::list_machine_names();

        assert!(names.contains(&"a plus".to_string()));
        assert!(names.contains(&"contains aa".to_string()));
        assert!(names.contains(&"runaway".to_string()));
    }

    #[test]
    fn test_get_machine_by_index() {
        assert!(MachineManager::get_machine_by_index(0).is_ok());
        assert!(MachineManager::get_machine_by_index(999).is_err());
    }

    #[test]
    fn test_get_machine_by_name() {
        let machine = MachineManager::get_machine_by_name("a plus").unwrap();
        assert_eq!(machine.start_state(), "q1");

        assert!(MachineManager::get_machine_by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_get_machine_info() {
        let info = MachineManager::get_machine_info(0).unwrap();

        assert_eq!(info.index, 0);
        assert_eq!(info.name, "a plus");
        assert_eq!(info.accept_state, "qacc");
        assert_eq!(info.state_count, 4);
        assert_eq!(info.transition_count, 3);

        assert!(MachineManager::get_machine_info(999).is_err());
    }

    #[test]
    fn test_search_machines() {
        assert_eq!(MachineManager::search_machines("AA"), vec![1]);
        assert_eq!(MachineManager::search_machines("a"), vec![0, 1, 2]);
        assert!(MachineManager::search_machines("nonexistent").is_empty());
    }

    #[test]
    fn test_machine_texts() {
        assert!(MachineManager::get_machine_text_by_index(0)
            .unwrap()
            .starts_with("a plus"));
        assert!(MachineManager::get_machine_text_by_index(3).is_err());
    }

    #[test]
    fn test_a_plus_runs() {
        let machine = MachineManager::get_machine_by_name("a plus").unwrap();
        let simulator = Simulator::new(&machine);

        let results: Vec<_> = ["", "a", "aaa"]
            .iter()
            .map(|input| simulator.run(input, DEFAULT_MAX_DEPTH))
            .collect();

        assert_eq!(results[0].outcome, Outcome::Rejected);
        assert_eq!(results[0].depth, 1);
        assert_eq!(results[1].outcome, Outcome::Accepted);
        assert_eq!(results[1].depth, 2);
        assert_eq!(results[2].outcome, Outcome::Accepted);
        assert_eq!(results[2].depth, 4);
    }

    #[test]
    fn test_runaway_never_decides() {
        let machine = MachineManager::get_machine_by_name("runaway").unwrap();
        let result = Simulator::new(&machine).run("a", 6);

        assert_eq!(result.outcome, Outcome::DepthExhausted);
        assert!(result.nondeterminism > 1.0);
    }
}
