//! This module provides the `MachineLoader` struct, responsible for loading machine
//! descriptions from files, strings and directories.

use crate::analyzer::analyze;
use crate::machine::Machine;
use crate::parser::parse;
use crate::types::{NtmError, MAX_DESCRIPTION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The file extension of machine descriptions.
pub const DESCRIPTION_EXTENSION: &str = "csv";

/// `MachineLoader` is a utility struct for loading machine descriptions.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the file is successfully read and parsed.
    /// * `Err(NtmError::FileError)` if the file cannot be read or is too large.
    /// * `Err(NtmError::ParseError)` if the content is not a valid description.
    pub fn load_machine(path: &Path) -> Result<Machine, NtmError> {
        let content = fs::read_to_string(path).map_err(|e| {
            NtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = content.len(), "loading machine");
        Self::load_machine_from_string(&content)
    }

    /// Loads a single machine from the provided description text.
    ///
    /// Analyzer warnings are logged but do not fail the load.
    pub fn load_machine_from_string(content: &str) -> Result<Machine, NtmError> {
        if content.len() > MAX_DESCRIPTION_SIZE {
            return Err(NtmError::FileError(format!(
                "Machine description is {} bytes, the limit is {}",
                content.len(),
                MAX_DESCRIPTION_SIZE
            )));
        }

        let machine = parse(content)?;
        for warning in analyze(&machine) {
            warn!(machine = machine.name(), "{}", warning);
        }

        Ok(machine)
    }

    /// Loads every `.csv` description in `directory`.
    ///
    /// Directories and other files are skipped. Each element of the result is either the
    /// path and machine that loaded, or the error for one entry.
    pub fn load_machines(directory: &Path) -> Vec<Result<(PathBuf, Machine), NtmError>> {
        if !directory.exists() {
            return vec![Err(NtmError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(NtmError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(NtmError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir()
                    || path
                        .extension()
                        .is_none_or(|ext| ext != DESCRIPTION_EXTENSION)
                {
                    return None;
                }

                match Self::load_machine(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(NtmError::FileError(format!(
                        "Failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect();

        // Directory order is platform dependent.
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });
        results
    }
}
