//! Reconstructs the accepting path from the exploration tree.
//!
//! Each step up the tree picks the first configuration of the previous level, in
//! generation order, that can produce the configuration already chosen below it. When
//! two parents produce identical children this may name a different, equally valid,
//! ancestor than the one the simulator expanded; `ExplorationTree::lineage` gives the
//! exact one.

use crate::configuration::Configuration;
use crate::machine::Machine;
use crate::tree::ExplorationTree;

/// Checks whether some transition of `parent` yields `child`'s state, written symbol and
/// head position.
pub fn is_parent(machine: &Machine, parent: &Configuration, child: &Configuration) -> bool {
    machine
        .transitions_for(parent.state(), parent.symbol())
        .iter()
        .any(|t| {
            t.next_state == child.state()
                && child.tape().get(parent.head()) == Some(&t.write)
                && child.head() == t.direction.apply(parent.head())
        })
}

/// Returns the configurations from the root down to the node at `(depth, index)`.
///
/// Returns an empty path if the node does not exist.
pub fn trace_path(
    machine: &Machine,
    tree: &ExplorationTree,
    depth: usize,
    index: usize,
) -> Vec<Configuration> {
    let Some(target) = tree.node(depth, index) else {
        return Vec::new();
    };

    let mut path = vec![target.configuration.clone()];
    let mut chosen = target;

    for level in (0..depth).rev() {
        let candidates = tree.level(level).unwrap_or(&[]);
        let parent = candidates
            .iter()
            .find(|candidate| is_parent(machine, &candidate.configuration, &chosen.configuration))
            .or_else(|| chosen.parent.and_then(|i| candidates.get(i)));

        match parent {
            Some(node) => {
                path.push(node.configuration.clone());
                chosen = node;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use crate::types::{Direction, Transition};

    fn create_machine() -> Machine {
        Machine::builder("Tracer")
            .start_state("q0")
            .accept_state("qa")
            .reject_state("qr")
            .transition("q0", 'a', "q1", 'b', Direction::Left)
            .transition("q1", 'b', "qa", 'b', Direction::Right)
            .build()
            .unwrap()
    }

    #[test]
    fn test_is_parent_uses_clamped_move() {
        let machine = create_machine();
        let parent = Configuration::initial("q0", "a");
        let child = parent.apply(&machine.transitions_for("q0", 'a')[0]);

        assert_eq!(child.head(), 0);
        assert!(is_parent(&machine, &parent, &child));
    }

    #[test]
    fn test_is_parent_rejects_wrong_state() {
        let machine = create_machine();
        let parent = Configuration::initial("q0", "a");
        let stranger = Configuration::new("q7", 0, vec!['b', '_']);

        assert!(!is_parent(&machine, &parent, &stranger));
    }

    #[test]
    fn test_trace_picks_first_matching_parent() {
        let machine = Machine::builder("Shared child")
            .start_state("q0")
            .accept_state("qa")
            .reject_state("qr")
            .transition("q0", 'a', "p", 'a', Direction::Right)
            .transition("q0", 'a', "p", 'a', Direction::Right)
            .transition("p", '_', "qa", '_', Direction::Right)
            .build()
            .unwrap();

        let root = Configuration::initial("q0", "a");
        let child = root.apply(&Transition::new("p", 'a', Direction::Right));
        let accept = child.apply(&Transition::new("qa", '_', Direction::Right));

        let mut tree = ExplorationTree::new(root.clone());
        tree.push_level(vec![
            Node {
                configuration: child.clone(),
                parent: Some(0),
            },
            Node {
                configuration: child.clone(),
                parent: Some(0),
            },
        ]);
        // Expanded from the second sibling, traced through the first.
        tree.push_level(vec![
            Node {
                configuration: accept.clone(),
                parent: Some(1),
            },
        ]);

        let path = trace_path(&machine, &tree, 2, 0);
        assert_eq!(path, vec![root, child, accept]);
    }

    #[test]
    fn test_trace_follows_stored_link_when_no_rule_matches() {
        let machine = create_machine();

        // None of these configurations can be produced by the machine's rules.
        let root = Configuration::initial("q0", "a");
        let decoy = Configuration::new("q6", 0, vec!['y']);
        let linked = Configuration::new("q5", 0, vec!['z']);
        let leaf = Configuration::new("q7", 1, vec!['z', '_']);

        let mut tree = ExplorationTree::new(root.clone());
        tree.push_level(vec![
            Node {
                configuration: decoy,
                parent: Some(0),
            },
            Node {
                configuration: linked.clone(),
                parent: Some(0),
            },
        ]);
        tree.push_level(vec![Node {
            configuration: leaf.clone(),
            parent: Some(1),
        }]);

        assert!(!is_parent(&machine, &root, &linked));
        assert_eq!(trace_path(&machine, &tree, 2, 0), vec![root, linked, leaf]);
    }

    #[test]
    fn test_trace_of_missing_node() {
        let machine = create_machine();
        let tree = ExplorationTree::new(Configuration::initial("q0", "a"));

        assert!(trace_path(&machine, &tree, 3, 0).is_empty());
        assert_eq!(trace_path(&machine, &tree, 0, 0).len(), 1);
    }
}
