//! The exploration tree: one arena per level, each node pointing back at the node in the
//! previous level that produced it.

use crate::configuration::Configuration;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub configuration: Configuration,
    /// Index of the parent in the previous level; `None` only for the root.
    pub parent: Option<usize>,
}

/// Levels of configurations in generation order. Level `i` holds every configuration
/// reachable in exactly `i` transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationTree {
    levels: Vec<Vec<Node>>,
}

impl ExplorationTree {
    /// Creates a tree holding only the initial configuration.
    pub fn new(root: Configuration) -> Self {
        Self {
            levels: vec![vec![Node {
                configuration: root,
                parent: None,
            }]],
        }
    }

    pub fn levels(&self) -> &[Vec<Node>] {
        &self.levels
    }

    pub fn level(&self, depth: usize) -> Option<&[Node]> {
        self.levels.get(depth).map(Vec::as_slice)
    }

    /// Returns the number of levels, including a trailing empty or unvisited one.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn node(&self, depth: usize, index: usize) -> Option<&Node> {
        self.levels.get(depth).and_then(|level| level.get(index))
    }

    pub(crate) fn push_level(&mut self, level: Vec<Node>) {
        self.levels.push(level);
    }

    /// Follows the stored parent links from `(depth, index)` back to the root and
    /// returns the configurations root first.
    pub fn lineage(&self, depth: usize, index: usize) -> Vec<&Configuration> {
        let mut path = Vec::with_capacity(depth + 1);
        let mut current = self.node(depth, index).map(|node| (depth, node));

        while let Some((level, node)) = current {
            path.push(&node.configuration);
            current = match (level.checked_sub(1), node.parent) {
                (Some(up), Some(parent)) => self.node(up, parent).map(|node| (up, node)),
                _ => None,
            };
        }

        path.reverse();
        path
    }
}
