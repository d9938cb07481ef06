//! Dependency graph over operator call sites.
//!
//! Nodes are the tree [`Path`]s hosting operator calls; an edge records
//! that one call reads another's location and must wait for it. The graph
//! provides cycle detection (with the offending cycle reported
//! path-by-path) and a deterministic evaluation ordering: nodes are
//! inserted in document-discovery order, and the sort preserves that order
//! among unordered nodes.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::GraftError;
use crate::tree::path::Path;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed dependency graph keyed by tree path.
pub struct DependencyGraph {
    /// The underlying directed graph.
    graph: DiGraph<Path, ()>,
    /// Map from paths to their graph indices.
    node_map: HashMap<Path, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self { graph: DiGraph::new(), node_map: HashMap::new() }
    }

    /// Add a node for `path` if it doesn't already exist.
    ///
    /// Returns the node index in the graph. Insertion order is preserved
    /// and breaks topological ties, so callers add nodes in discovery
    /// order.
    pub fn ensure_node(&mut self, path: Path) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&path) {
            index
        } else {
            let index = self.graph.add_node(path.clone());
            self.node_map.insert(path, index);
            index
        }
    }

    /// Record that `dependent` reads `prerequisite`'s location, so
    /// `prerequisite` must be evaluated first.
    ///
    /// Duplicate edges are ignored. A self-edge is legal to add and is
    /// reported by [`detect_cycles`](Self::detect_cycles) as a cycle of
    /// one.
    pub fn add_dependency(&mut self, dependent: &Path, prerequisite: &Path) {
        let dependent_idx = self.ensure_node(dependent.clone());
        let prerequisite_idx = self.ensure_node(prerequisite.clone());

        if !self.graph.contains_edge(dependent_idx, prerequisite_idx) {
            self.graph.add_edge(dependent_idx, prerequisite_idx, ());
        }
    }

    /// Detect cycles using DFS with colors.
    ///
    /// Returns a [`GraftError::DependencyCycle`] naming the cycle's paths
    /// in reference order if one exists.
    pub fn detect_cycles(&self) -> Result<(), GraftError> {
        let mut colors: HashMap<NodeIndex, Color> = HashMap::new();
        let mut path: Vec<Path> = Vec::new();

        for node in self.graph.node_indices() {
            colors.insert(node, Color::White);
        }

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White)) {
                if let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path) {
                    return Err(GraftError::DependencyCycle { cycle });
                }
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is detected, `None` otherwise.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<Path>,
    ) -> Option<Vec<Path>> {
        colors.insert(node, Color::Gray);
        path.push(self.graph[node].clone());

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    // Found a cycle; trim the path to where it starts.
                    let cycle_start =
                        path.iter().position(|p| *p == self.graph[neighbor]).unwrap_or(0);
                    let mut cycle = path[cycle_start..].to_vec();
                    // Repeat the entry node to show the cycle closing.
                    cycle.push(self.graph[neighbor].clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// The evaluation order: every node after all of its prerequisites.
    ///
    /// Checks for cycles first so failures carry the cycle's paths rather
    /// than an opaque sort error.
    pub fn evaluation_order(&self) -> Result<Vec<Path>, GraftError> {
        self.detect_cycles()?;

        match toposort(&self.graph, None) {
            // Edges point dependent -> prerequisite; reversing the sort
            // puts prerequisites first. The reversal also restores
            // insertion order among unordered nodes.
            Ok(indices) => {
                Ok(indices.into_iter().rev().map(|idx| self.graph[idx].clone()).collect())
            }
            // Unreachable after the cycle check; report it as a cycle
            // without a named path rather than panic.
            Err(_) => Err(GraftError::DependencyCycle { cycle: Vec::new() }),
        }
    }

    /// Check if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Total number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of ordering edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
