//! Core in-memory index data structures.
//!
//! This module contains the inner index state that is wrapped in a
//! `RwLock` for thread safety.

use crate::domain::PackageName;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap};

/// Inner index structure (not thread-safe).
///
/// See the module-level documentation of [`crate::index`] for the edge
/// direction convention.
pub(crate) struct IndexInner {
    /// Dependency graph.
    ///
    /// Nodes contain the package name. Edge direction: source (dependent) ->
    /// target (dependency). `StableDiGraph` keeps node indices valid across
    /// removals, which `node_map` relies on.
    pub(super) graph: StableDiGraph<PackageName, ()>,

    /// The indexed set, mapping each package to its graph node.
    ///
    /// Contains exactly the nodes of `graph`.
    pub(super) node_map: HashMap<PackageName, NodeIndex>,

    /// Whether `index` runs the cycle check.
    pub(super) cycle_detection: bool,
}

impl IndexInner {
    /// Create a new empty index
    pub(crate) fn new(cycle_detection: bool) -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_map: HashMap::new(),
            cycle_detection,
        }
    }

    /// Names at the far end of the edges of `node` in `direction`.
    pub(super) fn neighbors(&self, node: NodeIndex, direction: Direction) -> BTreeSet<PackageName> {
        self.graph
            .neighbors_directed(node, direction)
            .map(|neighbor| self.graph[neighbor].clone())
            .collect()
    }

    /// Drop every outgoing edge of `node`, which also removes `node` from the
    /// dependents of each of its old dependencies.
    pub(super) fn prune_dependencies(&mut self, node: NodeIndex) {
        let edges: Vec<_> = self.graph.edges(node).map(|edge| edge.id()).collect();
        for edge in edges {
            self.graph.remove_edge(edge);
        }
    }
}
