//! Dependency graph operations using petgraph.
//!
//! This module provides the cycle check run before a dependency set is
//! accepted.

use crate::domain::PackageName;
use petgraph::algo::{self, DfsSpace};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

/// Check whether giving `package` the edges `package -> dependencies` would
/// close a cycle.
///
/// Returns the first dependency (in the given order) through which the
/// cycle closes, or `None` if the edge set is acyclic.
///
/// A package listing itself is a cycle without any traversal. Otherwise the
/// new edges all start at `package`, so a cycle exists exactly when
/// `package` is already reachable from one of its proposed dependencies.
/// That is a depth-first search per dependency over the existing forward
/// edges, with a visited set so an already cyclic graph cannot loop it. A
/// package that is not yet indexed has no node and cannot be reached.
pub(super) fn find_cycle<'a>(
    graph: &StableDiGraph<PackageName, ()>,
    node_map: &HashMap<PackageName, NodeIndex>,
    package: &PackageName,
    dependencies: &'a [PackageName],
) -> Option<&'a PackageName> {
    if let Some(dependency) = dependencies.iter().find(|dep| *dep == package) {
        return Some(dependency);
    }

    let target = *node_map.get(package)?;
    let mut space = DfsSpace::new(graph);

    dependencies.iter().find(|dependency| {
        node_map.get(*dependency).is_some_and(|&start| {
            algo::has_path_connecting(graph, start, target, Some(&mut space))
        })
    })
}
