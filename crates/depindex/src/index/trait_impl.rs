//! PackageIndex trait implementation for the in-memory index.

use super::InMemoryIndex;
use super::graph::find_cycle;
use crate::domain::PackageName;
use crate::error::{Error, Result};
use crate::index::PackageIndex;
use async_trait::async_trait;
use petgraph::Direction;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

#[async_trait]
impl PackageIndex for InMemoryIndex {
    async fn index(&self, package: &PackageName, dependencies: &[PackageName]) -> Result<()> {
        let mut inner = self.write().await;

        // === Phase 1: All validations (no mutations) ===
        // Collapse duplicates, keeping first-seen order for error reporting
        let mut seen = HashSet::with_capacity(dependencies.len());
        let dependencies: Vec<PackageName> = dependencies
            .iter()
            .filter(|dep| seen.insert(*dep))
            .cloned()
            .collect();

        let mut targets = Vec::with_capacity(dependencies.len());
        for dependency in &dependencies {
            let Some(&target) = inner.node_map.get(dependency) else {
                debug!(%package, %dependency, "Rejected index: missing dependency");
                return Err(Error::MissingDependency {
                    package: package.clone(),
                    dependency: dependency.clone(),
                });
            };
            targets.push(target);
        }

        if inner.cycle_detection {
            if let Some(dependency) =
                find_cycle(&inner.graph, &inner.node_map, package, &dependencies)
            {
                debug!(%package, %dependency, "Rejected index: dependency cycle");
                return Err(Error::CircularDependency {
                    package: package.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        // === Phase 2: Install the new edge set (all validations passed) ===
        let node = if let Some(&node) = inner.node_map.get(package) {
            inner.prune_dependencies(node);
            node
        } else {
            let node = inner.graph.add_node(package.clone());
            inner.node_map.insert(package.clone(), node);
            node
        };

        for target in targets {
            inner.graph.add_edge(node, target, ());
        }

        debug!(%package, dependencies = dependencies.len(), "Indexed package");
        Ok(())
    }

    async fn remove(&self, package: &PackageName) -> Result<()> {
        let mut inner = self.write().await;

        let Some(&node) = inner.node_map.get(package) else {
            debug!(%package, "Remove of unindexed package is a no-op");
            return Ok(());
        };

        // Check for dependents
        let dependents = inner.neighbors(node, Direction::Incoming);
        if !dependents.is_empty() {
            debug!(%package, dependents = dependents.len(), "Rejected remove: has dependents");
            return Err(Error::HasDependents {
                package: package.clone(),
                dependent_count: dependents.len(),
                dependents: dependents.into_iter().collect(),
            });
        }

        // Removing the node drops its outgoing edges, and with them its entry
        // in every dependency's dependents
        inner.graph.remove_node(node);
        inner.node_map.remove(package);

        debug!(%package, "Removed package");
        Ok(())
    }

    async fn query(&self, package: &PackageName) -> bool {
        let inner = self.read().await;
        inner.node_map.contains_key(package)
    }

    async fn count(&self) -> usize {
        let inner = self.read().await;
        inner.node_map.len()
    }

    async fn dependencies(&self, package: &PackageName) -> Option<BTreeSet<PackageName>> {
        let inner = self.read().await;
        let node = *inner.node_map.get(package)?;
        Some(inner.neighbors(node, Direction::Outgoing))
    }

    async fn dependents(&self, package: &PackageName) -> BTreeSet<PackageName> {
        let inner = self.read().await;
        inner
            .node_map
            .get(package)
            .map(|&node| inner.neighbors(node, Direction::Incoming))
            .unwrap_or_default()
    }

    async fn set_cycle_detection(&self, enabled: bool) {
        let mut inner = self.write().await;
        inner.cycle_detection = enabled;
        debug!(enabled, "Cycle detection toggled");
    }

    async fn cycle_detection(&self) -> bool {
        self.read().await.cycle_detection
    }
}
