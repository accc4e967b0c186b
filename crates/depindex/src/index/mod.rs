//! The dependency index.
//!
//! This module owns the authoritative record of which packages are indexed
//! and what they depend on, and enforces its integrity rules:
//!
//! - A package can only be indexed once every dependency it lists is indexed.
//! - A package cannot be removed while another indexed package depends on it.
//! - With cycle detection enabled, no indexing may close a dependency cycle.
//!
//! # Architecture
//!
//! The implementation uses:
//! - `HashMap<PackageName, NodeIndex>` as the indexed set
//! - `petgraph::StableDiGraph` holding both edge directions
//!
//! ## Edge Direction Convention
//!
//! Edges point from **dependent -> dependency**. For a package `p`:
//!
//! - outgoing neighbours of `p` are its forward dependencies
//! - incoming neighbours of `p` are its reverse dependencies (its dependents)
//!
//! Because both views are read off the same edge set, a forward edge
//! `p -> d` exists exactly when `p` is among the dependents of `d`. Every
//! node in the graph is an indexed package, so no edge can dangle.
//!
//! # Thread Safety
//!
//! The whole state sits behind one `tokio::sync::RwLock`. Mutations take the
//! write lock, reads the read lock, and no operation awaits anything while
//! holding the guard. The lock is fair, so operations are serialized in the
//! order they queued for it.
//!
//! # Performance Characteristics
//!
//! - Query / Count: O(1)
//! - Remove: O(in-degree + out-degree)
//! - Index: O(d) without cycle detection, O(V + E) with it

mod graph;
mod inner;
mod trait_impl;

use crate::domain::PackageName;
use crate::error::Result;
use async_trait::async_trait;
use inner::IndexInner;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Core trait for the package dependency index.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// client connection.
///
/// # Error Handling
///
/// Mutations report precondition failures as typed errors:
/// - `MissingDependency`: a listed dependency is not indexed
/// - `CircularDependency`: indexing would close a cycle
/// - `HasDependents`: the package is still depended upon
///
/// A failed mutation leaves the index unchanged.
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Index `package` with exactly the given dependency set.
    ///
    /// Re-indexing an already indexed package replaces its dependency set.
    /// Duplicate dependencies are collapsed.
    ///
    /// # Errors
    ///
    /// - `Error::MissingDependency` if any dependency is not indexed
    /// - `Error::CircularDependency` if cycle detection is enabled and the
    ///   new edges would close a cycle
    async fn index(&self, package: &PackageName, dependencies: &[PackageName]) -> Result<()>;

    /// Remove `package`.
    ///
    /// Removing a package that is not indexed succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// - `Error::HasDependents` if another indexed package depends on it
    async fn remove(&self, package: &PackageName) -> Result<()>;

    /// Whether `package` is currently indexed.
    async fn query(&self, package: &PackageName) -> bool;

    /// Number of indexed packages.
    async fn count(&self) -> usize;

    /// The dependency set `package` was last indexed with.
    ///
    /// Returns `None` if the package is not indexed.
    async fn dependencies(&self, package: &PackageName) -> Option<BTreeSet<PackageName>>;

    /// The indexed packages that depend on `package`.
    async fn dependents(&self, package: &PackageName) -> BTreeSet<PackageName>;

    /// Enable or disable cycle detection for future `index` calls.
    ///
    /// Already indexed packages are not re-validated.
    async fn set_cycle_detection(&self, enabled: bool);

    /// Whether cycle detection is currently enabled.
    async fn cycle_detection(&self) -> bool;
}

/// Thread-safe in-memory index.
///
/// Implements [`PackageIndex`] via the trait implementation in
/// `trait_impl.rs`.
pub(crate) type InMemoryIndex = RwLock<IndexInner>;

/// Create a new, empty in-memory index.
///
/// # Example
///
/// ```
/// use depindex::domain::PackageName;
/// use depindex::index::new_in_memory_index;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let index = new_in_memory_index(true);
///     let gmp = PackageName::from("gmp");
///
///     index.index(&gmp, &[]).await.unwrap();
///     assert!(index.query(&gmp).await);
///     assert_eq!(index.count().await, 1);
/// }
/// ```
pub fn new_in_memory_index(cycle_detection: bool) -> Arc<dyn PackageIndex> {
    Arc::new(InMemoryIndex::new(IndexInner::new(cycle_detection)))
}
