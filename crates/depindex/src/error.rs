//! Error types for depindex operations.

use crate::domain::PackageName;
use std::io;
use thiserror::Error;

/// The error type for depindex operations.
///
/// The index itself only ever produces the rejection variants
/// ([`MissingDependency`](Error::MissingDependency),
/// [`HasDependents`](Error::HasDependents) and
/// [`CircularDependency`](Error::CircularDependency)); see [`Error::is_rejection`].
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A listed dependency is not indexed.
    #[error("Cannot index {package}: dependency {dependency} is not indexed")]
    MissingDependency {
        /// The package being indexed.
        package: PackageName,
        /// The first dependency found missing.
        dependency: PackageName,
    },

    /// Other packages still depend on the package being removed.
    #[error("Cannot remove {package}: {dependent_count} package(s) depend on it")]
    HasDependents {
        /// The package being removed.
        package: PackageName,
        /// Number of dependents.
        dependent_count: usize,
        /// The dependents, sorted by name.
        dependents: Vec<PackageName>,
    },

    /// Indexing would close a dependency cycle.
    #[error("Cannot index {package}: depending on {dependency} would create a cycle")]
    CircularDependency {
        /// The package being indexed.
        package: PackageName,
        /// The dependency through which the cycle closes.
        dependency: PackageName,
    },
}

impl Error {
    /// Whether this error is an expected precondition failure of the index
    /// contract rather than a fault.
    ///
    /// Rejections are answered with `FAIL` and are not logged as errors.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::MissingDependency { .. }
                | Error::HasDependents { .. }
                | Error::CircularDependency { .. }
        )
    }
}

/// A specialized Result type for depindex operations.
pub type Result<T> = std::result::Result<T, Error>;
