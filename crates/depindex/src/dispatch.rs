//! Request dispatch.
//!
//! Glue between the line protocol and the index: each request becomes
//! exactly one index call, and its outcome exactly one response.

use crate::domain::PackageName;
use crate::error::Result;
use crate::index::PackageIndex;
use depindex_wire::{Command, Request, Response, parse_request};
use tracing::{debug, warn};

/// Decode `line` and run it against `index`.
///
/// A malformed line is answered with [`Response::Error`] and never reaches
/// the index.
pub async fn respond(index: &dyn PackageIndex, line: &str) -> Response {
    match parse_request(line) {
        Ok(request) => dispatch(index, request).await,
        Err(e) => {
            warn!(error = %e, "Failed to parse request");
            Response::Error
        }
    }
}

/// Run a decoded request against `index`.
pub async fn dispatch(index: &dyn PackageIndex, request: Request) -> Response {
    let Request {
        command,
        package,
        dependencies,
    } = request;
    let package = PackageName::from(package);

    debug!(%command, %package, ?dependencies, "Dispatching request");

    match command {
        Command::Index => {
            let dependencies: Vec<PackageName> =
                dependencies.into_iter().map(PackageName::from).collect();
            outcome(index.index(&package, &dependencies).await)
        }
        Command::Remove => outcome(index.remove(&package).await),
        Command::Query => Response::from(index.query(&package).await),
    }
}

fn outcome(result: Result<()>) -> Response {
    match result {
        Ok(()) => Response::Ok,
        Err(e) => {
            debug_assert!(e.is_rejection(), "index returned a fault: {e}");
            debug!(reason = %e, "Request rejected");
            Response::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::new_in_memory_index;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn protocol_round_trip() {
        let index = new_in_memory_index(false);
        let index = index.as_ref();

        assert_eq!(respond(index, "INDEX|X|").await, Response::Ok);
        assert_eq!(respond(index, "QUERY|X|").await, Response::Ok);
        assert_eq!(respond(index, "QUERY|Y|").await, Response::Fail);
        assert_eq!(respond(index, "BLAH|Z|").await, Response::Error);
        assert_eq!(respond(index, "QUERY|X|").await, Response::Ok);
    }

    #[tokio::test]
    async fn malformed_lines_do_not_touch_the_index() {
        let index = new_in_memory_index(false);

        assert_eq!(respond(index.as_ref(), "INDEX||").await, Response::Error);
        assert_eq!(respond(index.as_ref(), "INDEX|A|b|c").await, Response::Error);
        assert_eq!(index.count().await, 0);
    }

    #[tokio::test]
    async fn missing_dependency_fails() {
        let index = new_in_memory_index(false);

        assert_eq!(respond(index.as_ref(), "INDEX|foo|bar").await, Response::Fail);
        assert_eq!(respond(index.as_ref(), "QUERY|foo|").await, Response::Fail);
    }

    #[tokio::test]
    async fn blocked_remove_fails() {
        let index = new_in_memory_index(false);
        let index = index.as_ref();

        assert_eq!(respond(index, "INDEX|A|").await, Response::Ok);
        assert_eq!(respond(index, "INDEX|B|A").await, Response::Ok);
        assert_eq!(respond(index, "REMOVE|A|").await, Response::Fail);
        assert_eq!(respond(index, "REMOVE|B|").await, Response::Ok);
        assert_eq!(respond(index, "REMOVE|A|").await, Response::Ok);
    }

    #[tokio::test]
    async fn remove_of_unknown_package_succeeds() {
        let index = new_in_memory_index(false);
        assert_eq!(respond(index.as_ref(), "REMOVE|ghost|").await, Response::Ok);
    }

    #[tokio::test]
    async fn whitespace_in_dependency_list_is_ignored() {
        let index = new_in_memory_index(false);
        let index = index.as_ref();

        assert_eq!(respond(index, "INDEX|a|").await, Response::Ok);
        assert_eq!(respond(index, "INDEX|b|").await, Response::Ok);
        assert_eq!(respond(index, "INDEX|A|  a , b ,, ").await, Response::Ok);

        let expected: BTreeSet<PackageName> =
            ["a", "b"].into_iter().map(PackageName::from).collect();
        assert_eq!(index.dependencies(&"A".into()).await, Some(expected));
    }

    #[tokio::test]
    async fn cycle_is_rejected_when_enabled() {
        let index = new_in_memory_index(true);
        let index = index.as_ref();

        assert_eq!(respond(index, "INDEX|A|").await, Response::Ok);
        assert_eq!(respond(index, "INDEX|B|A").await, Response::Ok);
        assert_eq!(respond(index, "INDEX|A|B").await, Response::Fail);
    }
}
