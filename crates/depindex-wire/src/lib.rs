//! Line protocol codec for the depindex package dependency server.
//!
//! Clients talk to the server with one request per newline-terminated line:
//!
//! ```text
//! <COMMAND>|<PACKAGE>|<DEPENDENCY-LIST>
//! ```
//!
//! and receive exactly one of `OK`, `FAIL` or `ERROR` per request. This crate
//! knows nothing about packages or dependency graphs; it only turns bytes into
//! [`Request`] values and [`Response`] values back into bytes.
//!
//! # Example
//!
//! ```
//! use depindex_wire::{parse_request, Command};
//!
//! let request = parse_request("INDEX|cloog|gmp, isl ,,").unwrap();
//! assert_eq!(request.command, Command::Index);
//! assert_eq!(request.package, "cloog");
//! assert_eq!(request.dependencies, vec!["gmp", "isl"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;

pub use error::{Error, ParseError, Result};
pub use reader::{DEFAULT_MAX_LINE_LENGTH, LineReader};
pub use request::{Command, Request, parse_request};
pub use response::Response;
pub use writer::ResponseWriter;
