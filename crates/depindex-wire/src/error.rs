//! Error types for depindex-wire operations.

use std::io;
use thiserror::Error;

/// The error type for reading and writing protocol lines.
///
/// Only [`Error::InvalidUtf8`] leaves the stream usable; see
/// [`Error::is_recoverable`].
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A request line exceeded the configured length limit.
    #[error("Line {line_number} exceeds the {limit} byte limit")]
    LineTooLong {
        /// 1-based number of the offending line.
        line_number: usize,
        /// The limit that was exceeded, in bytes.
        limit: usize,
    },

    /// A request line was not valid UTF-8.
    #[error("Line {line_number} is not valid UTF-8")]
    InvalidUtf8 {
        /// 1-based number of the offending line.
        line_number: usize,
    },
}

impl Error {
    /// Whether reading can continue after this error.
    ///
    /// A non-UTF-8 line has been consumed in full, so the next read starts
    /// on the following line. The other variants leave the stream at an
    /// unknown position.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidUtf8 { .. })
    }
}

/// A malformed request line.
///
/// Parse errors are answered with `ERROR` and never end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line did not contain exactly three `|`-separated fields.
    #[error("Invalid message format: expected 3 fields, found {fields}")]
    InvalidFormat {
        /// Number of fields actually found.
        fields: usize,
    },

    /// The package field was empty.
    #[error("Invalid message format: package name is empty")]
    EmptyPackage,

    /// The command verb is not one of `INDEX`, `REMOVE` or `QUERY`.
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),
}

/// A specialized Result type for depindex-wire operations.
pub type Result<T> = std::result::Result<T, Error>;
