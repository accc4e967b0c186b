//! Response encoding.

use std::fmt;

/// The outcome of a request, as sent back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Response {
    /// The operation succeeded, or the queried package is indexed.
    Ok,

    /// A precondition failed: missing dependency, blocked removal, or the
    /// queried package is not indexed.
    Fail,

    /// The request line was malformed and never reached the index.
    Error,
}

impl Response {
    /// The full response line, including its newline terminator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Response::Ok => "OK\n",
            Response::Fail => "FAIL\n",
            Response::Error => "ERROR\n",
        }
    }

    /// The response line as bytes.
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

impl From<bool> for Response {
    fn from(succeeded: bool) -> Self {
        if succeeded { Response::Ok } else { Response::Fail }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().trim_end())
    }
}
