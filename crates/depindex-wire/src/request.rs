//! Request decoding.
//!
//! A request line has the shape `<COMMAND>|<PACKAGE>|<DEPENDENCY-LIST>`.
//! The dependency list is comma separated; tokens are trimmed and blank
//! tokens dropped, so `",,"` means "no dependencies".

use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Field separator within a request line.
pub const FIELD_SEPARATOR: char = '|';

/// Separator between entries of the dependency list.
pub const DEPENDENCY_SEPARATOR: char = ',';

/// The verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Add or update a package together with its dependency set.
    Index,

    /// Remove a package.
    Remove,

    /// Ask whether a package is indexed.
    Query,
}

impl Command {
    /// The wire spelling of this command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Index => "INDEX",
            Command::Remove => "REMOVE",
            Command::Query => "QUERY",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDEX" => Ok(Command::Index),
            "REMOVE" => Ok(Command::Remove),
            "QUERY" => Ok(Command::Query),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// A decoded request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// What to do.
    pub command: Command,

    /// The package the command applies to. Never empty.
    pub package: String,

    /// Dependencies in the order they were listed. Empty if none.
    ///
    /// Duplicates are preserved; the index collapses them into a set.
    pub dependencies: Vec<String>,
}

impl Request {
    /// Create a request with no dependencies.
    pub fn new(command: Command, package: impl Into<String>) -> Self {
        Self {
            command,
            package: package.into(),
            dependencies: Vec::new(),
        }
    }

    /// Attach a dependency list.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Render this request as a protocol line, without the trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.command,
            self.package,
            self.dependencies.join(",")
        )
    }
}

impl FromStr for Request {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_request(s)
    }
}

/// Decode one request line (without its line terminator).
///
/// The command is validated before the package, so `"BLAH||"` reports
/// [`ParseError::UnknownCommand`] rather than [`ParseError::EmptyPackage`].
///
/// # Errors
///
/// - [`ParseError::InvalidFormat`] if the line does not have exactly three fields
/// - [`ParseError::UnknownCommand`] if the verb is not recognized
/// - [`ParseError::EmptyPackage`] if the package field is empty
pub fn parse_request(line: &str) -> Result<Request, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [command, package, dependencies] = fields.as_slice() else {
        return Err(ParseError::InvalidFormat {
            fields: fields.len(),
        });
    };

    let command = command.parse::<Command>()?;

    if package.is_empty() {
        return Err(ParseError::EmptyPackage);
    }

    Ok(Request {
        command,
        package: (*package).to_string(),
        dependencies: parse_dependency_list(dependencies),
    })
}

fn parse_dependency_list(field: &str) -> Vec<String> {
    field
        .split(DEPENDENCY_SEPARATOR)
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(str::to_string)
        .collect()
}
