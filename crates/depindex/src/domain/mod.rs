//! Domain types for the package index.

use std::fmt;

/// Identifier of a package.
///
/// Names are opaque, case-sensitive tokens compared by exact string equality.
/// No normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Create a new package name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the package name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(PackageName::from("Foo"), PackageName::from("foo"));
    }

    #[test]
    fn names_are_not_normalized() {
        assert_ne!(PackageName::from(" foo"), PackageName::from("foo"));
        assert_eq!(PackageName::new(" foo").as_str(), " foo");
    }

    #[test]
    fn display_is_the_raw_name() {
        assert_eq!(PackageName::from("libfoo-1.2").to_string(), "libfoo-1.2");
    }
}
