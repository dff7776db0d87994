//! Version value type

use std::fmt;

/// A version as recorded in a `.SRCINFO` or published as a release tag.
///
/// Versions are compared by their normalized form (leading `v` removed).
/// Comparison is exact and case-sensitive; there is no semantic ordering.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    raw: String,
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The version exactly as it was read, e.g. `v0.8.2`
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The version without its `v` prefix, e.g. `0.8.2`
    pub fn normalized(&self) -> &str {
        normalize(&self.raw)
    }

    /// Returns true if both versions have the same normalized form
    pub fn matches(&self, other: &Version) -> bool {
        self.normalized() == other.normalized()
    }
}

/// Strip the `v` prefix from a version string
///
/// All leading `v` characters are removed so that normalizing twice is a no-op.
pub fn normalize(version: &str) -> &str {
    version.trim_start_matches('v')
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Version {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Version {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
