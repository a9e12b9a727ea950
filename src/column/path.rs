//! Hierarchical column addressing: an ordered sequence of names that
//! descends through nested group columns.

// dependencies
use std::fmt::{self, Display, Formatter};

/// A path identifying a column inside a possibly-nested frame.
///
/// Within one DataFrame no two resolvable paths are equal; duplicate
/// sibling names are rejected at frame construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColumnPath(Vec<String>);

impl ColumnPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A single-segment path for a top-level column.
    pub fn of(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final path segment, i.e. the column's own name.
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// The path of the enclosing group, or None for a top-level column.
    pub fn parent(&self) -> Option<ColumnPath> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// A new path with one more segment appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// A new path with the final segment replaced.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        segments.push(name.into());
        Self(segments)
    }

    /// Concatenation of two paths.
    pub fn join(&self, tail: &ColumnPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(tail.0.iter().cloned());
        Self(segments)
    }

    /// Whether `prefix` is a (non-strict) prefix of this path.
    pub fn starts_with(&self, prefix: &ColumnPath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for ColumnPath {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for ColumnPath {
    fn from(name: &str) -> Self {
        Self::of(name)
    }
}

impl From<String> for ColumnPath {
    fn from(name: String) -> Self {
        Self::of(name)
    }
}

impl From<Vec<String>> for ColumnPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for ColumnPath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl FromIterator<String> for ColumnPath {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
