/*!
# Shared Types

This module contains shared types used by the search engine: the segments of
a concrete document path and the match record yielded for every hit.
*/
use serde_json::Value;
use std::fmt;

/// One step of a concrete path into a JSON document.
///
/// Keys borrow from the document being searched, so building a path never
/// copies field names.
#[derive(Hash, PartialEq, Eq, Debug, Clone, Copy)]
pub enum PathSegment<'a> {
    /// An object field, e.g., "foo" in "foo.bar"
    Key(&'a str),
    /// An array position, e.g., "3" in "foo.3"
    Index(usize),
}

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// A single hit: where it is, what it is, and which input it came from.
#[derive(PartialEq, Debug, Clone)]
pub struct Match<'a> {
    /// The path to the value from the document root, e.g., \["a", 1, "b"\]
    pub path: Vec<PathSegment<'a>>,
    /// A reference to the matched value in the JSON document
    pub value: &'a Value,
    /// The file the document was read from, if any
    pub source: Option<&'a str>,
}

impl Match<'_> {
    /// Join the path segments with `separator`, e.g., "someList.1.isPresent".
    #[must_use]
    pub fn path_string(&self, separator: &str) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
