/*!
# Query Paths

A [`QueryPath`] is the field path half of a query: an ordered list of literal
key and index patterns that has to line up with the *tail* of a concrete
document path.

```
use srch::query::{PathSegment, QueryPath};

let query = QueryPath::parse("fieldOne.isPresent", ".").expect("valid path");
let path = [
    PathSegment::Key("someList"),
    PathSegment::Index(1),
    PathSegment::Key("fieldOne"),
    PathSegment::Key("isPresent"),
];
assert!(query.matches(&path));
assert!(!query.matches(&path[..3]));
```

Segments made only of ASCII digits are array indices, so "0.name" can never
address an object key spelled "0".
*/
use std::fmt;

use super::{PathSegment, QueryError};

/// A literal pattern for one path segment.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum SegmentPattern {
    /// Matches an object key with exactly this name
    Key(String),
    /// Matches an array position with exactly this index
    Index(usize),
}

impl SegmentPattern {
    /// Resolve a raw path piece into a key or an index pattern.
    fn from_piece(piece: &str) -> Result<Self, QueryError> {
        if piece.bytes().all(|b| b.is_ascii_digit()) {
            // "01" would otherwise quietly address index 1
            if piece.len() > 1 && piece.starts_with('0') {
                return Err(QueryError::InvalidIndex(piece.to_string()));
            }
            piece
                .parse()
                .map(Self::Index)
                .map_err(|_| QueryError::InvalidIndex(piece.to_string()))
        } else {
            Ok(Self::Key(piece.to_string()))
        }
    }

    /// Kind-aware comparison against a concrete segment.
    #[must_use]
    pub fn matches(&self, segment: &PathSegment<'_>) -> bool {
        match (self, segment) {
            (Self::Key(pattern), PathSegment::Key(key)) => pattern == key,
            (Self::Index(pattern), PathSegment::Index(idx)) => pattern == idx,
            (Self::Key(_), PathSegment::Index(_))
            | (Self::Index(_), PathSegment::Key(_)) => false,
        }
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// The field path half of a query, matched against path tails.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct QueryPath {
    segments: Vec<SegmentPattern>,
}

impl QueryPath {
    /// Split `input` on `separator` into key and index patterns.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the path or separator is empty, if any
    /// segment is empty, or if an index literal overflows `usize`.
    pub fn parse(input: &str, separator: &str) -> Result<Self, QueryError> {
        if separator.is_empty() {
            return Err(QueryError::EmptySeparator);
        }
        if input.is_empty() {
            return Err(QueryError::EmptyPath);
        }

        let segments = input
            .split(separator)
            .map(|piece| {
                if piece.is_empty() {
                    Err(QueryError::EmptySegment(input.to_string()))
                } else {
                    SegmentPattern::from_piece(piece)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Start building a path with the fluent [`QueryPathBuilder`] API.
    #[must_use]
    pub const fn builder() -> QueryPathBuilder {
        QueryPathBuilder::new()
    }

    /// The patterns making up this path, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[SegmentPattern] {
        &self.segments
    }

    /// Returns `true` if the last `self.segments().len()` segments of `path`
    /// equal this query, segment by segment.
    ///
    /// A path shorter than the query never matches. An empty query matches
    /// every path, although [`QueryPath::parse`] never produces one.
    #[must_use]
    pub fn matches(&self, path: &[PathSegment<'_>]) -> bool {
        let Some(offset) = path.len().checked_sub(self.segments.len()) else {
            return false;
        };
        self.segments
            .iter()
            .zip(&path[offset..])
            .all(|(pattern, segment)| pattern.matches(segment))
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Builder for constructing query paths without going through a string.
///
/// # Examples
///
/// ```
/// use srch::query::QueryPath;
/// let path = QueryPath::builder().key("someList").index(1).build();
/// assert_eq!(path, QueryPath::parse("someList.1", ".").unwrap());
/// ```
#[derive(Debug, Default)]
pub struct QueryPathBuilder {
    segments: Vec<SegmentPattern>,
}

impl QueryPathBuilder {
    /// Creates a builder with no segments.
    #[must_use]
    pub const fn new() -> Self {
        Self { segments: Vec::new() }
    }

    /// Appends an object key pattern.
    #[must_use]
    pub fn key(mut self, name: &str) -> Self {
        self.segments.push(SegmentPattern::Key(name.to_string()));
        self
    }

    /// Appends an array index pattern.
    #[must_use]
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(SegmentPattern::Index(idx));
        self
    }

    /// Return the built path.
    #[must_use]
    pub fn build(self) -> QueryPath {
        QueryPath { segments: self.segments }
    }
}
