/*!
# Query Errors

Errors raised while building a [`Query`](crate::query::Query) from its raw
path and value strings. All of them are detected before any document is
searched; a query that builds successfully can never fail during traversal.
*/
use std::error::Error;
use std::fmt;

/// Represents the ways a raw search path or search term can be rejected.
#[derive(Debug, Clone)]
pub enum QueryError {
    /// The search path was empty.
    EmptyPath,
    /// The field path separator was empty.
    EmptySeparator,
    /// The search path contained an empty segment, e.g., "a..b" or "a.".
    EmptySegment(String),
    /// A digits-only segment has a leading zero or does not fit in an array
    /// index.
    InvalidIndex(String),
    /// The search term is not a valid regular expression.
    InvalidRegex(regex::Error),
    /// The search term is not a valid numeric range expression.
    InvalidRange(String),
    /// The numeric range can never be satisfied, e.g., ">5<2".
    EmptyRange(String),
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRegex(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "Search path is empty"),
            Self::EmptySeparator => {
                write!(f, "Field path separator must not be empty")
            }
            Self::EmptySegment(path) => {
                write!(f, "Search path `{path}` contains an empty segment")
            }
            Self::InvalidIndex(segment) => {
                write!(f, "Invalid array index `{segment}`")
            }
            Self::InvalidRegex(_) => write!(f, "Invalid regular expression"),
            Self::InvalidRange(reason) => {
                write!(f, "Invalid numeric range: {reason}")
            }
            Self::EmptyRange(range) => {
                write!(f, "Numeric range `{range}` cannot match any value")
            }
        }
    }
}

impl From<regex::Error> for QueryError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidRegex(err)
    }
}
