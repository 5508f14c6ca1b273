//! # JSON Search Engine
//!
//! Matches a field path tail and a value pattern against every node of a
//! JSON document:
//! - Literal key and index segments, matched against the end of each path
//! - Value matching by unanchored regex or by numeric range
//! - Lazy, pre-order results pointing back into the searched document

pub(crate) mod common;
pub mod error;
pub mod path;
pub mod search;
pub mod value;

// Re-exports
pub use common::{Match, PathSegment};
pub use error::QueryError;
pub use path::{QueryPath, QueryPathBuilder, SegmentPattern};
pub use search::{Matches, Query};
pub use value::{Limit, NumericRange, ValueMode, ValuePattern, render_value};
