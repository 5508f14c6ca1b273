/*!
# Tree Search

Depth-first search of a JSON document for every node whose path ends with a
[`QueryPath`] and whose value satisfies a [`ValuePattern`].

Matches are yielded lazily and in document pre-order: a node comes before its
children, array elements in index order and object fields in input order.
Stopping iteration early stops the traversal.

```
use serde_json::json;
use srch::query::{Query, ValueMode};

let doc = json!({"someList": [
    {"fieldOne": {"isPresent": false}},
    {"fieldOne": {"isPresent": true}},
]});
let query = Query::new("isPresent", ".", "true", ValueMode::Regex)
    .expect("valid query");

let paths: Vec<String> =
    query.search(&doc, None).map(|m| m.path_string(".")).collect();
assert_eq!(paths, ["someList.1.fieldOne.isPresent"]);
```
*/
use serde_json::Value;

use super::{Match, PathSegment, QueryError, QueryPath, ValueMode, ValuePattern};

/// A compiled query: a path tail and a value pattern.
#[derive(Debug, Clone)]
pub struct Query {
    /// The path tail every match must end with
    pub path: QueryPath,
    /// The pattern every matched value must satisfy
    pub value: ValuePattern,
}

impl Query {
    /// Build a query from its raw parts.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if either the path or the search term is
    /// invalid. Nothing is searched until the query is complete.
    pub fn new(
        path: &str,
        separator: &str,
        term: &str,
        mode: ValueMode,
    ) -> Result<Self, QueryError> {
        let path = QueryPath::parse(path, separator)?;
        let value = ValuePattern::new(term, mode)?;
        log::debug!("compiled query path `{path}` with value pattern {value}");
        Ok(Self { path, value })
    }

    /// Lazily search `root`, tagging every match with `source`.
    #[must_use]
    pub fn search<'a>(
        &self,
        root: &'a Value,
        source: Option<&'a str>,
    ) -> Matches<'_, 'a> {
        Matches::new(self, root, source)
    }

    /// Collect every match in `root`.
    #[must_use]
    pub fn find<'a>(
        &self,
        root: &'a Value,
        source: Option<&'a str>,
    ) -> Vec<Match<'a>> {
        self.search(root, source).collect()
    }
}

/// A node waiting to be visited: its depth, the segment leading to it from
/// its parent (none for the root) and the node itself.
type Pending<'a> = (usize, Option<PathSegment<'a>>, &'a Value);

/// Iterator over the matches of a [`Query`] in one document.
///
/// Uses an explicit stack instead of recursion so that it can suspend
/// between matches. The current path is owned by the iterator and truncated
/// back to the parent's depth before each sibling is entered. Matches borrow
/// only the document and the source, never the query.
pub struct Matches<'q, 'a> {
    query: &'q Query,
    source: Option<&'a str>,
    stack: Vec<Pending<'a>>,
    path: Vec<PathSegment<'a>>,
}

impl<'q, 'a> Matches<'q, 'a> {
    fn new(query: &'q Query, root: &'a Value, source: Option<&'a str>) -> Self {
        Self { query, source, stack: vec![(0, None, root)], path: Vec::new() }
    }

    /// Schedule the children of `value`, in reverse so they pop in order.
    fn push_children(&mut self, depth: usize, value: &'a Value) {
        match value {
            Value::Array(items) => {
                self.stack.extend(
                    items
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(idx, item)| {
                            (depth + 1, Some(PathSegment::Index(idx)), item)
                        }),
                );
            }
            Value::Object(map) => {
                self.stack.extend(map.iter().rev().map(|(key, item)| {
                    (depth + 1, Some(PathSegment::Key(key.as_str())), item)
                }));
            }
            // Leaf JSON nodes - nothing below them
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_) => {}
        }
    }
}

impl<'a> Iterator for Matches<'_, 'a> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, segment, value)) = self.stack.pop() {
            // Backtrack to the parent, then step into this node
            self.path.truncate(depth.saturating_sub(1));
            if let Some(segment) = segment {
                self.path.push(segment);
            }

            self.push_children(depth, value);

            if self.query.path.matches(&self.path)
                && self.query.value.matches(value)
            {
                log::trace!("match at depth {depth}: {value}");
                return Some(Match {
                    path: self.path.clone(),
                    value,
                    source: self.source,
                });
            }
        }
        None
    }
}
