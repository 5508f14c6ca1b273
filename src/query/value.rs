/*!
# Value Patterns

The value half of a query. A [`ValuePattern`] is either a regular expression,
tested against the rendered text of a value, or a [`NumericRange`], tested
against numbers only.

## Examples

```rust
use serde_json::json;
use srch::query::ValuePattern;

let regex = ValuePattern::regex("[0-2]").expect("valid regex");
assert!(regex.matches(&json!(12)));
assert!(!regex.matches(&json!(34)));

let range = ValuePattern::numeric(">0<2").expect("valid range");
assert!(range.matches(&json!(1)));
assert!(!range.matches(&json!(2)));
assert!(!range.matches(&json!("1")));
```

Range expressions are parsed with a small pest grammar
(`query/grammar/range.pest`): one or two bounds, each an operator among `<`,
`<=`, `>`, `>=` followed by a number.
*/
use pest::Parser;
use pest_derive::Parser;
use regex::Regex;
use serde_json::Value;
use std::{borrow::Cow, fmt, str::FromStr};

use super::QueryError;

/// Parser for numeric range expressions.
#[derive(Parser)]
#[grammar = "query/grammar/range.pest"]
struct RangeParser;

/// Render a JSON value as the text that regular expressions are tested
/// against.
///
/// Strings are rendered without their surrounding quotes, scalars in their
/// usual JSON spelling and arrays/objects as compact JSON.
#[must_use]
pub fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// One side of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limit {
    /// The number being compared against
    pub value: f64,
    /// Whether the limit itself is part of the range
    pub inclusive: bool,
}

/// An interval of accepted numbers with an optional lower and upper limit.
///
/// At least one limit is always present when parsed from a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    /// Lower limit, from `>` or `>=`
    pub lower: Option<Limit>,
    /// Upper limit, from `<` or `<=`
    pub upper: Option<Limit>,
}

impl NumericRange {
    /// Returns `true` if `n` satisfies every limit of this range.
    #[must_use]
    pub fn contains(&self, n: f64) -> bool {
        let above = self.lower.is_none_or(|limit| {
            if limit.inclusive { n >= limit.value } else { n > limit.value }
        });
        let below = self.upper.is_none_or(|limit| {
            if limit.inclusive { n <= limit.value } else { n < limit.value }
        });
        above && below
    }

    /// Returns `true` if no number can satisfy both limits.
    fn is_unsatisfiable(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => {
                lower.value > upper.value
                    || (lower.value == upper.value
                        && !(lower.inclusive && upper.inclusive))
            }
            _ => false,
        }
    }
}

impl FromStr for NumericRange {
    type Err = QueryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let range = RangeParser::parse(Rule::range, input)
            .map_err(|e| QueryError::InvalidRange(e.to_string()))?
            .next()
            .ok_or_else(|| QueryError::InvalidRange(input.to_string()))?;

        let mut lower = None;
        let mut upper = None;

        for bound in range.into_inner().filter(|p| p.as_rule() == Rule::bound)
        {
            let mut inner = bound.into_inner();
            let (Some(operator), Some(number)) = (inner.next(), inner.next())
            else {
                return Err(QueryError::InvalidRange(input.to_string()));
            };

            let value: f64 = number.as_str().parse().map_err(|_| {
                QueryError::InvalidRange(format!(
                    "`{}` is not a number",
                    number.as_str()
                ))
            })?;

            let (slot, side, inclusive) = match operator.as_str() {
                ">" => (&mut lower, "lower", false),
                ">=" => (&mut lower, "lower", true),
                "<" => (&mut upper, "upper", false),
                "<=" => (&mut upper, "upper", true),
                other => {
                    return Err(QueryError::InvalidRange(format!(
                        "unknown operator `{other}`"
                    )));
                }
            };

            if slot.replace(Limit { value, inclusive }).is_some() {
                return Err(QueryError::InvalidRange(format!(
                    "`{input}` has more than one {side} bound"
                )));
            }
        }

        let range = Self { lower, upper };
        if range.is_unsatisfiable() {
            return Err(QueryError::EmptyRange(input.to_string()));
        }
        Ok(range)
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(limit) = self.lower {
            let op = if limit.inclusive { ">=" } else { ">" };
            write!(f, "{op}{}", limit.value)?;
        }
        if let Some(limit) = self.upper {
            let op = if limit.inclusive { "<=" } else { "<" };
            write!(f, "{op}{}", limit.value)?;
        }
        Ok(())
    }
}

/// Selects how the raw search term is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    /// The term is a regular expression
    #[default]
    Regex,
    /// The term is a numeric range such as ">0<2"
    Numeric,
}

/// A compiled value pattern. Built once and shared by every traversal.
#[derive(Debug, Clone)]
pub enum ValuePattern {
    /// Unanchored regular expression over the rendered value
    Regex(Regex),
    /// Interval over numeric values; non-numbers never match
    Range(NumericRange),
}

impl ValuePattern {
    /// Compile `term` according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if `term` is not valid for `mode`.
    pub fn new(term: &str, mode: ValueMode) -> Result<Self, QueryError> {
        match mode {
            ValueMode::Regex => Self::regex(term),
            ValueMode::Numeric => Self::numeric(term),
        }
    }

    /// Compile `pattern` as a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidRegex`] if `pattern` does not compile.
    pub fn regex(pattern: &str) -> Result<Self, QueryError> {
        Ok(Self::Regex(Regex::new(pattern)?))
    }

    /// Parse `range` as a numeric range expression, e.g. ">=1<=25".
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidRange`] or [`QueryError::EmptyRange`] if
    /// `range` is malformed or unsatisfiable.
    pub fn numeric(range: &str) -> Result<Self, QueryError> {
        range.parse().map(Self::Range)
    }

    /// Test a single value against this pattern.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Regex(re) => re.is_match(&render_value(value)),
            Self::Range(range) => match value {
                Value::Number(n) => {
                    n.as_f64().is_some_and(|n| range.contains(n))
                }
                Value::Null
                | Value::Bool(_)
                | Value::String(_)
                | Value::Array(_)
                | Value::Object(_) => false,
            },
        }
    }
}

impl fmt::Display for ValuePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex(re) => write!(f, "/{re}/"),
            Self::Range(range) => write!(f, "{range}"),
        }
    }
}
