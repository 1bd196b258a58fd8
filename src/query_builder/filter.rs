//! Query builder utilities
//!
//! This module provides GROQ query construction utilities.

use serde_json::{Map, Value};

/// Default clause excluding documents under the reserved drafts path.
///
/// Seeded into every query by [`crate::query_builder::Query::new`] unless the
/// caller opts into drafts or supplies an empty base query.
pub const DRAFT_EXCLUSION: &str = "!(_id in path('drafts.**'))";

/// Logical operators for combining group members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Join {
    And,
    Or,
}

impl Join {
    pub fn to_groq(&self) -> &'static str {
        match self {
            Join::And => "&&",
            Join::Or => "||",
        }
    }
}

impl Default for Join {
    fn default() -> Self {
        Join::Or
    }
}

/// Filter condition that can be nested
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Verbatim GROQ expression
    Raw(String),
    /// Simple equality: `key == value`
    Pair { key: String, value: String },
    /// Comparison with an explicit operator, optionally negated
    Cmp {
        key: String,
        operator: String,
        value: String,
        negate: bool,
    },
    /// Nested scope rendered as `key(...)`. Narrow input shape kept for
    /// compatibility with older callers; not extended.
    Nest { key: String, children: Vec<Filter> },
    /// Parenthesized sub-expression
    Group {
        join: Join,
        negate: bool,
        children: Vec<Filter>,
    },
}

impl Filter {
    /// Verbatim expression
    pub fn raw(expression: impl Into<String>) -> Self {
        Filter::Raw(expression.into())
    }

    /// Comparison with an explicit operator
    pub fn cmp(key: &str, operator: &str, value: Value) -> Self {
        Filter::Cmp {
            key: key.to_string(),
            operator: operator.to_string(),
            value: groq_value(&value),
            negate: false,
        }
    }

    /// Equality condition
    pub fn eq(key: &str, value: Value) -> Self {
        Filter::Pair {
            key: key.to_string(),
            value: groq_value(&value),
        }
    }

    /// Not equal condition
    pub fn ne(key: &str, value: Value) -> Self {
        Self::cmp(key, "!=", value)
    }

    /// Greater than condition
    pub fn gt(key: &str, value: Value) -> Self {
        Self::cmp(key, ">", value)
    }

    /// Greater than or equal condition
    pub fn gte(key: &str, value: Value) -> Self {
        Self::cmp(key, ">=", value)
    }

    /// Less than condition
    pub fn lt(key: &str, value: Value) -> Self {
        Self::cmp(key, "<", value)
    }

    /// Less than or equal condition
    pub fn lte(key: &str, value: Value) -> Self {
        Self::cmp(key, "<=", value)
    }

    /// Membership condition rendered with the GROQ `in` operator
    pub fn in_values(key: &str, values: Vec<Value>) -> Self {
        Self::cmp(key, "in", Value::Array(values))
    }

    /// Create an AND group
    pub fn and(children: Vec<Filter>) -> Self {
        Filter::Group {
            join: Join::And,
            negate: false,
            children,
        }
    }

    /// Create an OR group
    pub fn or(children: Vec<Filter>) -> Self {
        Filter::Group {
            join: Join::Or,
            negate: false,
            children,
        }
    }

    /// Negate this filter. Comparisons and groups carry the negation
    /// directly; other shapes wrap in a negated single-member group.
    pub fn negated(self) -> Self {
        match self {
            Filter::Cmp {
                key,
                operator,
                value,
                ..
            } => Filter::Cmp {
                key,
                operator,
                value,
                negate: true,
            },
            Filter::Group { join, children, .. } => Filter::Group {
                join,
                negate: true,
                children,
            },
            other => Filter::Group {
                join: Join::And,
                negate: true,
                children: vec![other],
            },
        }
    }

    /// Parse dynamic filter input into filter nodes.
    ///
    /// Accepts a two-element `[key, value]` pair (wrapped into a single-entry
    /// map), a single map, or a list of maps and nested lists of maps.
    /// Returns `None` when the shape is invalid.
    pub(crate) fn parse(input: &Value) -> Option<Vec<Filter>> {
        match input {
            Value::Object(map) => Self::parse_map(map),
            Value::Array(items) => {
                if let [Value::String(key), value] = items.as_slice() {
                    let mut map = Map::new();
                    map.insert(key.clone(), value.clone());
                    return Self::parse_map(&map);
                }

                let mut filters = Vec::new();
                for item in items {
                    filters.extend(Self::parse_item(item)?);
                }
                Some(filters)
            }
            _ => None,
        }
    }

    fn parse_item(item: &Value) -> Option<Vec<Filter>> {
        match item {
            Value::Object(map) => Self::parse_map(map),
            Value::Array(items) => Some(vec![Self::parse_group(items)?]),
            _ => None,
        }
    }

    fn parse_map(map: &Map<String, Value>) -> Option<Vec<Filter>> {
        let mut filters = Vec::new();
        for (key, value) in map {
            filters.push(Self::parse_entry(key, value)?);
        }
        Some(filters)
    }

    fn parse_entry(key: &str, value: &Value) -> Option<Filter> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(Filter::Pair {
                key: key.to_string(),
                value: scalar_text(value)?,
            }),
            Value::Object(body) if body.get("nest") == Some(&Value::Bool(true)) => {
                let mut children = Vec::new();
                for (child_key, child_value) in body {
                    if child_key == "nest" {
                        continue;
                    }
                    children.push(Self::parse_entry(child_key, child_value)?);
                }
                Some(Filter::Nest {
                    key: key.to_string(),
                    children,
                })
            }
            Value::Object(body) => {
                let operator = body.get("operator")?.as_str()?;
                let value = scalar_text(body.get("value")?)?;
                let negate = match body.get("negate") {
                    Some(Value::Bool(negate)) => *negate,
                    None => false,
                    Some(_) => return None,
                };
                Some(Filter::Cmp {
                    key: key.to_string(),
                    operator: operator.to_string(),
                    value,
                    negate,
                })
            }
            _ => None,
        }
    }

    /// Parse a nested list into a group, extracting `join`/`negate` marker
    /// entries (first found wins) and stripping them from the children.
    fn parse_group(items: &[Value]) -> Option<Filter> {
        let mut join = Join::default();
        let mut join_seen = false;
        let mut negate = false;
        let mut negate_seen = false;
        let mut children = Vec::new();

        for item in items {
            match group_marker(item) {
                Some(Marker::Join(value)) => {
                    if !join_seen {
                        join = value;
                        join_seen = true;
                    }
                }
                Some(Marker::Negate(value)) => {
                    if !negate_seen {
                        negate = value;
                        negate_seen = true;
                    }
                }
                None => children.extend(Self::parse_item(item)?),
            }
        }

        Some(Filter::Group {
            join,
            negate,
            children,
        })
    }
}

enum Marker {
    Join(Join),
    Negate(bool),
}

fn group_marker(item: &Value) -> Option<Marker> {
    let map = item.as_object()?;
    if map.len() != 1 {
        return None;
    }

    let (key, value) = map.iter().next()?;
    match (key.as_str(), value) {
        ("join", Value::String(join)) => match join.as_str() {
            "&&" => Some(Marker::Join(Join::And)),
            "||" => Some(Marker::Join(Join::Or)),
            _ => None,
        },
        ("negate", Value::Bool(negate)) => Some(Marker::Negate(*negate)),
        _ => None,
    }
}

/// Textual form of a scalar filter value. Strings pass through verbatim so
/// callers control their own quoting.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Textual form for typed constructors: scalars render as [`scalar_text`],
/// anything else as compact JSON.
fn groq_value(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}
