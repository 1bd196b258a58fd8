use serde_json::{Map, Value};

/// Marker recognized as the follow flag in three-element projection pairs.
///
/// A pair like `["'name'", "author", FOLLOW]` renders with the `->`
/// reference-traversal joiner instead of the `:` alias joiner.
pub const FOLLOW: &str = "->";

/// Value side of a projection pair
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionValue {
    /// Single source field
    Field(String),
    /// Nested projection list
    List(Vec<Projection>),
}

/// Projection entry that can be nested
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Bare field name
    Field(String),
    /// Two-element `[key, value]` alias pair
    Pair { key: String, value: ProjectionValue },
    /// Three-element `[key, value, marker]` pair; follows the reference
    /// when the marker equals [`FOLLOW`]
    FollowPair {
        key: String,
        value: ProjectionValue,
        follow: bool,
    },
    /// Sub-object projection keyed by alias
    Nested {
        alias: String,
        joiner: String,
        children: Vec<Projection>,
    },
}

impl Projection {
    /// Bare field
    pub fn field(name: impl Into<String>) -> Self {
        Projection::Field(name.into())
    }

    /// Alias `value` under display name `key`
    pub fn alias(key: &str, value: &str) -> Self {
        Projection::Pair {
            key: key.to_string(),
            value: ProjectionValue::Field(value.to_string()),
        }
    }

    /// Follow a reference field, pulling `value` from the referenced document
    pub fn follow(key: &str, value: &str) -> Self {
        Projection::FollowPair {
            key: key.to_string(),
            value: ProjectionValue::Field(value.to_string()),
            follow: true,
        }
    }

    /// Sub-object projection with the default `:` joiner
    pub fn nested(alias: &str, children: Vec<Projection>) -> Self {
        Projection::Nested {
            alias: alias.to_string(),
            joiner: ":".to_string(),
            children,
        }
    }

    /// Parse dynamic projection input into projection nodes.
    ///
    /// Accepts a string, a list (appended element-wise), or a map of alias
    /// entries. Returns `None` when the shape is invalid.
    pub(crate) fn parse(input: &Value) -> Option<Vec<Projection>> {
        match input {
            Value::String(name) => Some(vec![Projection::Field(name.clone())]),
            Value::Array(items) => {
                let mut projections = Vec::new();
                for item in items {
                    projections.extend(Self::parse_item(item)?);
                }
                Some(projections)
            }
            Value::Object(map) => Self::parse_map(map),
            _ => None,
        }
    }

    fn parse_item(item: &Value) -> Option<Vec<Projection>> {
        match item {
            Value::String(name) => Some(vec![Projection::Field(name.clone())]),
            Value::Array(_) => Some(vec![Self::parse_pair(item)?]),
            Value::Object(map) => Self::parse_map(map),
            _ => None,
        }
    }

    fn parse_pair(item: &Value) -> Option<Projection> {
        match item.as_array()?.as_slice() {
            [Value::String(key), value] => Some(Projection::Pair {
                key: key.clone(),
                value: Self::parse_value(value)?,
            }),
            [Value::String(key), value, marker] => Some(Projection::FollowPair {
                key: key.clone(),
                value: Self::parse_value(value)?,
                follow: marker.as_str() == Some(FOLLOW),
            }),
            _ => None,
        }
    }

    fn parse_value(value: &Value) -> Option<ProjectionValue> {
        match value {
            Value::String(name) => Some(ProjectionValue::Field(name.clone())),
            Value::Array(items) => {
                // a pair-shaped list is a single nested pair, not a field list
                if looks_like_pair(items) {
                    return Some(ProjectionValue::List(vec![Self::parse_pair(value)?]));
                }

                let mut children = Vec::new();
                for item in items {
                    children.extend(Self::parse_item(item)?);
                }
                Some(ProjectionValue::List(children))
            }
            _ => None,
        }
    }

    /// Parse a map of alias entries. The map's own `join` entry, when
    /// present, sets the joiner for every alias it holds.
    fn parse_map(map: &Map<String, Value>) -> Option<Vec<Projection>> {
        let joiner = match map.get("join") {
            Some(Value::String(join)) => join.clone(),
            None => ":".to_string(),
            Some(_) => return None,
        };

        let mut projections = Vec::new();
        for (alias, value) in map {
            if alias == "join" {
                continue;
            }

            let children = match value {
                Value::String(name) => vec![Projection::Field(name.clone())],
                Value::Array(items) => {
                    let mut children = Vec::new();
                    for item in items {
                        children.extend(Self::parse_item(item)?);
                    }
                    children
                }
                _ => return None,
            };

            projections.push(Projection::Nested {
                alias: alias.clone(),
                joiner: joiner.clone(),
                children,
            });
        }
        Some(projections)
    }
}

fn looks_like_pair(items: &[Value]) -> bool {
    matches!(items.len(), 2 | 3) && matches!(items.first(), Some(Value::String(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_string_and_list() {
        assert_eq!(
            Projection::parse(&json!("title")).unwrap(),
            vec![Projection::Field("title".to_string())]
        );

        let parsed = Projection::parse(&json!(["title", "body"])).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_two_element_pair() {
        let parsed = Projection::parse(&json!([["'headline'", "title"]])).unwrap();
        assert_eq!(
            parsed,
            vec![Projection::Pair {
                key: "'headline'".to_string(),
                value: ProjectionValue::Field("title".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_three_element_pair_marker() {
        let followed = Projection::parse(&json!([["'author'", "author", "->"]])).unwrap();
        assert_eq!(
            followed,
            vec![Projection::FollowPair {
                key: "'author'".to_string(),
                value: ProjectionValue::Field("author".to_string()),
                follow: true,
            }]
        );

        // any other marker falls back to the alias joiner
        let aliased = Projection::parse(&json!([["'author'", "author", "x"]])).unwrap();
        assert!(matches!(
            aliased[0],
            Projection::FollowPair { follow: false, .. }
        ));
    }

    #[test]
    fn test_parse_pair_value_detects_nested_pair() {
        let parsed =
            Projection::parse(&json!([["'name'", ["author", "name", "->"], "->"]])).unwrap();
        assert_eq!(
            parsed,
            vec![Projection::FollowPair {
                key: "'name'".to_string(),
                value: ProjectionValue::List(vec![Projection::FollowPair {
                    key: "author".to_string(),
                    value: ProjectionValue::Field("name".to_string()),
                    follow: true,
                }]),
                follow: true,
            }]
        );
    }

    #[test]
    fn test_parse_map_with_joiner() {
        let parsed =
            Projection::parse(&json!({"join": "->", "'author'": ["name", "bio"]})).unwrap();
        assert_eq!(
            parsed,
            vec![Projection::Nested {
                alias: "'author'".to_string(),
                joiner: "->".to_string(),
                children: vec![
                    Projection::Field("name".to_string()),
                    Projection::Field("bio".to_string()),
                ],
            }]
        );
    }

    #[test]
    fn test_parse_map_string_value_wraps_single_field() {
        let parsed = Projection::parse(&json!({"'meta'": "title"})).unwrap();
        assert_eq!(
            parsed,
            vec![Projection::Nested {
                alias: "'meta'".to_string(),
                joiner: ":".to_string(),
                children: vec![Projection::Field("title".to_string())],
            }]
        );
    }

    #[test]
    fn test_parse_rejects_invalid_shapes() {
        assert!(Projection::parse(&json!(42)).is_none());
        assert!(Projection::parse(&json!(null)).is_none());
        assert!(Projection::parse(&json!([42])).is_none());
        assert!(Projection::parse(&json!([[42, "x"]])).is_none());
        assert!(Projection::parse(&json!({"'meta'": 42})).is_none());
    }
}
