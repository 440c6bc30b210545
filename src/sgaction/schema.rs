//! The parameter shape an action definition declares. This crate only carries schemas around
//! and checks tokens against them; games own what the slots mean.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    /// A reference to a state object of the given class, by object name.
    Object { class: String },
    /// An integer, inclusive bounds.
    Int { min: i64, max: i64 },
    Float,
    Bool,
    /// One of a fixed set of words, e.g. compass directions.
    Choice { options: Vec<String> },
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Object { class } => write!(f, "object of class {}", class),
            ParamKind::Int { min, max } => write!(f, "integer in {}..={}", min, max),
            ParamKind::Float => write!(f, "float"),
            ParamKind::Bool => write!(f, "bool"),
            ParamKind::Choice { options } => write!(f, "one of [{}]", options.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSlot {
    pub name: String,
    pub kind: ParamKind,
}

impl ParamSlot {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        ParamSlot {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered parameter slots. An empty schema means the action is unparameterized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSchema {
    slots: Vec<ParamSlot>,
}

impl ParameterSchema {
    pub fn new(slots: Vec<ParamSlot>) -> Self {
        ParameterSchema { slots }
    }

    pub fn empty() -> Self {
        ParameterSchema::default()
    }

    pub fn slots(&self) -> &[ParamSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_deserializes_from_settings_json() {
        let schema: ParameterSchema = serde_json::from_str(
            r#"[
                {"name": "dir", "kind": {"type": "choice", "options": ["north", "south"]}},
                {"name": "target", "kind": {"type": "object", "class": "block"}},
                {"name": "steps", "kind": {"type": "int", "min": 1, "max": 3}}
            ]"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.slots()[0].name, "dir");
        assert_eq!(
            schema.slots()[1].kind,
            ParamKind::Object {
                class: "block".to_string()
            }
        );
        assert_eq!(schema.slots()[2].kind, ParamKind::Int { min: 1, max: 3 });
    }

    #[test]
    fn test_empty_schema() {
        let schema: ParameterSchema = serde_json::from_str("[]").unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema, ParameterSchema::empty());
    }
}
