//! Bottom-up inference: JSON values annotated with their inferred variant.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use super::{EntityKind, SchemaTable};
use crate::errors::DecodeError;
use crate::timestamp;

/// Key of the singleton timestamp object special case.
const CREATION_DATE: &str = "creationDate";

/// A JSON value after bottom-up inference.
///
/// Objects carry the variant the schema table inferred from their key set
/// alone; `None` marks an untyped map. Inference is generic and may be
/// overridden by rectification.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Value),
    Array(Vec<Node>),
    Object {
        kind: Option<EntityKind>,
        members: Vec<(String, Node)>,
    },
    /// A `{"creationDate": "…"}` singleton, parsed in place.
    Timestamp { raw: String, at: NaiveDateTime },
}

impl Node {
    /// Annotate `value` innermost-first.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Timestamp`] for a singleton timestamp object
    /// whose string is malformed.
    pub fn infer(value: Value, table: &SchemaTable) -> Result<Self, DecodeError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| Self::infer(item, table))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Array),
            Value::Object(map) => Self::infer_object(map, table),
            scalar => Ok(Self::Scalar(scalar)),
        }
    }

    fn infer_object(map: Map<String, Value>, table: &SchemaTable) -> Result<Self, DecodeError> {
        if map.len() == 1 {
            if let Some(Value::String(raw)) = map.get(CREATION_DATE) {
                let at = timestamp::parse(CREATION_DATE, raw)?;
                return Ok(Self::Timestamp {
                    raw: raw.clone(),
                    at,
                });
            }
        }

        let members = map
            .into_iter()
            .map(|(key, child)| Self::infer(child, table).map(|node| (key, node)))
            .collect::<Result<Vec<_>, _>>()?;
        let kind = table.infer(members.iter().map(|(key, _)| key.as_str()));
        Ok(Self::Object { kind, members })
    }

    /// The inferred variant, if this is a typed object.
    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Object { kind, .. } => *kind,
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Value::Null))
    }

    /// Reconstruct the JSON this node was inferred from.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Object { members, .. } => Value::Object(
                members
                    .iter()
                    .map(|(key, node)| (key.clone(), node.to_value()))
                    .collect(),
            ),
            Self::Timestamp { raw, .. } => {
                let mut map = Map::new();
                map.insert(CREATION_DATE.to_string(), Value::String(raw.clone()));
                Value::Object(map)
            }
        }
    }
}
