//! Identifier normalization.
//!
//! The backend encodes references inconsistently: a bare id string, an object
//! with `_id`, an object with `id`, or a wrapper such as `{ "userId": { "_id": .. } }`.
//! Everything that compares entities goes through [`normalize_id`].

use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys probed on an object, in precedence order.
const ID_KEYS: [&str; 4] = ["_id", "id", "userId", "user"];

/// Keys naming the user behind a membership entry (a like, a save, a share).
const USER_KEYS: [&str; 2] = ["userId", "user"];

/// Canonical alphabet for locally generated identifiers (no ambiguous glyphs).
const TEMP_ID_ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
    'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];
const TEMP_ID_LENGTH: usize = 20;
const TEMP_ID_PREFIX: &str = "tmp_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("no identifier field present")]
    Missing,
    #[error("identifier is empty")]
    Empty,
    #[error("unsupported identifier shape: {0}")]
    Unsupported(&'static str),
}

/// Resolves any accepted reference shape to its canonical id string.
pub fn normalize_id(value: &Value) -> Result<String, IdError> {
    match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(IdError::Empty)
            } else {
                Ok(trimmed.to_string())
            }
        }
        Value::Object(map) => normalize_object_id(map),
        Value::Null => Err(IdError::Missing),
        Value::Bool(_) => Err(IdError::Unsupported("boolean")),
        Value::Number(_) => Err(IdError::Unsupported("number")),
        Value::Array(_) => Err(IdError::Unsupported("array")),
    }
}

/// Same as [`normalize_id`] for an already-destructured object.
pub fn normalize_object_id(map: &Map<String, Value>) -> Result<String, IdError> {
    for key in ID_KEYS {
        if let Some(inner) = map.get(key)
            && !inner.is_null()
        {
            return normalize_id(inner);
        }
    }
    Err(IdError::Missing)
}

/// True when both references resolve to the same id. Malformed references never match.
pub fn same_id(left: &Value, right: &Value) -> bool {
    match (normalize_id(left), normalize_id(right)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Generates a placeholder id for an entity that only exists locally until the server confirms it.
pub fn generate_temp_id() -> String {
    format!("{TEMP_ID_PREFIX}{}", nanoid!(TEMP_ID_LENGTH, TEMP_ID_ALPHABET))
}

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

/// The `_id` / `id` pair carried by every backend document.
///
/// Documents can carry either one or both, so they are kept as separate fields
/// and resolved on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityKey {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl EntityKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            mongo_id: Some(id.into()),
            id: None,
        }
    }

    pub fn resolve(&self) -> Result<String, IdError> {
        let raw = self.mongo_id.as_deref().or(self.id.as_deref()).ok_or(IdError::Missing)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(IdError::Empty)
        } else {
            Ok(trimmed.to_string())
        }
    }
}

/// A reference to another entity: either a bare id or a populated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Object(Map<String, Value>),
}

impl EntityRef {
    pub fn from_id(id: impl Into<String>) -> Self {
        EntityRef::Id(id.into())
    }

    pub fn id(&self) -> Result<String, IdError> {
        match self {
            EntityRef::Id(raw) => normalize_id(&Value::String(raw.clone())),
            EntityRef::Object(map) => normalize_object_id(map),
        }
    }

    /// True when this reference points at `id`.
    pub fn is(&self, id: &str) -> bool {
        self.id().is_ok_and(|own| own == id)
    }

    /// Id of the user this entry stands for.
    ///
    /// Populated membership entries carry their own `_id` next to the user,
    /// as in `{ "_id": "L9", "user": { "_id": "U1" } }`; the user wins.
    pub fn user_id(&self) -> Result<String, IdError> {
        let EntityRef::Object(map) = self else {
            return self.id();
        };
        match USER_KEYS.iter().find_map(|key| map.get(*key).filter(|inner| !inner.is_null())) {
            Some(user) => normalize_id(user),
            None => normalize_object_id(map),
        }
    }

    /// True when this entry belongs to `user_id`.
    pub fn is_user(&self, user_id: &str) -> bool {
        self.user_id().is_ok_and(|own| own == user_id)
    }

    /// Display name of a populated user reference.
    pub fn display_name(&self) -> Option<&str> {
        self.string_field(&["name", "username", "fullName"])
    }

    pub fn avatar(&self) -> Option<&str> {
        self.string_field(&["avatar", "profilePicture"])
    }

    fn string_field(&self, keys: &[&str]) -> Option<&str> {
        let EntityRef::Object(map) = self else {
            return None;
        };
        let target = match map.get("userId").or_else(|| map.get("user")) {
            Some(Value::Object(inner)) => inner,
            _ => map,
        };
        keys.iter().find_map(|key| target.get(*key).and_then(Value::as_str))
    }
}

/// Anything that resolves to a canonical identifier.
pub trait Identified {
    fn entity_id(&self) -> Result<String, IdError>;
}

impl Identified for EntityKey {
    fn entity_id(&self) -> Result<String, IdError> {
        self.resolve()
    }
}

impl Identified for EntityRef {
    fn entity_id(&self) -> Result<String, IdError> {
        self.id()
    }
}

impl Identified for Value {
    fn entity_id(&self) -> Result<String, IdError> {
        normalize_id(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_id_shapes_normalize_to_same_string() {
        let shapes = [
            json!({ "_id": "U1" }),
            json!({ "id": "U1" }),
            json!({ "userId": { "_id": "U1" } }),
            json!({ "userId": "U1" }),
            json!({ "user": { "id": "U1" }, "createdAt": "2024-01-01" }),
            json!("U1"),
        ];
        for shape in &shapes {
            assert_eq!(normalize_id(shape), Ok("U1".to_string()), "shape {shape}");
        }
    }

    #[test]
    fn underscore_id_wins_over_plain_id() {
        assert_eq!(normalize_id(&json!({ "_id": "A", "id": "B" })), Ok("A".to_string()));
    }

    #[test]
    fn malformed_ids_fail_explicitly() {
        assert_eq!(normalize_id(&json!({ "name": "x" })), Err(IdError::Missing));
        assert_eq!(normalize_id(&json!({ "_id": "  " })), Err(IdError::Empty));
        assert_eq!(normalize_id(&json!(null)), Err(IdError::Missing));
        assert_eq!(normalize_id(&json!(42)), Err(IdError::Unsupported("number")));
        assert_eq!(normalize_id(&json!({ "_id": null })), Err(IdError::Missing));
    }

    #[test]
    fn malformed_references_never_match() {
        assert!(!same_id(&json!({}), &json!({})));
        assert!(same_id(&json!({ "_id": "P1" }), &json!("P1")));
    }

    #[test]
    fn entity_key_resolves_either_field() {
        let key: EntityKey = serde_json::from_value(json!({ "_id": "P1", "id": "P1" })).unwrap();
        assert_eq!(key.resolve(), Ok("P1".to_string()));
        let key: EntityKey = serde_json::from_value(json!({ "id": "P2" })).unwrap();
        assert_eq!(key.resolve(), Ok("P2".to_string()));
        assert_eq!(EntityKey::default().resolve(), Err(IdError::Missing));
    }

    #[test]
    fn entity_ref_deserializes_both_shapes() {
        let refs: Vec<EntityRef> =
            serde_json::from_value(json!(["U1", { "_id": "U2", "name": "Ada" }])).unwrap();
        assert!(refs[0].is("U1"));
        assert!(refs[1].is("U2"));
        assert_eq!(refs[1].display_name(), Some("Ada"));
        assert_eq!(refs[0].display_name(), None);
    }

    #[test]
    fn user_id_prefers_the_user_over_the_entry_id() {
        let entries: Vec<EntityRef> = serde_json::from_value(json!([
            "U1",
            { "_id": "U2", "name": "Ada" },
            { "_id": "L9", "user": { "_id": "U3", "name": "Grace" } },
            { "_id": "L10", "userId": "U4" },
            { "_id": "L11", "user": null },
        ]))
        .unwrap();
        let users: Vec<String> = entries.iter().map(|entry| entry.user_id().unwrap()).collect();
        assert_eq!(users, vec!["U1", "U2", "U3", "U4", "L11"]);
        assert!(entries[2].is_user("U3"));
        assert!(!entries[2].is_user("L9"));
        assert!(entries[2].is("L9"));
    }

    #[test]
    fn temp_ids_are_recognised() {
        let id = generate_temp_id();
        assert!(is_temp_id(&id));
        assert_eq!(id.len(), TEMP_ID_PREFIX.len() + TEMP_ID_LENGTH);
        assert!(!is_temp_id("65f0c1d2e3"));
    }
}
