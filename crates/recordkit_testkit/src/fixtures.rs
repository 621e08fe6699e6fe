//! Test fixtures built from JSON.
//!
//! JSON keeps fixtures readable; objects become records and arrays become
//! lists, with key order preserved.

use recordkit_value::{
    Capabilities, Collection, ContainerError, ContainerKind, EntityRef, Key, KeyedContainer,
    Record, Value,
};
use serde_json::json;

/// Builds a record from a JSON object or array.
///
/// # Panics
///
/// Panics if `json` is not an object or array.
pub fn record(json: serde_json::Value) -> Record {
    serde_json::from_value(json).expect("fixture must be a JSON object or array")
}

/// Builds a collection from a JSON array (keys `0..n`) or object (keys
/// taken from the object).
///
/// # Panics
///
/// Panics if `json` is not an array or object of objects.
pub fn collection(json: serde_json::Value) -> Collection {
    serde_json::from_value(json).expect("fixture must be a JSON array or object of objects")
}

/// Builds a value from JSON.
pub fn value(json: serde_json::Value) -> Value {
    serde_json::from_value(json).expect("any JSON converts to a value")
}

/// Converts a record back to JSON for readable assertions.
pub fn to_json(record: &Record) -> serde_json::Value {
    serde_json::to_value(record).expect("records always serialize")
}

/// Converts a collection back to JSON for readable assertions.
pub fn collection_to_json(collection: &Collection) -> serde_json::Value {
    serde_json::to_value(collection).expect("collections always serialize")
}

/// Three users; `cy` has no `team`.
pub fn users() -> Collection {
    collection(json!([
        {"id": 1, "name": "ada", "team": "core", "age": 36},
        {"id": 2, "name": "bob", "team": "ops", "age": 29},
        {"id": 3, "name": "cy", "age": 36},
    ]))
}

/// Orders referring to users by `user_id`; one order points at a user that
/// does not exist and one has no user at all.
pub fn orders() -> Collection {
    collection(json!([
        {"order": 100, "user_id": 1, "total": 40.5},
        {"order": 101, "user_id": 3, "total": 12},
        {"order": 102, "user_id": 9, "total": 99},
        {"order": 103, "total": 7},
        {"order": 104, "user_id": 1, "total": "15"},
    ]))
}

/// Profiles keyed by `uid`; uid 1 appears twice so the later row wins in an
/// index.
pub fn profiles() -> Collection {
    collection(json!([
        {"uid": 1, "city": "Oslo", "plan": "free"},
        {"uid": 2, "city": "Lima"},
        {"uid": 1, "city": "Bergen", "plan": "pro"},
    ]))
}

/// An entity exposing a fixed set of named properties.
///
/// Missing properties are errors unless the capabilities say otherwise.
#[derive(Debug, Clone)]
pub struct Profile {
    properties: Record,
    capabilities: Capabilities,
}

impl Profile {
    /// Creates a strict entity over the given properties.
    pub fn new(properties: Record) -> Self {
        Self {
            properties,
            capabilities: Capabilities::NONE,
        }
    }

    /// Sets the capabilities the entity declares.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Wraps the entity as a [`Value`].
    pub fn into_value(self) -> Value {
        Value::Entity(EntityRef::new(self))
    }
}

impl KeyedContainer for Profile {
    fn has_key(&self, key: &Key) -> bool {
        self.properties.contains_key(key)
    }

    fn get(&self, key: &Key) -> Result<Value, ContainerError> {
        self.properties
            .get(key)
            .cloned()
            .ok_or_else(|| ContainerError::not_found(key.clone()))
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::Entity
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn type_name(&self) -> &'static str {
        "Profile"
    }
}
