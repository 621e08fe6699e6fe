//! The keyed-container capability shared by records and entities.
//!
//! Path resolution never needs to know whether it is looking at a plain
//! mapping or at an application object; it only needs to ask "do you have
//! this key?" and "give me this key". Entities additionally advertise
//! [`Capabilities`] that decide what happens when a property is missing.

use crate::error::ContainerError;
use crate::key::Key;
use crate::record::Record;
use crate::value::Value;

/// What kind of container a [`KeyedContainer`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Plain insertion-ordered mapping.
    Mapping,
    /// Ordered list addressed by integer position.
    Sequence,
    /// Object exposing named properties.
    Entity,
    /// Not a container; every lookup misses.
    Scalar,
}

/// Optional behaviours an entity may declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Absent properties read as the caller's default instead of failing.
    pub optional_key: bool,
    /// The entity supports generic offset access; absent offsets read as
    /// the caller's default.
    pub offset_access: bool,
}

impl Capabilities {
    /// No optional behaviour.
    pub const NONE: Self = Self {
        optional_key: false,
        offset_access: false,
    };

    /// Returns true when a missing property should fall back to a default.
    pub fn tolerates_missing(self) -> bool {
        self.optional_key || self.offset_access
    }
}

/// Anything that can be asked for values by key.
pub trait KeyedContainer {
    /// Returns true if `key` is present. Presence wins over the stored
    /// value: a key holding null is still present.
    fn has_key(&self, key: &Key) -> bool;

    /// Reads `key`, failing with [`ContainerError::NotFound`] when absent.
    fn get(&self, key: &Key) -> Result<Value, ContainerError>;

    /// The container kind.
    fn kind(&self) -> ContainerKind;

    /// Enumerates the keys, or `None` when the container is opaque.
    fn keys(&self) -> Option<Vec<Key>> {
        None
    }

    /// Optional behaviours of this container.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl KeyedContainer for Record {
    fn has_key(&self, key: &Key) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &Key) -> Result<Value, ContainerError> {
        Record::get(self, key)
            .cloned()
            .ok_or_else(|| ContainerError::not_found(key.clone()))
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::Mapping
    }

    fn keys(&self) -> Option<Vec<Key>> {
        Some(Record::keys(self).cloned().collect())
    }

    fn type_name(&self) -> &'static str {
        "record"
    }
}

fn list_slot(items: &[Value], key: &Key) -> Option<usize> {
    let pos = usize::try_from(key.as_int()?).ok()?;
    (pos < items.len()).then_some(pos)
}

impl KeyedContainer for Value {
    fn has_key(&self, key: &Key) -> bool {
        match self {
            Value::Record(r) => r.contains_key(key),
            Value::List(items) => list_slot(items, key).is_some(),
            Value::Entity(e) => e.container().has_key(key),
            _ => false,
        }
    }

    fn get(&self, key: &Key) -> Result<Value, ContainerError> {
        match self {
            Value::Record(r) => KeyedContainer::get(r, key),
            Value::List(items) => list_slot(items, key)
                .map(|pos| items[pos].clone())
                .ok_or_else(|| ContainerError::not_found(key.clone())),
            Value::Entity(e) => e.container().get(key),
            _ => Err(ContainerError::not_found(key.clone())),
        }
    }

    fn kind(&self) -> ContainerKind {
        match self {
            Value::Record(_) => ContainerKind::Mapping,
            Value::List(_) => ContainerKind::Sequence,
            Value::Entity(e) => e.container().kind(),
            _ => ContainerKind::Scalar,
        }
    }

    fn keys(&self) -> Option<Vec<Key>> {
        match self {
            Value::Record(r) => KeyedContainer::keys(r),
            Value::List(items) => Some((0..items.len()).map(Key::from).collect()),
            Value::Entity(e) => e.container().keys(),
            _ => Some(Vec::new()),
        }
    }

    fn capabilities(&self) -> Capabilities {
        match self {
            Value::Entity(e) => e.container().capabilities(),
            _ => Capabilities::NONE,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Entity(e) => e.container().type_name(),
            other => other.kind_name(),
        }
    }
}
