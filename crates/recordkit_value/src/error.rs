//! Error types for the value crate.

use thiserror::Error;

use crate::key::Key;

/// Errors raised by [`KeyedContainer`](crate::KeyedContainer) lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The key is not present in the container.
    #[error("key not found: {key}")]
    NotFound {
        /// The missing key.
        key: Key,
    },

    /// An entity could not produce the requested property.
    #[error("cannot read property `{property}` of {type_name}")]
    PropertyAccess {
        /// Name of the entity type.
        type_name: String,
        /// The property that was requested.
        property: String,
    },
}

impl ContainerError {
    /// Create a not found error.
    pub fn not_found(key: Key) -> Self {
        Self::NotFound { key }
    }

    /// Create a property access error.
    pub fn property_access(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}
