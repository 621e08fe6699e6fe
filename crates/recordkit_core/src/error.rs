//! Error types for recordkit core.

use recordkit_value::{ContainerError, Key};
use thiserror::Error;

/// Result type for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that can occur while composing records.
///
/// Everything not listed here is total: missing fields, unmatched join keys
/// and absent path segments produce defaults, never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A per-key setting does not line up with the key list.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the mismatch.
        message: String,
    },

    /// An argument is not supported for the given container.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// An entity property could not be read and the entity does not allow
    /// missing properties.
    #[error("cannot read property `{property}` of {type_name}")]
    PropertyAccess {
        /// Name of the entity type.
        type_name: String,
        /// The property that was requested.
        property: String,
    },

    /// A container reported a key as present but could not produce it.
    #[error("key not found: {key}")]
    NotFound {
        /// The missing key.
        key: Key,
    },
}

impl ComposeError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a property access error.
    pub fn property_access(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}

impl From<ContainerError> for ComposeError {
    fn from(err: ContainerError) -> Self {
        match err {
            ContainerError::NotFound { key } => Self::NotFound { key },
            ContainerError::PropertyAccess {
                type_name,
                property,
            } => Self::PropertyAccess {
                type_name,
                property,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_errors_convert() {
        let err: ComposeError = ContainerError::property_access("User", "email").into();
        assert_eq!(err, ComposeError::property_access("User", "email"));
        assert_eq!(err.to_string(), "cannot read property `email` of User");

        let err: ComposeError = ContainerError::not_found(Key::Int(3)).into();
        assert_eq!(err.to_string(), "key not found: 3");
    }
}
