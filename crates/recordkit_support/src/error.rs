//! Error types for recordkit support.

use recordkit_value::Key;
use thiserror::Error;

/// Result type for support operations.
pub type SupportResult<T> = Result<T, SupportError>;

/// Errors raised by the support helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SupportError {
    /// A value is not one of the enumerated values of a type.
    #[error("value '{value}' is not part of the enum {type_name}")]
    UnexpectedValue {
        /// The rejected value.
        value: Key,
        /// The enumerated type.
        type_name: &'static str,
    },

    /// A name is not one of the enumerated names of a type.
    #[error("no enum constant '{name}' in {type_name}")]
    UnknownName {
        /// The rejected name.
        name: String,
        /// The enumerated type.
        type_name: &'static str,
    },

    /// Input is not valid URL-safe base64.
    #[error("invalid base64: {source}")]
    InvalidBase64 {
        /// The decoder's complaint.
        #[from]
        source: base64::DecodeError,
    },
}

impl SupportError {
    /// Creates an unexpected value error.
    pub fn unexpected_value(value: impl Into<Key>, type_name: &'static str) -> Self {
        Self::UnexpectedValue {
            value: value.into(),
            type_name,
        }
    }

    /// Creates an unknown name error.
    pub fn unknown_name(name: impl Into<String>, type_name: &'static str) -> Self {
        Self::UnknownName {
            name: name.into(),
            type_name,
        }
    }
}
