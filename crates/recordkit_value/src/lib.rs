//! # recordkit value model
//!
//! Dynamic, insertion-ordered records for recordkit.
//!
//! This crate provides:
//! - [`Key`]: integer-or-text record keys with canonical integer normalisation
//! - [`Value`]: scalars, lists, nested records and opaque entities
//! - [`Record`]: an ordered mapping with unique keys
//! - [`Collection`]: an ordered, keyed sequence of records
//! - [`KeyedContainer`]: the capability path resolution is written against
//!
//! ## Usage
//!
//! ```
//! use recordkit_value::{Key, Record, Value};
//!
//! let mut user = Record::new();
//! user.insert("name", "Alice");
//! user.insert("age", 30);
//!
//! assert_eq!(user.get(&Key::from("age")), Some(&Value::Integer(30)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod container;
mod error;
mod key;
mod record;
mod serde_impl;
mod value;

pub use collection::Collection;
pub use container::{Capabilities, ContainerKind, KeyedContainer};
pub use error::ContainerError;
pub use key::Key;
pub use record::Record;
pub use value::{EntityRef, Value};
