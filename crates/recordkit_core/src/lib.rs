//! # recordkit core
//!
//! Composition of in-memory record collections.
//!
//! This crate provides:
//! - Path resolution over records, lists and entities ([`get_value`], [`key_exists`])
//! - Key indexing ([`index`])
//! - Left-outer relation building ([`relation_set`], [`relation_append_key`])
//! - Recursive multi-way merge ([`merge`])
//! - Column projection and value maps ([`get_column`], [`map`])
//! - Stable multi-column sorting ([`multisort`])
//!
//! Every operation is a pure function of its inputs except [`multisort`],
//! [`merge_into`] and [`remove`], which mutate through an exclusive borrow.
//!
//! ## Usage
//!
//! ```
//! use recordkit_core::{multisort, relation_set, JoinConfig, SortConfig, SortOrder};
//! use recordkit_value::{Collection, Record, Value};
//!
//! let orders = Collection::from_records([
//!     Record::from([("id", Value::from(10)), ("user", Value::from(1)), ("total", Value::from(40))]),
//!     Record::from([("id", Value::from(11)), ("user", Value::from(2)), ("total", Value::from(75))]),
//! ]);
//! let users = Collection::from_records([
//!     Record::from([("uid", Value::from(1)), ("name", Value::from("ada"))]),
//! ]);
//!
//! let config = JoinConfig::new().relation_name("buyer");
//! let mut joined = relation_set(&orders, &users, "user", "uid", &config);
//! multisort(&mut joined, "total", &SortConfig::new().directions(SortOrder::Descending)).unwrap();
//!
//! let first = joined.records().next().unwrap();
//! assert_eq!(first.field("total"), Some(&Value::from(75)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod compare;
mod config;
mod error;
mod helpers;
mod index;
mod join;
mod merge;
mod path;
mod project;
mod sort;

pub use compare::{compare, natural_cmp, numeric_form, regular_cmp, string_form};
pub use config::{JoinConfig, Setting, SortConfig, SortFlag, SortOrder, DEFAULT_RELATION_NAME};
pub use error::{ComposeError, ComposeResult};
pub use helpers::{count_values, diff_both, pick_random, query_string, remove, wrap};
pub use index::{index, Index};
pub use join::{relation_append_key, relation_set};
pub use merge::{merge, merge_into};
pub use path::{get_value, key_exists, Path, Resolver};
pub use project::{get_column, map};
pub use sort::{multisort, SortKeys};
