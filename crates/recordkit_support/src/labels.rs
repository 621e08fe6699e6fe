//! Enumerated values with names and labels.
//!
//! A type implementing [`Enumerated`] declares its `(name, value)` table and
//! optional labels once. The first lookup compiles the tables into a
//! process-wide registry keyed by type identity; every later lookup reads
//! the cached copy.
//!
//! ```
//! use recordkit_support::{Enumerated, EnumValue};
//! use recordkit_value::Key;
//!
//! struct Status;
//!
//! impl Enumerated for Status {
//!     fn variants() -> Vec<(&'static str, Key)> {
//!         vec![("VIEW", Key::from("view")), ("EDIT", Key::from("edit"))]
//!     }
//!
//!     fn labels() -> Vec<(Key, String)> {
//!         vec![(Key::from("view"), "Viewer".to_string())]
//!     }
//! }
//!
//! assert_eq!(Status::label_for("view"), Some("Viewer".to_string()));
//! assert_eq!(Status::label_for("edit"), Some("edit".to_string()));
//!
//! let edit = EnumValue::<Status>::from_name("EDIT").unwrap();
//! assert_eq!(edit.value(), &Key::from("edit"));
//! ```

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use recordkit_value::Key;
use tracing::debug;

use crate::error::{SupportError, SupportResult};

/// Label returned by [`Enumerated::label_or_unknown`] for values outside
/// the enum.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Compiled lookup tables of one enumerated type.
#[derive(Debug)]
struct EnumTable {
    names: Vec<&'static str>,
    values: Vec<Key>,
    labels: Vec<String>,
    by_name: HashMap<&'static str, usize>,
    by_value: HashMap<Key, usize>,
}

impl EnumTable {
    fn compile(variants: Vec<(&'static str, Key)>, labels: Vec<(Key, String)>) -> Self {
        let label_map: HashMap<Key, String> = labels.into_iter().collect();
        let mut table = Self {
            names: Vec::with_capacity(variants.len()),
            values: Vec::with_capacity(variants.len()),
            labels: Vec::with_capacity(variants.len()),
            by_name: HashMap::with_capacity(variants.len()),
            by_value: HashMap::with_capacity(variants.len()),
        };

        for (name, value) in variants {
            if table.by_name.contains_key(name) {
                continue;
            }
            let pos = table.names.len();
            let label = label_map
                .get(&value)
                .cloned()
                .unwrap_or_else(|| value.to_string());
            table.by_name.insert(name, pos);
            // Aliases share a value; lookups by value find the first name.
            table.by_value.entry(value.clone()).or_insert(pos);
            table.names.push(name);
            table.values.push(value);
            table.labels.push(label);
        }
        table
    }
}

type Registry = RwLock<HashMap<TypeId, Arc<EnumTable>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

fn table<E: Enumerated>() -> Arc<EnumTable> {
    let id = TypeId::of::<E>();
    if let Some(table) = registry().read().get(&id) {
        return Arc::clone(table);
    }

    let compiled = EnumTable::compile(E::variants(), E::labels());
    debug!(
        enum_type = type_name::<E>(),
        variants = compiled.names.len(),
        "compiled enum table"
    );
    let mut guard = registry().write();
    Arc::clone(guard.entry(id).or_insert_with(|| Arc::new(compiled)))
}

/// A type with a fixed set of named values.
///
/// Implementors provide the tables; every lookup is a provided method
/// backed by the shared registry.
pub trait Enumerated: 'static {
    /// `(name, value)` pairs in declaration order.
    fn variants() -> Vec<(&'static str, Key)>;

    /// Labels by value. Values without a label use their own text.
    fn labels() -> Vec<(Key, String)> {
        Vec::new()
    }

    /// All names in declaration order.
    fn names() -> Vec<&'static str>
    where
        Self: Sized,
    {
        table::<Self>().names.clone()
    }

    /// All values in declaration order.
    fn values() -> Vec<Key>
    where
        Self: Sized,
    {
        table::<Self>().values.clone()
    }

    /// Returns true if `value` is one of the enumerated values.
    fn is_valid(value: impl Into<Key>) -> bool
    where
        Self: Sized,
    {
        table::<Self>().by_value.contains_key(&value.into())
    }

    /// Returns true if `name` is one of the enumerated names.
    fn is_valid_name(name: &str) -> bool
    where
        Self: Sized,
    {
        table::<Self>().by_name.contains_key(name)
    }

    /// The name of the first variant holding `value`.
    fn search(value: impl Into<Key>) -> Option<&'static str>
    where
        Self: Sized,
    {
        let table = table::<Self>();
        let found = table.by_value.get(&value.into()).map(|&pos| table.names[pos]);
        found
    }

    /// The label of `value`, if it is enumerated.
    fn label_for(value: impl Into<Key>) -> Option<String>
    where
        Self: Sized,
    {
        let table = table::<Self>();
        let found = table
            .by_value
            .get(&value.into())
            .map(|&pos| table.labels[pos].clone());
        found
    }

    /// The label of `value`, or `default` if it is not enumerated.
    fn label_or(value: impl Into<Key>, default: &str) -> String
    where
        Self: Sized,
    {
        Self::label_for(value).unwrap_or_else(|| default.to_string())
    }

    /// The label of `value`, or [`UNKNOWN_LABEL`].
    fn label_or_unknown(value: impl Into<Key>) -> String
    where
        Self: Sized,
    {
        Self::label_or(value, UNKNOWN_LABEL)
    }

    /// Every `(value, label)` pair in declaration order, one per value.
    fn label_table() -> Vec<(Key, String)>
    where
        Self: Sized,
    {
        let table = table::<Self>();
        table
            .values
            .iter()
            .zip(&table.labels)
            .enumerate()
            .filter(|(pos, (value, _))| table.by_value.get(*value) == Some(pos))
            .map(|(_, (value, label))| (value.clone(), label.clone()))
            .collect()
    }
}

/// A value checked to belong to the enumerated type `E`.
pub struct EnumValue<E: Enumerated> {
    value: Key,
    label: Option<String>,
    _enum: PhantomData<fn() -> E>,
}

impl<E: Enumerated> EnumValue<E> {
    /// Wraps `value` after checking it is enumerated.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::UnexpectedValue`] if `value` is not one of
    /// `E`'s values.
    pub fn new(value: impl Into<Key>) -> SupportResult<Self> {
        let value = value.into();
        if !E::is_valid(value.clone()) {
            return Err(SupportError::unexpected_value(value, type_name::<E>()));
        }
        Ok(Self {
            value,
            label: None,
            _enum: PhantomData,
        })
    }

    /// Wraps the value declared under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::UnknownName`] if `E` has no such name.
    pub fn from_name(name: &str) -> SupportResult<Self> {
        let table = table::<E>();
        let pos = table
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| SupportError::unknown_name(name, type_name::<E>()))?;
        Ok(Self {
            value: table.values[pos].clone(),
            label: None,
            _enum: PhantomData,
        })
    }

    /// Overrides the label of this instance.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The wrapped value.
    pub fn value(&self) -> &Key {
        &self.value
    }

    /// The name of the first variant holding this value.
    pub fn name(&self) -> Option<&'static str> {
        E::search(self.value.clone())
    }

    /// The instance label if one was set, else the registered label.
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => E::label_or(self.value.clone(), ""),
        }
    }
}

impl<E: Enumerated> Clone for EnumValue<E> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            label: self.label.clone(),
            _enum: PhantomData,
        }
    }
}

impl<E: Enumerated> PartialEq for EnumValue<E> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<E: Enumerated> Eq for EnumValue<E> {}

impl<E: Enumerated> fmt::Debug for EnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumValue")
            .field("enum", &type_name::<E>())
            .field("value", &self.value)
            .finish()
    }
}

impl<E: Enumerated> fmt::Display for EnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
