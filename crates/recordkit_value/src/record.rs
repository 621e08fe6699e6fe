//! Insertion-ordered records.

use crate::key::Key;
use crate::value::Value;

/// An ordered mapping from [`Key`] to [`Value`].
///
/// Keys are unique and keep their insertion position; overwriting a key
/// keeps its original position. Lookups are linear scans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(Key, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Creates a list-like record keyed `0..n`.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut record = Self::new();
        for value in values {
            record.push(value);
        }
        record
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Returns true if `key` is present, even when its value is null.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.position(key).is_some()
    }

    /// Look up a key.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a key for mutation.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a text field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.get(&Key::from(name))
    }

    /// Sets `key` to `value`, returning the previous value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// The integer key that [`Record::push`] would use next.
    ///
    /// One past the largest integer key, or 0 when there is none. `None`
    /// once the largest integer key is `i64::MAX`.
    pub fn next_index(&self) -> Option<i64> {
        match self.entries.iter().filter_map(|(k, _)| k.as_int()).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    /// Appends `value` at the next free integer position and returns its key.
    ///
    /// Returns `None` and drops `value` when no integer position is left.
    pub fn push(&mut self, value: impl Into<Value>) -> Option<Key> {
        let key = Key::Int(self.next_index()?);
        self.entries.push((key.clone(), value.into()));
        Some(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Key, Value)> {
        self.entries.iter()
    }

    /// Returns true when the keys are exactly `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| k.as_int() == i64::try_from(i).ok())
    }

    /// Consumes the record, keeping only its values.
    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }

    /// Converts the record into a [`Value`], using a list when the keys are
    /// exactly `0..n`.
    pub fn into_value(self) -> Value {
        if self.is_list() && !self.is_empty() {
            Value::List(self.into_values())
        } else {
            Value::Record(self)
        }
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        record.extend(iter);
        record
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Record {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<Key>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a (Key, Value);
    type IntoIter = std::slice::Iter<'a, (Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
