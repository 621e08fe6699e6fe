//! Key index over a record collection.

use std::collections::HashMap;

use recordkit_value::{Collection, Key, Record, Value};
use tracing::trace;

/// A lookup table from a field value to the record carrying it.
///
/// Built by last-write-wins over the collection: a later record with the
/// same field value replaces the earlier one but keeps its slot, so
/// iteration follows the order in which each value was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    slots: HashMap<Key, usize>,
    entries: Vec<(Key, Record)>,
}

impl Index {
    /// Builds an index of `records` on the field `key_field`.
    ///
    /// Only direct key presence is considered; dotted names are not
    /// resolved. Records whose field is absent, null or not usable as a key
    /// are left out.
    pub fn build<'a, I>(records: I, key_field: &Key) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut index = Self::default();
        for record in records {
            let Some(value) = record.get(key_field) else {
                trace!(field = %key_field, "record lacks index field");
                continue;
            };
            match index_key(value) {
                Some(key) => index.insert(key, record.clone()),
                None => trace!(field = %key_field, kind = value.kind_name(), "unindexable field value"),
            }
        }
        index
    }

    fn insert(&mut self, key: Key, record: Record) {
        match self.slots.get(&key) {
            Some(&pos) => self.entries[pos].1 = record,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
    }

    /// Looks up the record indexed under `key`.
    pub fn get(&self, key: &Key) -> Option<&Record> {
        self.slots.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Looks up the record whose indexed field equals `value`.
    pub fn get_by_value(&self, value: &Value) -> Option<&Record> {
        index_key(value).and_then(|key| self.get(&key))
    }

    /// Returns true if some record is indexed under `key`.
    pub fn contains(&self, key: &Key) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of distinct indexed values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, record)` pairs in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Key, Record)> {
        self.entries.iter()
    }

    /// Converts the index into a record of nested records.
    pub fn into_record(self) -> Record {
        self.entries
            .into_iter()
            .map(|(k, r)| (k, Value::Record(r)))
            .collect()
    }
}

fn index_key(value: &Value) -> Option<Key> {
    if value.is_null() {
        return None;
    }
    Key::from_value(value)
}

/// Indexes `records` on `key_field`. See [`Index::build`].
///
/// ```
/// use recordkit_core::index;
/// use recordkit_value::{Collection, Key, Record};
///
/// let users = Collection::from_records([
///     Record::from([("id", 1)]),
///     Record::from([("id", 2)]),
/// ]);
/// let by_id = index(&users, "id");
/// assert!(by_id.contains(&Key::Int(2)));
/// ```
pub fn index(records: &Collection, key_field: impl Into<Key>) -> Index {
    Index::build(records.records(), &key_field.into())
}
