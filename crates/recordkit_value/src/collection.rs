//! Keyed record collections.

use std::collections::HashMap;

use crate::key::Key;
use crate::record::Record;
use crate::value::Value;

/// An ordered collection of records, each under its own key.
///
/// Built from a plain list of records the keys are `0..n`; built from
/// keyed entries the caller's keys are kept. Order is significant and is
/// what stable operations preserve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    entries: Vec<(Key, Record)>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection keyed `0..n`.
    pub fn from_records<I: IntoIterator<Item = Record>>(records: I) -> Self {
        Self {
            entries: records
                .into_iter()
                .enumerate()
                .map(|(i, r)| (Key::from(i), r))
                .collect(),
        }
    }

    /// Creates a collection from keyed entries.
    ///
    /// A repeated key overwrites the earlier record in place.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Record)>,
    {
        let mut collection = Self::new();
        let mut slots: HashMap<Key, usize> = HashMap::new();
        for (key, record) in entries {
            let key = key.into();
            match slots.get(&key) {
                Some(&pos) => collection.entries[pos].1 = record,
                None => {
                    slots.insert(key.clone(), collection.entries.len());
                    collection.entries.push((key, record));
                }
            }
        }
        collection
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a record by its collection key.
    pub fn get(&self, key: &Key) -> Option<&Record> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    /// Iterates over `(key, record)` entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Key, Record)> {
        self.entries.iter()
    }

    /// Iterates over the collection keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the records in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|(_, r)| r)
    }

    /// Consumes the collection, keeping only the records.
    pub fn into_records(self) -> Vec<Record> {
        self.entries.into_iter().map(|(_, r)| r).collect()
    }

    /// Reorders the entries so that position `i` holds the entry previously
    /// at `order[i]`.
    ///
    /// Indices that are out of range or repeated are ignored; entries not
    /// named by `order` keep their relative order at the end.
    pub fn permute(&mut self, order: &[usize]) {
        let mut slots: Vec<Option<(Key, Record)>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        let mut reordered = Vec::with_capacity(slots.len());
        for &pos in order {
            if let Some(entry) = slots.get_mut(pos).and_then(Option::take) {
                reordered.push(entry);
            }
        }
        reordered.extend(slots.into_iter().flatten());
        self.entries = reordered;
    }

    /// Replaces integer keys with `0..m` in current order; text keys are
    /// left alone.
    pub fn renumber(&mut self) {
        let mut next = 0i64;
        for (key, _) in &mut self.entries {
            if key.is_int() {
                *key = Key::Int(next);
                next += 1;
            }
        }
    }

    /// Converts the collection into a record of nested records.
    pub fn into_record(self) -> Record {
        self.entries
            .into_iter()
            .map(|(k, r)| (k, Value::Record(r)))
            .collect()
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Record);
    type IntoIter = std::vec::IntoIter<(Key, Record)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a (Key, Record);
    type IntoIter = std::slice::Iter<'a, (Key, Record)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
