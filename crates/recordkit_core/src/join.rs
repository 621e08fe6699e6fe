//! Relation building between two record collections.
//!
//! Both joins are left-outer: every primary record appears in the output
//! under its original key, in its original order, whether or not a foreign
//! record matched.

use recordkit_value::{Collection, Key, Record, Value};
use tracing::debug;

use crate::config::JoinConfig;
use crate::index::Index;

fn lookup<'a>(index: &'a Index, record: &Record, primary_key: &Key) -> Option<&'a Record> {
    record
        .get(primary_key)
        .and_then(|value| index.get_by_value(value))
}

/// Attaches the matching foreign record to every primary record.
///
/// The foreign collection is indexed on `foreign_key`. A primary record
/// whose `primary_key` value is found in that index gets the foreign record
/// under [`JoinConfig::relation_name`]; every other record gets an empty
/// record there. The field is always set.
///
/// ```
/// use recordkit_core::{relation_set, JoinConfig};
/// use recordkit_value::{Collection, Record, Value};
///
/// let users = Collection::from_records([
///     Record::from([("id", 1)]),
///     Record::from([("id", 2)]),
/// ]);
/// let names = Collection::from_records([
///     Record::from([("uid", Value::from(1)), ("name", Value::from("A"))]),
/// ]);
///
/// let joined = relation_set(&users, &names, "id", "uid", &JoinConfig::default());
/// let second = joined.records().nth(1).unwrap();
/// assert_eq!(second.field("relation"), Some(&Value::Record(Record::new())));
/// ```
pub fn relation_set(
    primary: &Collection,
    foreign: &Collection,
    primary_key: impl Into<Key>,
    foreign_key: impl Into<Key>,
    config: &JoinConfig,
) -> Collection {
    if primary.is_empty() {
        return Collection::new();
    }

    let primary_key = primary_key.into();
    let index = Index::build(foreign.records(), &foreign_key.into());
    let relation = Key::from(config.relation_name.as_str());

    let mut matched = 0usize;
    let joined = primary.iter().map(|(key, record)| {
        let related = match lookup(&index, record, &primary_key) {
            Some(found) => {
                matched += 1;
                found.clone()
            }
            None => Record::new(),
        };
        let mut record = record.clone();
        record.insert(relation.clone(), related);
        (key.clone(), record)
    });
    let output = Collection::from_entries(joined);

    debug!(
        primary = primary.len(),
        indexed = index.len(),
        matched,
        relation = %relation,
        "relation set"
    );
    output
}

/// Copies selected fields from the matching foreign record onto every
/// primary record.
///
/// `field_defaults` names the fields to backfill and the value each takes
/// when the foreign side cannot supply it. For a matched record, each field
/// comes from the foreign record if present there, else from its default;
/// for an unmatched record, every field takes its default. A field that is
/// already present on the primary record is left alone unless
/// [`JoinConfig::overwrite`] is set.
pub fn relation_append_key(
    primary: &Collection,
    foreign: &Collection,
    primary_key: impl Into<Key>,
    foreign_key: impl Into<Key>,
    field_defaults: &Record,
    config: &JoinConfig,
) -> Collection {
    if primary.is_empty() {
        return Collection::new();
    }

    let primary_key = primary_key.into();
    let index = Index::build(foreign.records(), &foreign_key.into());

    let mut matched = 0usize;
    let joined = primary.iter().map(|(key, record)| {
        let found = lookup(&index, record, &primary_key);
        if found.is_some() {
            matched += 1;
        }

        let mut record = record.clone();
        for (field, default) in field_defaults {
            if record.contains_key(field) && !config.overwrite {
                continue;
            }
            let value: Value = found
                .and_then(|foreign| foreign.get(field))
                .unwrap_or(default)
                .clone();
            record.insert(field.clone(), value);
        }
        (key.clone(), record)
    });
    let output = Collection::from_entries(joined);

    debug!(
        primary = primary.len(),
        indexed = index.len(),
        matched,
        fields = field_defaults.len(),
        overwrite = config.overwrite,
        "relation append"
    );
    output
}
