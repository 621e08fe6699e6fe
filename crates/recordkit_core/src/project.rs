//! Column extraction and value maps.

use recordkit_value::{Collection, Key, Record, Value};
use tracing::trace;

use crate::error::ComposeResult;
use crate::path::{resolve, Path};

/// Resolves `path` against every record, in collection order.
///
/// Unresolvable paths yield [`Value::Null`].
pub(crate) fn column_values(records: &Collection, path: &Path) -> ComposeResult<Vec<Value>> {
    records
        .records()
        .map(|record| resolve(record, path, Value::Null))
        .collect()
}

/// Extracts the value at `path` from every record.
///
/// With `keep_keys` the result is keyed like the collection; otherwise it is
/// list-like and keyed `0..n`. Records where the path does not resolve
/// contribute [`Value::Null`].
///
/// # Errors
///
/// Propagates [`ComposeError::PropertyAccess`](crate::ComposeError) from
/// path resolution.
pub fn get_column(
    records: &Collection,
    path: impl Into<Path>,
    keep_keys: bool,
) -> ComposeResult<Record> {
    let values = column_values(records, &path.into())?;
    if keep_keys {
        Ok(records.keys().cloned().zip(values).collect())
    } else {
        Ok(Record::from_values(values))
    }
}

/// Builds a map from the value at `from` to the value at `to`.
///
/// A later record with the same `from` value overwrites the earlier one.
/// With `group`, the result is a record of such maps keyed by the value at
/// `group`. Records whose `from` or `group` value cannot serve as a key
/// (a list, record or entity) are skipped.
///
/// ```
/// use recordkit_core::map;
/// use recordkit_value::{Collection, Key, Record, Value};
///
/// let users = Collection::from_records([
///     Record::from([("id", Value::from(1)), ("name", Value::from("ada"))]),
///     Record::from([("id", Value::from(2)), ("name", Value::from("bob"))]),
/// ]);
/// let names = map(&users, "id", "name", None).unwrap();
/// assert_eq!(names.get(&Key::Int(2)), Some(&Value::from("bob")));
/// ```
///
/// # Errors
///
/// Propagates [`ComposeError::PropertyAccess`](crate::ComposeError) from
/// path resolution.
pub fn map(
    records: &Collection,
    from: impl Into<Path>,
    to: impl Into<Path>,
    group: Option<Path>,
) -> ComposeResult<Record> {
    let from = from.into();
    let to = to.into();
    let mut result = Record::new();

    for record in records.records() {
        let from_value = resolve(record, &from, Value::Null)?;
        let to_value = resolve(record, &to, Value::Null)?;
        let Some(key) = Key::from_value(&from_value) else {
            trace!(kind = from_value.kind_name(), "skipping record with composite map key");
            continue;
        };

        let Some(group) = &group else {
            result.insert(key, to_value);
            continue;
        };

        let group_value = resolve(record, group, Value::Null)?;
        let Some(group_key) = Key::from_value(&group_value) else {
            trace!(kind = group_value.kind_name(), "skipping record with composite group key");
            continue;
        };
        match result.get_mut(&group_key).and_then(Value::as_record_mut) {
            Some(bucket) => {
                bucket.insert(key, to_value);
            }
            None => {
                result.insert(group_key, Record::from([(key, to_value)]));
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Collection {
        Collection::from_entries([
            (
                "a",
                Record::from([
                    ("id", Value::from(1)),
                    ("name", Value::from("ada")),
                    ("team", Value::from("core")),
                    ("meta", Value::Record(Record::from([("age", 36)]))),
                ]),
            ),
            (
                "b",
                Record::from([
                    ("id", Value::from(2)),
                    ("name", Value::from("bob")),
                    ("team", Value::from("ops")),
                ]),
            ),
            (
                "c",
                Record::from([
                    ("id", Value::from(3)),
                    ("name", Value::from("cy")),
                    ("team", Value::from("core")),
                ]),
            ),
        ])
    }

    #[test]
    fn column_reindexes_by_default() {
        let column = get_column(&people(), "name", false).unwrap();
        assert_eq!(column, Record::from_values(["ada", "bob", "cy"]));
    }

    #[test]
    fn column_keeps_keys_and_fills_nulls() {
        let column = get_column(&people(), "meta.age", true).unwrap();
        let expected = Record::from([
            ("a", Value::from(36)),
            ("b", Value::Null),
            ("c", Value::Null),
        ]);
        assert_eq!(column, expected);
    }

    #[test]
    fn column_with_resolver() {
        let path = Path::resolver(|record, _| {
            let name = record.get(&Key::from("name")).unwrap_or(Value::Null);
            Value::from(format!("<{}>", name.as_text().unwrap_or_default()))
        });
        let column = get_column(&people(), path, false).unwrap();
        assert_eq!(column.get(&Key::Int(0)), Some(&Value::from("<ada>")));
    }

    #[test]
    fn map_without_group() {
        let names = map(&people(), "id", "name", None).unwrap();
        assert_eq!(
            names,
            Record::from([(1, "ada"), (2, "bob"), (3, "cy")])
        );
    }

    #[test]
    fn map_later_duplicate_wins() {
        let by_team = map(&people(), "team", "name", None).unwrap();
        assert_eq!(by_team.field("core"), Some(&Value::from("cy")));
        assert_eq!(by_team.len(), 2);
    }

    #[test]
    fn map_with_group() {
        let grouped = map(&people(), "id", "name", Some(Path::from("team"))).unwrap();
        let core = grouped.field("core").and_then(Value::as_record).unwrap();
        assert_eq!(core, &Record::from([(1, "ada"), (3, "cy")]));
        let ops = grouped.field("ops").and_then(Value::as_record).unwrap();
        assert_eq!(ops, &Record::from([(2, "bob")]));
    }

    #[test]
    fn map_skips_composite_keys() {
        let records = Collection::from_records([
            Record::from([("k", Value::from(vec![1])), ("v", Value::from(1))]),
            Record::from([("k", Value::from("x")), ("v", Value::from(2))]),
        ]);
        let mapped = map(&records, "k", "v", None).unwrap();
        assert_eq!(mapped, Record::from([("x", 2)]));
    }
}
