//! Multi-column stable sort.

use std::cmp::Ordering;

use recordkit_value::{Collection, Key};
use tracing::debug;

use crate::compare::compare;
use crate::config::SortConfig;
use crate::error::ComposeResult;
use crate::path::Path;
use crate::project::column_values;

/// The ordered list of sort columns.
#[derive(Debug, Clone, Default)]
pub struct SortKeys(pub Vec<Path>);

impl SortKeys {
    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no column is given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Path> for SortKeys {
    fn from(path: Path) -> Self {
        Self(vec![path])
    }
}

impl From<&str> for SortKeys {
    fn from(key: &str) -> Self {
        Self(vec![Path::from(key)])
    }
}

impl From<String> for SortKeys {
    fn from(key: String) -> Self {
        Self(vec![Path::from(key)])
    }
}

impl From<Key> for SortKeys {
    fn from(key: Key) -> Self {
        Self(vec![Path::Key(key)])
    }
}

impl From<Vec<Path>> for SortKeys {
    fn from(paths: Vec<Path>) -> Self {
        Self(paths)
    }
}

impl From<Vec<&str>> for SortKeys {
    fn from(keys: Vec<&str>) -> Self {
        Self(keys.into_iter().map(Path::from).collect())
    }
}

/// Sorts `records` in place by one or more columns.
///
/// Each key is projected as a column (unresolvable values become null) and
/// records are compared column by column, each with its own direction and
/// comparison mode from `config`. Records equal on every column keep their
/// original relative order. Afterwards integer keys are renumbered `0..n`
/// in the new order; text keys move with their records.
///
/// Sorting an empty collection, or by no keys, does nothing.
///
/// ```
/// use recordkit_core::{multisort, SortConfig};
/// use recordkit_value::{Collection, Record, Value};
///
/// let mut people = Collection::from_records([
///     Record::from([("age", 30), ("n", 1)]),
///     Record::from([("age", 20), ("n", 2)]),
///     Record::from([("age", 30), ("n", 3)]),
/// ]);
/// multisort(&mut people, "age", &SortConfig::default()).unwrap();
///
/// let order: Vec<&Value> = people.records().filter_map(|r| r.field("n")).collect();
/// assert_eq!(order, [&Value::from(2), &Value::from(1), &Value::from(3)]);
/// ```
///
/// # Errors
///
/// Returns [`ComposeError::InvalidConfig`](crate::ComposeError) when a
/// per-key direction or flag list does not match the number of keys, and
/// propagates [`ComposeError::PropertyAccess`](crate::ComposeError) from
/// path resolution. On error `records` is left untouched.
pub fn multisort(
    records: &mut Collection,
    keys: impl Into<SortKeys>,
    config: &SortConfig,
) -> ComposeResult<()> {
    let keys = keys.into();
    if keys.is_empty() || records.is_empty() {
        return Ok(());
    }

    let directions = config.directions.expand(keys.len(), "directions")?;
    let flags = config.flags.expand(keys.len(), "flags")?;
    let columns = keys
        .0
        .iter()
        .map(|path| column_values(&*records, path))
        .collect::<ComposeResult<Vec<_>>>()?;

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        columns
            .iter()
            .zip(directions.iter().zip(&flags))
            .map(|(column, (direction, flag))| direction.apply(compare(&column[a], &column[b], *flag)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| a.cmp(&b))
    });

    debug!(records = records.len(), columns = keys.len(), "multisort");
    records.permute(&order);
    records.renumber();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SortFlag, SortOrder};
    use crate::error::ComposeError;
    use recordkit_value::{Record, Value};

    fn field_order(records: &Collection, field: &str) -> Vec<Value> {
        records
            .records()
            .map(|r| r.field(field).cloned().unwrap_or(Value::Null))
            .collect()
    }

    fn rows(values: &[(i64, &str, i64)]) -> Collection {
        values
            .iter()
            .map(|&(age, name, n)| {
                Record::from([
                    ("age", Value::from(age)),
                    ("name", Value::from(name)),
                    ("n", Value::from(n)),
                ])
            })
            .collect()
    }

    #[test]
    fn mixed_column_sorts_under_default_mode() {
        let column = vec![
            Value::from(9),
            Value::from("10"),
            Value::from("10a"),
            Value::Bool(true),
            Value::from(3),
            Value::from(7),
            Value::from("N"),
            Value::from("Na"),
            Value::Null,
        ];
        let mut records: Collection = column
            .into_iter()
            .map(|v| Record::from([("v", v)]))
            .collect();
        multisort(&mut records, "v", &SortConfig::default()).unwrap();
        assert_eq!(
            field_order(&records, "v"),
            vec![
                Value::Null,
                Value::Bool(true),
                Value::from(3),
                Value::from(7),
                Value::from(9),
                Value::from("10"),
                Value::from("10a"),
                Value::from("N"),
                Value::from("Na"),
            ]
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let mut records = rows(&[(30, "x", 1), (20, "y", 2), (30, "z", 3)]);
        multisort(&mut records, "age", &SortConfig::default()).unwrap();
        assert_eq!(field_order(&records, "n"), vec![Value::from(2), Value::from(1), Value::from(3)]);
    }

    #[test]
    fn descending_keeps_ties_ascending_by_position() {
        let mut records = rows(&[(20, "x", 1), (30, "y", 2), (20, "z", 3), (30, "w", 4)]);
        let config = SortConfig::new().directions(SortOrder::Descending);
        multisort(&mut records, "age", &config).unwrap();
        assert_eq!(
            field_order(&records, "n"),
            vec![Value::from(2), Value::from(4), Value::from(1), Value::from(3)]
        );
    }

    #[test]
    fn multiple_columns_with_own_directions() {
        let mut records = rows(&[(30, "b", 1), (20, "a", 2), (30, "c", 3), (20, "d", 4)]);
        let config = SortConfig::new().directions(vec![SortOrder::Ascending, SortOrder::Descending]);
        multisort(&mut records, vec!["age", "name"], &config).unwrap();
        assert_eq!(
            field_order(&records, "n"),
            vec![Value::from(4), Value::from(2), Value::from(3), Value::from(1)]
        );
    }

    #[test]
    fn per_key_flags() {
        let mut records: Collection = ["img12", "IMG10", "img2"]
            .into_iter()
            .map(|name| Record::from([("file", name)]))
            .collect();
        let config = SortConfig::new().flags(vec![SortFlag::NaturalCaseInsensitive]);
        multisort(&mut records, "file", &config).unwrap();
        assert_eq!(
            field_order(&records, "file"),
            vec![Value::from("img2"), Value::from("IMG10"), Value::from("img12")]
        );
    }

    #[test]
    fn mismatched_settings_are_rejected_untouched() {
        let mut records = rows(&[(30, "x", 1), (20, "y", 2)]);
        let before = records.clone();
        let config = SortConfig::new().directions(vec![SortOrder::Ascending]);
        let err = multisort(&mut records, vec!["age", "name"], &config).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidConfig { .. }));
        assert_eq!(records, before);

        let config = SortConfig::new().flags(vec![SortFlag::Numeric; 3]);
        assert!(multisort(&mut records, "age", &config).is_err());
    }

    #[test]
    fn empty_inputs_are_noops() {
        let mut empty = Collection::new();
        multisort(&mut empty, "age", &SortConfig::default()).unwrap();
        assert!(empty.is_empty());

        let mut records = rows(&[(30, "x", 1), (20, "y", 2)]);
        let before = records.clone();
        multisort(&mut records, SortKeys::default(), &SortConfig::default()).unwrap();
        assert_eq!(records, before);
    }

    #[test]
    fn integer_keys_renumbered_text_keys_kept() {
        let mut records = Collection::from_entries([
            (Key::Int(7), Record::from([("v", 3)])),
            (Key::from("x"), Record::from([("v", 1)])),
            (Key::Int(2), Record::from([("v", 2)])),
        ]);
        multisort(&mut records, "v", &SortConfig::default()).unwrap();
        let keys: Vec<&Key> = records.keys().collect();
        assert_eq!(keys, vec![&Key::from("x"), &Key::Int(0), &Key::Int(1)]);
    }

    #[test]
    fn missing_values_sort_first() {
        let mut records = Collection::from_records([
            Record::from([("v", 1)]),
            Record::new(),
            Record::from([("v", -3)]),
        ]);
        multisort(&mut records, "v", &SortConfig::default()).unwrap();
        assert_eq!(
            field_order(&records, "v"),
            vec![Value::Null, Value::from(-3), Value::from(1)]
        );
    }
}
