//! Recursive multi-way merge.

use recordkit_value::{Key, Record, Value};
use tracing::trace;

/// Merges records left to right into one.
///
/// Rules, applied for every entry of each later record:
///
/// - An integer key always appends the value at the next free integer
///   position of the accumulator. Integer-keyed data therefore concatenates
///   and never overwrites positionally. Once the accumulator holds
///   `i64::MAX` as a key, further integer-keyed values are dropped.
/// - A text key whose old and new values are both lists or records merges
///   them recursively under the same rules.
/// - Otherwise the new value replaces the old one, keeping its position.
///
/// An empty input yields an empty record.
///
/// ```
/// use recordkit_core::merge;
/// use recordkit_value::{Record, Value};
///
/// let a = Record::from_values([1, 2]);
/// let b = Record::from_values([3, 4]);
/// assert_eq!(merge([a, b]), Record::from_values([1, 2, 3, 4]));
/// ```
pub fn merge<I>(records: I) -> Record
where
    I: IntoIterator<Item = Record>,
{
    let mut records = records.into_iter();
    let Some(mut acc) = records.next() else {
        return Record::new();
    };
    for record in records {
        merge_into(&mut acc, record);
    }
    acc
}

/// Merges `other` into `acc` in place. See [`merge`].
pub fn merge_into(acc: &mut Record, other: Record) {
    for (key, value) in other {
        match key {
            Key::Int(_) => {
                if acc.push(value).is_none() {
                    trace!(key = %key, "no integer key left to append at");
                }
            }
            Key::Str(_) => {
                let merged = match acc.get_mut(&key) {
                    Some(existing) if existing.is_array_like() && value.is_array_like() => {
                        let old = std::mem::replace(existing, Value::Null);
                        merge_values(old, value)
                    }
                    _ => value,
                };
                acc.insert(key, merged);
            }
        }
    }
}

fn merge_values(old: Value, new: Value) -> Value {
    match (old, new) {
        (Value::List(mut left), Value::List(right)) => {
            left.extend(right);
            Value::List(left)
        }
        (old, new) => {
            let mut left = old.into_record().unwrap_or_default();
            merge_into(&mut left, new.into_record().unwrap_or_default());
            Value::Record(left)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_record_is_identity() {
        let a = Record::from([("a", Value::from(1)), ("b", Value::from(vec![1, 2]))]);
        assert_eq!(merge([a.clone()]), a);
        assert_eq!(merge(Vec::<Record>::new()), Record::new());
    }

    #[test]
    fn integer_keys_append() {
        let merged = merge([Record::from_values([1, 2]), Record::from_values([3, 4])]);
        assert_eq!(merged, Record::from_values([1, 2, 3, 4]));
    }

    #[test]
    fn integer_keys_never_overwrite_sparse_slots() {
        let a = Record::from([(5, "five")]);
        let b = Record::from([(5, "again"), (0, "zero")]);
        let merged = merge([a, b]);
        let keys: Vec<&Key> = merged.keys().collect();
        assert_eq!(keys, vec![&Key::Int(5), &Key::Int(6), &Key::Int(7)]);
        assert_eq!(merged.get(&Key::Int(7)), Some(&Value::from("zero")));
    }

    #[test]
    fn integer_append_never_duplicates_the_largest_key() {
        let a = Record::from([(Key::Int(i64::MAX), Value::from("max"))]);
        let b = Record::from_values(["dropped"]);
        let merged = merge([a.clone(), b]);
        assert_eq!(merged, a);
    }

    #[test]
    fn nested_records_merge_recursively() {
        let a = Record::from([
            ("a", Value::from(1)),
            ("b", Value::Record(Record::from([("c", 2)]))),
        ]);
        let b = Record::from([
            ("b", Value::Record(Record::from([("d", 3)]))),
            ("e", Value::from(4)),
        ]);
        let expected = Record::from([
            ("a", Value::from(1)),
            ("b", Value::Record(Record::from([("c", 2), ("d", 3)]))),
            ("e", Value::from(4)),
        ]);
        assert_eq!(merge([a, b]), expected);
    }

    #[test]
    fn nested_lists_concatenate() {
        let a = Record::from([("tags", vec!["x"])]);
        let b = Record::from([("tags", vec!["y"])]);
        assert_eq!(merge([a, b]).field("tags"), Some(&Value::from(vec!["x", "y"])));
    }

    #[test]
    fn later_scalar_wins_in_place() {
        let a = Record::from([("a", Value::from(1)), ("b", Value::from(2))]);
        let b = Record::from([("a", Value::from("new"))]);
        let c = Record::from([("b", Value::Record(Record::new()))]);
        let merged = merge([a, b, c]);
        let keys: Vec<&Key> = merged.keys().collect();
        assert_eq!(keys, vec![&Key::from("a"), &Key::from("b")]);
        assert_eq!(merged.field("a"), Some(&Value::from("new")));
        assert_eq!(merged.field("b"), Some(&Value::Record(Record::new())));
    }

    #[test]
    fn list_into_record_mixes() {
        let a = Record::from([("m", vec!["first"])]);
        let b = Record::from([("m", Record::from([("k", "v")]))]);
        let expected = Record::from([(Key::Int(0), Value::from("first")), (Key::from("k"), Value::from("v"))]);
        assert_eq!(merge([a, b]).field("m"), Some(&Value::Record(expected)));
    }
}
