//! Small collection helpers built on the record model.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;
use recordkit_value::{Key, KeyedContainer, Record, Value};

use crate::compare::string_form;
use crate::error::{ComposeError, ComposeResult};

/// Removes `key` from `record` and returns its value, or `default` when the
/// key is absent.
pub fn remove(record: &mut Record, key: impl Into<Key>, default: impl Into<Value>) -> Value {
    record.remove(&key.into()).unwrap_or_else(|| default.into())
}

/// Wraps a value in a list unless it already is one.
///
/// Null becomes an empty list; lists and records are returned unchanged.
pub fn wrap(value: Value) -> Value {
    match value {
        Value::Null => Value::List(Vec::new()),
        Value::List(_) | Value::Record(_) => value,
        other => Value::List(vec![other]),
    }
}

/// Values of `a` missing from `b`, followed by values of `b` missing from
/// `a`. Values are compared by their string form.
pub fn diff_both(a: &Record, b: &Record) -> Vec<Value> {
    let forms_a: HashSet<String> = a.values().map(string_form).collect();
    let forms_b: HashSet<String> = b.values().map(string_form).collect();

    a.values()
        .filter(|v| !forms_b.contains(&string_form(v)))
        .chain(b.values().filter(|v| !forms_a.contains(&string_form(v))))
        .cloned()
        .collect()
}

/// Counts how often each scalar value occurs across `lists`.
///
/// The result is keyed by value in first-seen order. Lists, records and
/// entities cannot be counted and are skipped.
pub fn count_values<'a, I>(lists: I) -> Record
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts = Record::new();
    for value in lists.into_iter().flat_map(|list| list.values()) {
        let Some(key) = Key::from_value(value) else {
            continue;
        };
        let next = counts
            .get(&key)
            .and_then(Value::as_integer)
            .map_or(1, |n| n + 1);
        counts.insert(key, next);
    }
    counts
}

/// Encodes `record` as a URL query string.
///
/// Keys and values are percent-encoded per RFC 3986 (space as `%20`).
/// Nested lists and records use bracketed keys, so `{"a": {"b": 1}}`
/// encodes as `a%5Bb%5D=1`. Nulls are skipped, booleans encode as `1` and
/// `0`.
pub fn query_string(record: &Record) -> String {
    let mut pairs = Vec::new();
    for (key, value) in record {
        encode_pair(&key.to_string(), value, &mut pairs);
    }
    pairs.join("&")
}

fn encode_pair(name: &str, value: &Value, pairs: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push(format!("{}={}", encode_component(name), u8::from(*b))),
        Value::List(_) | Value::Record(_) | Value::Entity(_) => {
            for key in value.keys().unwrap_or_default() {
                if let Ok(child) = value.get(&key) {
                    encode_pair(&format!("{name}[{key}]"), &child, pairs);
                }
            }
        }
        scalar => pairs.push(format!(
            "{}={}",
            encode_component(name),
            encode_component(&string_form(scalar))
        )),
    }
}

/// Bytes left as is in query string components: RFC 3986 unreserved.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, UNRESERVED).to_string()
}

/// Picks `len` distinct entries of `record` uniformly at random.
///
/// The picked entries keep their keys and their relative order.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidArgument`] when `len` is zero or larger
/// than the record.
pub fn pick_random<R: Rng + ?Sized>(record: &Record, len: usize, rng: &mut R) -> ComposeResult<Record> {
    if len == 0 || len > record.len() {
        return Err(ComposeError::invalid_argument(format!(
            "cannot pick {len} entries from a record of {}",
            record.len()
        )));
    }

    let mut picked = rand::seq::index::sample(rng, record.len(), len).into_vec();
    picked.sort_unstable();
    let entries: Vec<&(Key, Value)> = record.iter().collect();
    Ok(picked
        .into_iter()
        .map(|i| entries[i].clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn remove_returns_value_or_default() {
        let mut record = Record::from([("a", 1), ("b", 2)]);
        assert_eq!(remove(&mut record, "a", Value::Null), Value::from(1));
        assert_eq!(remove(&mut record, "a", "gone"), Value::from("gone"));
        assert_eq!(record, Record::from([("b", 2)]));
    }

    #[test]
    fn wrap_values() {
        assert_eq!(wrap(Value::Null), Value::List(Vec::new()));
        assert_eq!(wrap(Value::from(3)), Value::from(vec![3]));
        assert_eq!(wrap(Value::from(vec![1, 2])), Value::from(vec![1, 2]));
    }

    #[test]
    fn symmetric_difference() {
        let a = Record::from_values([Value::from(1), Value::from("x"), Value::from(3)]);
        let b = Record::from_values([Value::from("1"), Value::from(4)]);
        assert_eq!(
            diff_both(&a, &b),
            vec![Value::from("x"), Value::from(3), Value::from(4)]
        );
    }

    #[test]
    fn counts_across_lists() {
        let a = Record::from_values(["x", "y", "x"]);
        let b = Record::from_values([Value::from("y"), Value::from(vec![1]), Value::from(2)]);
        let counts = count_values([&a, &b]);
        let expected = Record::from([
            (Key::from("x"), Value::from(2)),
            (Key::from("y"), Value::from(2)),
            (Key::Int(2), Value::from(1)),
        ]);
        assert_eq!(counts, expected);
    }

    #[test]
    fn query_string_nests_and_encodes() {
        let record = Record::from([
            ("name", Value::from("a b&c")),
            ("skip", Value::Null),
            ("on", Value::from(true)),
            ("tags", Value::from(vec!["x", "y"])),
            ("page", Value::Record(Record::from([("n", 2)]))),
        ]);
        assert_eq!(
            query_string(&record),
            "name=a%20b%26c&on=1&tags%5B0%5D=x&tags%5B1%5D=y&page%5Bn%5D=2"
        );
    }

    #[test]
    fn query_string_encodes_utf8_bytes() {
        let record = Record::from([("café", "crème brûlée"), ("q", "a+b=~c")]);
        assert_eq!(
            query_string(&record),
            "caf%C3%A9=cr%C3%A8me%20br%C3%BBl%C3%A9e&q=a%2Bb%3D~c"
        );
    }

    #[test]
    fn pick_random_keeps_keys_and_order() {
        let record = Record::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_random(&record, 2, &mut rng).unwrap();

        assert_eq!(picked.len(), 2);
        let positions: Vec<usize> = picked
            .keys()
            .map(|k| record.keys().position(|rk| rk == k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for (key, value) in &picked {
            assert_eq!(record.get(key), Some(value));
        }
    }

    #[test]
    fn pick_random_rejects_bad_lengths() {
        let record = Record::from([("a", 1)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pick_random(&record, 0, &mut rng),
            Err(ComposeError::InvalidArgument { .. })
        ));
        assert!(pick_random(&record, 2, &mut rng).is_err());
        assert_eq!(pick_random(&record, 1, &mut rng).unwrap(), record);
    }
}
