//! Property-based test generators using proptest.
//!
//! Strategies stay small on purpose: property tests over composition
//! operations are quadratic in places, and shrinking works best on short
//! inputs.

use proptest::prelude::*;
use recordkit_value::{Collection, Key, Record, Value};

/// Strategy for text keys that never normalise to integers.
pub fn text_key_strategy() -> impl Strategy<Value = Key> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}")
        .expect("Invalid regex")
        .prop_map(Key::from)
}

/// Strategy for keys of either kind.
pub fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        (0i64..64).prop_map(Key::Int),
        text_key_strategy(),
    ]
}

/// Strategy for scalar values. Floats are finite so equality is reflexive.
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::Integer),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        prop::string::string_regex("[ -~]{0,12}")
            .expect("Invalid regex")
            .prop_map(Value::Text),
    ]
}

/// Strategy for values nested up to three levels deep.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((key_strategy(), inner), 0..4)
                .prop_map(|entries| Value::Record(entries.into_iter().collect())),
        ]
    })
}

/// Strategy for records with keys of either kind.
pub fn record_strategy(max_len: usize) -> impl Strategy<Value = Record> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..=max_len)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Strategy for records with text keys only.
pub fn text_record_strategy(max_len: usize) -> impl Strategy<Value = Record> {
    prop::collection::vec((text_key_strategy(), value_strategy()), 0..=max_len)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Strategy for flat rows `{id, group, n}` where `id` and `group` are drawn
/// from small ranges so duplicates are common.
pub fn row_strategy() -> impl Strategy<Value = Record> {
    (0i64..8, prop::option::of(0i64..4), -50i64..50).prop_map(|(id, group, n)| {
        let mut row = Record::new();
        row.insert("id", id);
        if let Some(group) = group {
            row.insert("group", group);
        }
        row.insert("n", n);
        row
    })
}

/// Strategy for collections of [`row_strategy`] rows keyed `0..n`.
pub fn rows_strategy(max_len: usize) -> impl Strategy<Value = Collection> {
    prop::collection::vec(row_strategy(), 0..=max_len).prop_map(Collection::from_records)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
