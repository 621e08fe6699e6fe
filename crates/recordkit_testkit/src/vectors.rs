//! Named input/expected vectors for the composition operations.
//!
//! Each vector carries its arguments as a JSON object so the same table can
//! be dumped to a file and replayed by other implementations.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A test vector for one operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Named arguments.
    pub input: serde_json::Value,
    /// Expected result.
    pub expected: serde_json::Value,
}

impl TestVector {
    fn new(
        id: &str,
        description: &str,
        input: serde_json::Value,
        expected: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            input,
            expected,
        }
    }

    /// Returns the named argument, or JSON null if absent.
    pub fn arg(&self, name: &str) -> &serde_json::Value {
        self.input.get(name).unwrap_or(&serde_json::Value::Null)
    }
}

/// Path resolution vectors: `container`, `path`, `default`.
pub fn path_vectors() -> Vec<TestVector> {
    vec![
        TestVector::new(
            "path_nested",
            "dotted path through nested records",
            json!({"container": {"a": {"b": {"c": 9}}}, "path": "a.b.c", "default": null}),
            json!(9),
        ),
        TestVector::new(
            "path_missing",
            "missing path yields the default",
            json!({"container": {}, "path": "x.y", "default": "default"}),
            json!("default"),
        ),
        TestVector::new(
            "path_direct_key_with_dot",
            "a key containing a dot is found directly before splitting",
            json!({"container": {"a.b": 1, "a": {"b": 2}}, "path": "a.b", "default": null}),
            json!(1),
        ),
        TestVector::new(
            "path_list_index",
            "numeric suffix addresses list positions",
            json!({"container": {"items": ["x", "y"]}, "path": "items.1", "default": null}),
            json!("y"),
        ),
        TestVector::new(
            "path_present_null",
            "a present null wins over the default",
            json!({"container": {"a": null}, "path": "a", "default": 5}),
            json!(null),
        ),
    ]
}

/// Merge vectors: `records`.
pub fn merge_vectors() -> Vec<TestVector> {
    vec![
        TestVector::new(
            "merge_identity",
            "a single record merges to itself",
            json!({"records": [{"a": 1, "b": [1, 2]}]}),
            json!({"a": 1, "b": [1, 2]}),
        ),
        TestVector::new(
            "merge_disjoint",
            "disjoint text keys form the union",
            json!({"records": [{"a": 1}, {"b": 2}]}),
            json!({"a": 1, "b": 2}),
        ),
        TestVector::new(
            "merge_integer_append",
            "integer keys concatenate",
            json!({"records": [[1, 2], [3, 4]]}),
            json!({"0": 1, "1": 2, "2": 3, "3": 4}),
        ),
        TestVector::new(
            "merge_nested",
            "nested records merge recursively",
            json!({"records": [{"a": 1, "b": {"c": 2}}, {"b": {"d": 3}, "e": 4}]}),
            json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4}),
        ),
        TestVector::new(
            "merge_later_wins",
            "later scalars replace earlier ones",
            json!({"records": [{"a": 1}, {"a": 2}, {"a": 3}]}),
            json!({"a": 3}),
        ),
    ]
}

/// Index vectors: `records`, `key`.
pub fn index_vectors() -> Vec<TestVector> {
    vec![
        TestVector::new(
            "index_last_write_wins",
            "a later duplicate replaces the earlier record",
            json!({
                "records": [{"id": 1, "x": "a"}, {"id": 2, "x": "b"}, {"id": 1, "x": "c"}],
                "key": "id"
            }),
            json!({"1": {"id": 1, "x": "c"}, "2": {"id": 2, "x": "b"}}),
        ),
        TestVector::new(
            "index_skips_missing",
            "records without the key field are dropped",
            json!({"records": [{"x": "a"}, {"id": "k", "x": "b"}], "key": "id"}),
            json!({"k": {"id": "k", "x": "b"}}),
        ),
    ]
}

/// Relation vectors: `primary`, `foreign`, `pk`, `fk`.
pub fn relation_vectors() -> Vec<TestVector> {
    vec![
        TestVector::new(
            "relation_set_basic",
            "matched records get the foreign record, others an empty one",
            json!({
                "primary": [{"id": 1}, {"id": 2}],
                "foreign": [{"uid": 1, "name": "A"}],
                "pk": "id",
                "fk": "uid"
            }),
            json!({
                "0": {"id": 1, "relation": {"uid": 1, "name": "A"}},
                "1": {"id": 2, "relation": {}}
            }),
        ),
        TestVector::new(
            "relation_set_missing_pk",
            "a primary record without the key still gets the field",
            json!({
                "primary": [{"name": "x"}],
                "foreign": [{"uid": 1}],
                "pk": "id",
                "fk": "uid"
            }),
            json!({"0": {"name": "x", "relation": {}}}),
        ),
    ]
}

/// Sort vectors: `records`, `keys`, optional `descending`. The expected
/// value is the order of the `n` field after sorting.
pub fn sort_vectors() -> Vec<TestVector> {
    vec![
        TestVector::new(
            "sort_stable_ties",
            "equal keys keep their input order",
            json!({
                "records": [{"age": 30, "n": 1}, {"age": 20, "n": 2}, {"age": 30, "n": 3}],
                "keys": ["age"]
            }),
            json!([2, 1, 3]),
        ),
        TestVector::new(
            "sort_two_columns",
            "second column breaks ties of the first",
            json!({
                "records": [
                    {"a": 1, "b": "y", "n": 1},
                    {"a": 0, "b": "z", "n": 2},
                    {"a": 1, "b": "x", "n": 3}
                ],
                "keys": ["a", "b"]
            }),
            json!([2, 3, 1]),
        ),
        TestVector::new(
            "sort_descending_stable",
            "descending order still breaks ties by input position",
            json!({
                "records": [{"v": 1, "n": 1}, {"v": 2, "n": 2}, {"v": 1, "n": 3}],
                "keys": ["v"],
                "descending": true
            }),
            json!([2, 1, 3]),
        ),
        TestVector::new(
            "sort_numeric_strings",
            "numeric strings compare by value in regular mode",
            json!({
                "records": [{"v": "10", "n": 1}, {"v": "9", "n": 2}, {"v": "100", "n": 3}],
                "keys": ["v"]
            }),
            json!([2, 1, 3]),
        ),
    ]
}

/// All vectors, for dumping to disk.
pub fn all_vectors() -> Vec<TestVector> {
    let mut vectors = path_vectors();
    vectors.extend(merge_vectors());
    vectors.extend(index_vectors());
    vectors.extend(relation_vectors());
    vectors.extend(sort_vectors());
    vectors
}
