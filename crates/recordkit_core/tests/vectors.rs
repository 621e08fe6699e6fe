//! Replays the shared test vectors against the composition operations.

use recordkit_core::{
    get_value, index, merge, multisort, relation_set, JoinConfig, SortConfig, SortKeys, SortOrder,
};
use recordkit_testkit::{
    collection, collection_to_json, index_vectors, init_tracing, merge_vectors, path_vectors,
    record, relation_vectors, sort_vectors, to_json, value,
};
use recordkit_value::{Record, Value};

fn text_arg<'a>(arg: &'a serde_json::Value, id: &str) -> &'a str {
    arg.as_str()
        .unwrap_or_else(|| panic!("{id}: expected a string argument"))
}

#[test]
fn path_vectors_pass() {
    init_tracing();
    for v in path_vectors() {
        let container = record(v.arg("container").clone());
        let got = get_value(
            &container,
            text_arg(v.arg("path"), &v.id),
            value(v.arg("default").clone()),
        )
        .unwrap();
        assert_eq!(got, value(v.expected.clone()), "{}", v.id);
    }
}

#[test]
fn merge_vectors_pass() {
    for v in merge_vectors() {
        let records: Vec<Record> = v
            .arg("records")
            .as_array()
            .unwrap()
            .iter()
            .map(|r| record(r.clone()))
            .collect();
        assert_eq!(to_json(&merge(records)), v.expected, "{}", v.id);
    }
}

#[test]
fn index_vectors_pass() {
    for v in index_vectors() {
        let records = collection(v.arg("records").clone());
        let idx = index(&records, text_arg(v.arg("key"), &v.id));
        assert_eq!(to_json(&idx.into_record()), v.expected, "{}", v.id);
    }
}

#[test]
fn relation_vectors_pass() {
    for v in relation_vectors() {
        let joined = relation_set(
            &collection(v.arg("primary").clone()),
            &collection(v.arg("foreign").clone()),
            text_arg(v.arg("pk"), &v.id),
            text_arg(v.arg("fk"), &v.id),
            &JoinConfig::default(),
        );
        assert_eq!(collection_to_json(&joined), v.expected, "{}", v.id);
    }
}

#[test]
fn sort_vectors_pass() {
    init_tracing();
    for v in sort_vectors() {
        let mut records = collection(v.arg("records").clone());
        let keys: Vec<&str> = v
            .arg("keys")
            .as_array()
            .unwrap()
            .iter()
            .map(|k| text_arg(k, &v.id))
            .collect();
        let order = if v.arg("descending").as_bool().unwrap_or(false) {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };

        multisort(&mut records, SortKeys::from(keys), &SortConfig::new().directions(order)).unwrap();
        let got: Vec<Value> = records
            .records()
            .map(|r| r.field("n").cloned().unwrap_or(Value::Null))
            .collect();
        assert_eq!(Value::List(got), value(v.expected.clone()), "{}", v.id);
    }
}
