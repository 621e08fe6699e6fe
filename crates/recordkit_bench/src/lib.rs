//! Benchmark data generators.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recordkit_value::{Collection, Record, Value};

/// Seeded generator so runs are comparable.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

/// Generate `count` user rows with ids `0..count`.
pub fn generate_users(count: usize) -> Collection {
    let mut rng = rng();
    (0..count)
        .map(|i| {
            let mut row = Record::new();
            row.insert("id", i64::try_from(i).unwrap_or(i64::MAX));
            row.insert("name", format!("user_{i}"));
            row.insert("age", rng.gen_range(18i64..90));
            row.insert("city", CITIES[rng.gen_range(0..CITIES.len())]);
            row
        })
        .collect()
}

/// Generate `count` order rows pointing at users in `0..users`.
pub fn generate_orders(count: usize, users: usize) -> Collection {
    let mut rng = rng();
    let users = i64::try_from(users.max(1)).unwrap_or(i64::MAX);
    (0..count)
        .map(|i| {
            let mut row = Record::new();
            row.insert("order", i64::try_from(i).unwrap_or(i64::MAX));
            row.insert("user_id", rng.gen_range(0..users));
            row.insert("total", Value::Float(rng.gen_range(1.0..500.0)));
            row
        })
        .collect()
}

/// Generate a nested record `depth` levels deep with `width` text keys and
/// `width` list entries per level.
pub fn nested_record(depth: usize, width: usize) -> Record {
    let mut record = Record::new();
    for i in 0..width {
        if depth == 0 {
            record.insert(format!("key_{i}"), "leaf");
        } else {
            record.insert(format!("key_{i}"), nested_record(depth - 1, width));
        }
        record.push(i64::try_from(i).unwrap_or(i64::MAX));
    }
    record
}

const CITIES: [&str; 6] = ["Oslo", "Lima", "Accra", "Hanoi", "Quito", "Porto"];
