//! Multi-column sort benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recordkit_bench::generate_users;
use recordkit_core::{multisort, SortConfig, SortFlag, SortOrder};

/// Benchmark sorting by one and by two columns.
fn bench_multisort(c: &mut Criterion) {
    let mut group = c.benchmark_group("multisort");
    let by_age = SortConfig::default();
    let by_city_then_age = SortConfig::new()
        .directions(vec![SortOrder::Ascending, SortOrder::Descending])
        .flags(vec![SortFlag::CaseInsensitive, SortFlag::Numeric]);

    for count in [100usize, 1_000, 10_000] {
        let users = generate_users(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("one_column", count), &users, |b, users| {
            b.iter(|| {
                let mut records = users.clone();
                multisort(&mut records, "age", &by_age).unwrap();
                black_box(records);
            });
        });
        group.bench_with_input(BenchmarkId::new("two_columns", count), &users, |b, users| {
            b.iter(|| {
                let mut records = users.clone();
                multisort(&mut records, vec!["city", "age"], &by_city_then_age).unwrap();
                black_box(records);
            });
        });
    }

    group.finish();
}

/// Benchmark natural ordering on text keys.
fn bench_natural(c: &mut Criterion) {
    let users = generate_users(1_000);
    let config = SortConfig::new().flags(SortFlag::Natural);

    c.bench_function("multisort/natural_1000", |b| {
        b.iter(|| {
            let mut records = users.clone();
            multisort(&mut records, "name", &config).unwrap();
            black_box(records);
        });
    });
}

criterion_group!(benches, bench_multisort, bench_natural);
criterion_main!(benches);
