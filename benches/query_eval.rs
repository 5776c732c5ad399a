//! Path parsing and evaluation benchmarks
//!
//! Measures parse cost for paths of growing complexity and the cost of
//! filtering lists of varying length.
//!
//! Run benchmarks: `cargo bench --bench query_eval`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ctxpath::{LogNotifier, QueryOptions, Value};
use ctxpath_query::{parse_path, query};
use serde_json::json;
use std::hint::black_box;
use tokio::runtime::Runtime;

/// Generate a context with `count` characters
fn generate_context(count: usize) -> Value {
    let characters: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Character {}", i),
                "avatar": format!("avatar_{}.png", i),
                "fav": i % 3 == 0,
                "age": 18 + (i % 60)
            })
        })
        .collect();
    Value::from(json!({ "characters": characters }))
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let paths = [
        ("plain", "characters::5::avatar"),
        ("filter", "characters(find name eq Character 7)::avatar"),
        ("filter_map", "characters(filter fav eq true)(map name)"),
    ];
    for (name, path) in paths {
        group.bench_with_input(BenchmarkId::new("path", name), &path, |b, path| {
            b.iter(|| parse_path(black_box(path)).expect("Failed to parse path"));
        });
    }
    group.finish();
}

fn benchmark_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let options = QueryOptions::new();

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let context = generate_context(count);

        group.bench_with_input(BenchmarkId::new("characters", count), &count, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    query(
                        &context,
                        "characters(filter age gte 40)(map name)",
                        &options,
                        &LogNotifier,
                    )
                    .await
                    .expect("Failed to evaluate path")
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_filter);
criterion_main!(benches);
