//! Benchmarks for tail-path search over a synthetic document.
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

use srch::query::{Query, ValueMode};

/// Build a list of `n` records, each nesting a few levels deep.
fn create_records(n: usize) -> Value {
    let records: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("record-{i}"),
                "meta": {
                    "active": i % 3 == 0,
                    "scores": [i % 7, i % 11, i % 13],
                    "owner": {"name": format!("owner-{}", i % 17)}
                }
            })
        })
        .collect();
    json!({ "records": records })
}

fn bench_search(c: &mut Criterion) {
    let json = create_records(10_000);

    let regex = Query::new("owner.name", ".", "-1[0-6]$", ValueMode::Regex)
        .expect("valid query");
    c.bench_function("regex tail match", |b| {
        b.iter(|| regex.search(black_box(&json), None).count());
    });

    let numeric = Query::new("scores.2", ".", ">=5<10", ValueMode::Numeric)
        .expect("valid query");
    c.bench_function("numeric index match", |b| {
        b.iter(|| numeric.search(black_box(&json), None).count());
    });

    let first = Query::new("active", ".", "true", ValueMode::Regex)
        .expect("valid query");
    c.bench_function("first match only", |b| {
        b.iter(|| first.search(black_box(&json), None).next());
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
