//! Merge engine performance benchmarks.
//!
//! Measures the append and join paths across table sizes, including the
//! cross-product expansion worst case for joins.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use melange::transform::merge;
use melange::{MergeStrategy, Table};

/// Generate a table of `rows` rows with the given headers. Key cells
/// cycle through `key_space` distinct values.
fn generate_table(name: &str, headers: &[&str], rows: usize, key_space: usize) -> Table {
    let data = (0..rows)
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(col, _)| {
                    if col == 0 {
                        format!("key_{}", row % key_space)
                    } else {
                        format!("v{row}_{col}")
                    }
                })
                .collect()
        })
        .collect();

    Table::new(
        name,
        headers.iter().map(|h| h.to_string()).collect(),
        data,
    )
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for rows in [100, 1_000, 10_000] {
        let a = generate_table("a", &["id", "name", "city", "age"], rows, rows);
        // Shuffled header order forces the by-name alignment path.
        let b = generate_table("b", &["age", "id", "email", "name"], rows, rows);

        group.throughput(Throughput::Elements(rows as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |bench, _| {
            bench.iter(|| {
                merge(
                    black_box(&[a.clone(), b.clone()]),
                    MergeStrategy::Append,
                    None,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    // One-to-one: every left key matches exactly one right row.
    for rows in [100, 1_000] {
        let left = generate_table("left", &["id", "name"], rows, rows);
        let right = generate_table("right", &["id", "score"], rows, rows);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(
            BenchmarkId::new("one_to_one", rows),
            &rows,
            |bench, _| {
                bench.iter(|| {
                    merge(
                        black_box(&[left.clone(), right.clone()]),
                        MergeStrategy::Join,
                        Some("id"),
                    )
                    .unwrap()
                });
            },
        );
    }

    // Fan-out: 10 right rows per left key, so output is 10x the left side.
    let left = generate_table("left", &["id", "name"], 1_000, 1_000);
    let right = generate_table("right", &["id", "score"], 10_000, 1_000);

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("fan_out_10x", |bench| {
        bench.iter(|| {
            merge(
                black_box(&[left.clone(), right.clone()]),
                MergeStrategy::Join,
                Some("id"),
            )
            .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_append, bench_join);
criterion_main!(benches);
