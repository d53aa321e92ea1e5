use chart_embed::api::validate_input;
use chart_embed::core::{Row, rows_to_csv, rows_to_input};
use chart_embed::observe::ChartStores;
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

fn generated_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let mut row = Row::new();
            row.insert("index".to_owned(), json!(i));
            row.insert("date".to_owned(), json!(format!("2000-01-{:02}", i % 28 + 1)));
            row.insert("apples".to_owned(), json!(i as f64 * 0.5));
            row.insert("oranges".to_owned(), json!(i * 3));
            row.insert("pears".to_owned(), if i % 7 == 0 { json!(null) } else { json!(i) });
            row
        })
        .collect()
}

fn bench_rows_to_csv_10k(c: &mut Criterion) {
    let rows = generated_rows(10_000);

    c.bench_function("rows_to_csv_10k", |b| {
        b.iter(|| {
            let _ = rows_to_csv(black_box(&rows));
        })
    });
}

fn bench_validate_input_10k(c: &mut Criterion) {
    let input = rows_to_input(&generated_rows(10_000));

    c.bench_function("validate_input_10k", |b| {
        b.iter(|| {
            let errors = validate_input(black_box(&input));
            assert!(errors.is_empty());
        })
    });
}

fn bench_store_snapshot(c: &mut Criterion) {
    let stores = ChartStores::new();
    stores
        .properties
        .update(|props| props.input = rows_to_input(&generated_rows(2_000)));

    c.bench_function("store_snapshot_2k_rows", |b| {
        b.iter(|| {
            let _ = black_box(&stores).snapshot();
        })
    });
}

criterion_group!(
    benches,
    bench_rows_to_csv_10k,
    bench_validate_input_10k,
    bench_store_snapshot
);
criterion_main!(benches);
