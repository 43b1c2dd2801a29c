//! Benchmarks for the analytics folds and list filters
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use payclone::export::to_csv_string;
use payclone::filter::{TimeRange, TransactionFilter, TypeFilter};
use payclone::{AnalyticsReport, Placeholder, Transaction, TransactionSummary};

fn history(count: usize) -> Vec<Transaction> {
    Placeholder::new(7, Utc::now()).transactions(1, count)
}

fn bench_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics");
    let now = Utc::now();

    for size in [100, 1000, 10000] {
        let transactions = history(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("summary_{}", size), |b| {
            b.iter(|| TransactionSummary::compute(black_box(&transactions), 1))
        });

        group.bench_function(format!("report_{}", size), |b| {
            b.iter(|| AnalyticsReport::build(black_box(&transactions), 1, now, 7))
        });
    }

    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let now = Utc::now();
    let transactions = history(10000);
    group.throughput(Throughput::Elements(transactions.len() as u64));

    group.bench_function("range_month", |b| {
        b.iter(|| TimeRange::Month.apply(black_box(&transactions), now))
    });

    let filter = TransactionFilter::default()
        .search("dinner")
        .kind(TypeFilter::Sent);
    group.bench_function("search_sent", |b| {
        b.iter(|| filter.apply(black_box(&transactions), 1))
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let transactions = history(1000);

    c.bench_function("csv_export_1000", |b| {
        b.iter(|| to_csv_string(black_box(&transactions), 1).unwrap())
    });
}

criterion_group!(benches, bench_analytics, bench_filters, bench_export);
criterion_main!(benches);
