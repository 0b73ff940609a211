//! Benchmarks for the lease schedule pipeline.
//!
//! Run with: cargo bench -p ifrs16-engine

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ifrs16_config::ScheduleConfig;
use ifrs16_core::{ContractInputs, Date};
use ifrs16_engine::amortization::amortize;
use ifrs16_engine::calculate;
use ifrs16_engine::classifier::classify;
use ifrs16_engine::journal::monthly_journal;
use ifrs16_engine::projector::project;

fn contract(term: u32) -> ContractInputs {
    ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), term)
        .with_annual_rate(12.0)
        .with_grace_months(3)
        .with_readjustment(4.5, 7)
        .with_initial_installment(15_000.0)
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");
    for term in [12u32, 60, 240, 600] {
        let inputs = contract(term);
        group.throughput(Throughput::Elements(u64::from(term)));
        group.bench_with_input(BenchmarkId::from_parameter(term), &inputs, |b, inputs| {
            b.iter(|| calculate(black_box(inputs)));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let config = ScheduleConfig::default();
    for term in [60u32, 600] {
        let inputs = contract(term);
        let projection = project(&inputs).unwrap();
        let entries = amortize(&projection, inputs.start_date, &config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(term), &entries, |b, entries| {
            b.iter(|| classify(black_box(entries), term, 12));
        });
    }
    group.finish();
}

fn bench_journal(c: &mut Criterion) {
    let result = calculate(&contract(240)).unwrap();
    c.bench_function("monthly_journal_240", |b| {
        b.iter(|| monthly_journal(black_box(&result)));
    });
}

criterion_group!(benches, bench_calculate, bench_classify, bench_journal);
criterion_main!(benches);
