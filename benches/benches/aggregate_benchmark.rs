//! Aggregation benchmarks.
//!
//! Run with: `cargo bench --package candlewick-bench`

use candlewick_bench::{TickProfile, render_ticks, synthetic_ticks, tick_file};
use candlewick_lib::{Pipeline, PipelineConfig, WindowAggregator, WindowSpan, parse_line};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn parse_benchmark(c: &mut Criterion) {
    let profile = TickProfile {
        ticks: 10_000,
        ..TickProfile::default()
    };
    let input = render_ticks(&synthetic_ticks(profile));

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(profile.ticks as u64));
    group.bench_function("parse_line", |b| {
        b.iter(|| {
            for line in input.lines() {
                black_box(parse_line(line).unwrap());
            }
        });
    });
    group.finish();
}

fn aggregate_benchmark(c: &mut Criterion) {
    let profile = TickProfile::default();
    let ticks = synthetic_ticks(profile);

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(ticks.len() as u64));

    for &span in WindowSpan::defaults() {
        group.bench_with_input(BenchmarkId::from_parameter(span), &span, |b, &span| {
            b.iter(|| {
                let mut aggregator = WindowAggregator::new(span);
                let mut candles = 0;
                for tick in &ticks {
                    candles += aggregator.process(tick).len();
                }
                candles += aggregator.finish().len();
                black_box(candles)
            });
        });
    }
    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let profile = TickProfile::default();
    let file = tick_file(profile).unwrap();
    let pipeline = Pipeline::new(PipelineConfig {
        output_dir: file.dir.path().to_path_buf(),
        timeout: Duration::from_secs(600),
        ..PipelineConfig::default()
    })
    .unwrap();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.throughput(Throughput::Elements(profile.ticks as u64));
    group.bench_function("run_files", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(pipeline.run_files(&file.path).await.unwrap()) });
    });
    group.finish();
}

criterion_group!(benches, parse_benchmark, aggregate_benchmark, pipeline_benchmark);
criterion_main!(benches);
