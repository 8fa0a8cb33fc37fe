//! Aggregation benchmarks for telemetry projection and lap-time merging.
//!
//! Run with: `cargo bench --package pitwall-bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pitwall_aggregate::{MergedLapTable, TelemetryAssembler, attach_locations, project, rank_matches};
use pitwall_bench::{car_data, laps, locations, samples_per_lap};
use pitwall_types::Metric;

fn projection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for laps_worth in [1, 10] {
        let count = samples_per_lap() * laps_worth;
        let samples = TelemetryAssembler::assemble(car_data(count));
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("assemble", laps_worth), &count, |b, &count| {
            b.iter_batched(
                || car_data(count),
                TelemetryAssembler::assemble,
                criterion::BatchSize::LargeInput,
            );
        });

        for metric in [Metric::Speed, Metric::Drs] {
            group.bench_with_input(
                BenchmarkId::new(metric.as_str(), laps_worth),
                &samples,
                |b, samples| b.iter(|| project(black_box(samples), metric)),
            );
        }

        group.bench_with_input(BenchmarkId::new("gear", laps_worth), &count, |b, &count| {
            b.iter_batched(
                || (TelemetryAssembler::assemble(car_data(count)), locations(count)),
                |(mut samples, fixes)| {
                    attach_locations(&mut samples, fixes);
                    project(&samples, Metric::Gear)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn merge_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for drivers in [2u32, 20] {
        let fetched: Vec<(String, _)> = (1..=drivers)
            .map(|driver| (driver.to_string(), laps(driver, 57)))
            .collect();
        group.throughput(Throughput::Elements(u64::from(drivers) * 57));

        group.bench_with_input(BenchmarkId::new("insert_laps", drivers), &fetched, |b, fetched| {
            b.iter(|| {
                let mut table = MergedLapTable::new();
                for (driver, laps) in fetched {
                    table.insert_laps(driver, laps);
                }
                table
            });
        });
    }

    group.finish();
}

fn matching_benchmark(c: &mut Criterion) {
    let names: Vec<String> = (0..24).map(|i| format!("Grand Prix Round {i}")).collect();

    c.bench_function("rank_matches/calendar", |b| {
        b.iter_batched(
            || names.clone(),
            |names| rank_matches(names, black_box("round 1"), String::as_str),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, projection_benchmark, merge_benchmark, matching_benchmark);
criterion_main!(benches);
