//! Benchmarks for data processing operations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use envdash_rs::analysis::ChannelStatistics;
use envdash_rs::{decode_payload, Channel, DisplayMode, Reading, SampleStore, TimeWindowFilter};

/// Store filled with one reading per second for `seconds`
fn filled_store(seconds: usize) -> SampleStore {
    let mut store = SampleStore::default();
    for i in 0..seconds {
        let t = i as f64;
        store.append_reading(t, &Reading::new(20.0 + (t * 0.01).sin(), 1000.0, 400.0, 50.0));
    }
    store
}

fn bench_store_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_append");
    group.throughput(Throughput::Elements(1));

    for seconds in [100, 1_000, 3_600].iter() {
        group.bench_with_input(
            BenchmarkId::new("append_reading", seconds),
            seconds,
            |b, &seconds| {
                let mut store = filled_store(seconds);
                let mut t = seconds as f64;
                let reading = Reading::new(21.0, 1000.0, 400.0, 50.0);
                b.iter(|| {
                    t += 1.0;
                    store.append_reading(black_box(t), black_box(&reading));
                });
            },
        );
    }

    group.finish();
}

fn bench_window_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_projection");
    let filter = TimeWindowFilter::default();

    for seconds in [100, 1_000, 3_600].iter() {
        let store = filled_store(*seconds);
        let elapsed = *seconds as f64;
        group.throughput(Throughput::Elements(*seconds as u64));

        for mode in [DisplayMode::ShortRange, DisplayMode::LongRange] {
            group.bench_with_input(
                BenchmarkId::new(mode.label(), seconds),
                &store,
                |b, store| {
                    b.iter(|| {
                        store.windowed(
                            black_box(Channel::Temperature),
                            &filter,
                            mode,
                            black_box(elapsed),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for seconds in [100, 3_600].iter() {
        let store = filled_store(*seconds);
        group.throughput(Throughput::Elements(*seconds as u64));
        group.bench_with_input(BenchmarkId::new("summarize", seconds), &store, |b, store| {
            b.iter(|| ChannelStatistics::summarize(black_box(store.history(Channel::Temperature))));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("four_fields", |b| {
        b.iter(|| decode_payload(black_box("22.5,2048,350,65.2")))
    });

    group.bench_function("legacy_three_fields", |b| {
        b.iter(|| decode_payload(black_box("22.5,2048,350")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_store_append,
    bench_window_projection,
    bench_statistics,
    bench_decode,
);

criterion_main!(benches);
