use chunk_buffer::{ChunkBuffer, FlattenConfig, WorkerPool};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

// Modify time limit here
const BENCHMARK_TIME_LIMIT: std::time::Duration =
    std::time::Duration::from_secs(10);

fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Cuts `data` into about 100 fragments of random length.
fn fragment(data: &[u8]) -> Vec<&[u8]> {
    let mut rng = rand::thread_rng();
    let mut fragments = Vec::new();
    let mut start = 0;
    while start < data.len() {
        let end = (start + rng.gen_range(1..=data.len() / 100 + 1))
            .min(data.len());
        fragments.push(&data[start..end]);
        start = end;
    }
    fragments
}

/// Compares accumulating fragments in a [`ChunkBuffer`] and flattening it
/// against copying them into a growable `Vec<u8>`.
fn bench_accumulate_and_flatten(c: &mut Criterion) {
    let pool = WorkerPool::new(&FlattenConfig::default())
        .expect("Failed to build worker pool");
    let inputs = [
        ("small", 1_000),
        ("medium", 1_000_000),
        ("large", 10_000_000),
    ];

    for (name, size) in inputs.iter() {
        let data = generate_random_data(*size);
        let fragments = fragment(&data);

        let mut group = c.benchmark_group(format!("accumulate:{}", name));
        group.measurement_time(BENCHMARK_TIME_LIMIT);

        group.bench_function("chunk_buffer_sequential", |b| {
            b.iter(|| {
                let buffer: ChunkBuffer<&[u8]> =
                    fragments.iter().copied().collect();
                black_box(buffer.flatten())
            });
        });

        group.bench_function("chunk_buffer_parallel", |b| {
            b.iter(|| {
                let buffer: ChunkBuffer<&[u8]> =
                    fragments.iter().copied().collect();
                black_box(buffer.flatten_parallel(&pool))
            });
        });

        group.bench_function("vec", |b| {
            b.iter(|| {
                let mut buffer = Vec::new();
                for fragment in &fragments {
                    buffer.extend_from_slice(fragment);
                }
                black_box(buffer)
            });
        });

        group.finish();
    }
}

/// Measures reading a window from the middle of a fragmented buffer.
fn bench_range_read(c: &mut Criterion) {
    let data = generate_random_data(1_000_000);
    let fragments = fragment(&data);
    let buffer: ChunkBuffer<&[u8]> = fragments.into_iter().collect();

    let mut group = c.benchmark_group("range_read");
    group.measurement_time(BENCHMARK_TIME_LIMIT);
    for window in [16, 4096, 262_144] {
        let start = 500_000 - window / 2;
        let end = start + window;
        group.bench_function(format!("window:{}", window), |b| {
            b.iter(|| {
                buffer
                    .range_read(black_box(start), black_box(end))
                    .expect("range_read returned an error")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_accumulate_and_flatten, bench_range_read);
criterion_main!(benches);
