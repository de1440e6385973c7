use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use radix_engine::config::presets;
use radix_engine::{EngineConfig, RadixSort};

const BENCH_SIZES: [usize; 3] = [16384, 262144, 1048576];
const WORD_COUNT: usize = 65536;

fn integers(len: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..len).map(|_| rng.gen_range(-1_000_000_000..1_000_000_000)).collect()
}

fn words(len: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..len)
        .map(|_| {
            let width = rng.gen_range(1..12);
            (0..width).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

fn bench_numeric(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric");
    group.sample_size(10);

    let parallel = RadixSort::new(EngineConfig::default());
    let sequential = RadixSort::new(presets::sequential());

    for &len in &BENCH_SIZES {
        let data = integers(len);
        group.bench_with_input(BenchmarkId::new("parallel", len), &data, |b, data| {
            b.iter_batched(|| data.clone(), |v| black_box(parallel.sort_numeric(v)), BatchSize::LargeInput)
        });
        group.bench_with_input(BenchmarkId::new("sequential", len), &data, |b, data| {
            b.iter_batched(|| data.clone(), |v| black_box(sequential.sort_numeric(v)), BatchSize::LargeInput)
        });
        group.bench_with_input(BenchmarkId::new("slice_sort", len), &data, |b, data| {
            b.iter_batched(
                || data.clone(),
                |mut v| {
                    v.sort_unstable();
                    black_box(v)
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");
    group.sample_size(10);

    let data = words(WORD_COUNT);
    let sorter = RadixSort::default();
    group.bench_function("radix", |b| {
        b.iter_batched(|| data.clone(), |v| black_box(sorter.sort_strings(v)), BatchSize::LargeInput)
    });
    group.bench_function("slice_sort", |b| {
        b.iter_batched(
            || data.clone(),
            |mut v| {
                v.sort();
                black_box(v)
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_numeric, bench_strings);
criterion_main!(benches);
