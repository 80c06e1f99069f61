//! Baseline benchmarks for the Standard Library's [`BTreeMap`], mirroring
//! those of the skipmap.

use std::{collections::BTreeMap, ops::Bound};

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

fn filled(rng: &mut StdRng, size: usize) -> BTreeMap<usize, usize> {
    std::iter::repeat_with(|| (rng.random(), rng.random()))
        .take(size)
        .collect()
}

/// Benchmarking insertion
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut map = filled(&mut rng, size);

            b.iter(|| {
                map.insert(rng.random(), rng.random());
            });
        });
    }
}

/// Benchmarking random access
pub fn rand_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Random Access");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let map: BTreeMap<usize, usize> = (0..size).map(|k| (k, rng.random())).collect();
            let keys: Vec<usize> = std::iter::repeat_with(|| rng.random_range(0..size))
                .take(10)
                .collect();

            b.iter(|| {
                for key in &keys {
                    black_box(map.get(key));
                }
            });
        });
    }
}

/// Benchmarking removal followed by re-insertion of the same key
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut map: BTreeMap<usize, usize> = (0..size).map(|k| (k, k)).collect();

            b.iter(|| {
                let key = rng.random_range(0..size);
                let value = map.remove(&key).expect("key is present");
                map.insert(key, black_box(value));
            });
        });
    }
}

/// Benchmarking iteration
pub fn iter(c: &mut Criterion) {
    c.bench_function("BTreeMap Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let map = filled(&mut rng, 100_000);

        b.iter(|| {
            for el in &map {
                black_box(el);
            }
        });
    });
}

/// Benchmarking iteration from a key, in both directions
pub fn iter_from(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Iter From");

    group.bench_function("Forward", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let map = filled(&mut rng, 100_000);

        b.iter(|| {
            let start: usize = rng.random();
            for el in map.range(start..).take(100) {
                black_box(el);
            }
        });
    });

    group.bench_function("Reverse", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let map = filled(&mut rng, 100_000);

        b.iter(|| {
            let start: usize = rng.random();
            for el in map
                .range((Bound::Unbounded, Bound::Included(start)))
                .rev()
                .take(100)
            {
                black_box(el);
            }
        });
    });
}
