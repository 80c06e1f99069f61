//! Benchmarks for [`SkipMap`].

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;
use skiplistcollections::{Direction, SkipMap};

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

fn filled(rng: &mut StdRng, size: usize) -> SkipMap<usize, usize> {
    let mut sm = SkipMap::with_capacity(size.max(1)).expect("capacity is non-zero");
    sm.extend(std::iter::repeat_with(|| (rng.random(), rng.random())).take(size));
    sm
}

/// Benchmarking insertion
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sm = filled(&mut rng, size);

            b.iter(|| {
                sm.insert(rng.random(), rng.random());
            });
        });
    }
}

/// Benchmarking random access
pub fn rand_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Random Access");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sm = SkipMap::with_capacity(size).expect("capacity is non-zero");
            sm.extend((0..size).map(|k| (k, rng.random::<usize>())));
            let keys: Vec<usize> = std::iter::repeat_with(|| rng.random_range(0..size))
                .take(10)
                .collect();

            b.iter(|| {
                for key in &keys {
                    black_box(sm.get(key));
                }
            });
        });
    }
}

/// Benchmarking removal followed by re-insertion of the same key
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sm = SkipMap::with_capacity(size).expect("capacity is non-zero");
            sm.extend((0..size).map(|k| (k, k)));

            b.iter(|| {
                let key = rng.random_range(0..size);
                let value = sm.remove(&key).expect("key is present");
                sm.insert(key, black_box(value));
            });
        });
    }
}

/// Benchmarking iteration
pub fn iter(c: &mut Criterion) {
    c.bench_function("SkipMap Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let sm = filled(&mut rng, 100_000);

        b.iter(|| {
            for el in &sm {
                black_box(el);
            }
        });
    });
}

/// Benchmarking iteration from a key, in both directions
pub fn iter_from(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Iter From");

    for direction in [Direction::Forward, Direction::Reverse] {
        group.bench_function(BenchmarkId::from_parameter(format!("{direction:?}")), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let sm = filled(&mut rng, 100_000);

            b.iter(|| {
                let start: usize = rng.random();
                for el in sm.items_from(&start, direction).take(100) {
                    black_box(el);
                }
            });
        });
    }
}
