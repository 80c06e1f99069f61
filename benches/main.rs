//! Benchmarks comparing the skipmap against the standard library's ordered map.

#[macro_use]
extern crate criterion;

mod btreemap;
mod skipmap;

criterion_group!(
    benches,
    crate::btreemap::insert,
    crate::btreemap::rand_access,
    crate::btreemap::remove,
    crate::btreemap::iter,
    crate::btreemap::iter_from,
    crate::skipmap::insert,
    crate::skipmap::rand_access,
    crate::skipmap::remove,
    crate::skipmap::iter,
    crate::skipmap::iter_from,
);
criterion_main!(benches);
