//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level $n > 0$ will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level $n$ is $p$ times the chance of occupying level $n-1$
//! (with $0 < p < 1$). The default in this crate uses $p = 1/e$.
//!
//! The uniform variates driving the distribution come from a [`Uniform`]
//! source. Any `FnMut() -> f64` closure is a source, which makes it easy to
//! replay a fixed sequence of draws and obtain fully deterministic towers.

pub mod geometric;

use rand::{Rng, SeedableRng, rngs::SmallRng};

pub use self::geometric::{DEFAULT_MAX_LEVEL, Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Uniform sources
// ////////////////////////////////////////////////////////////////////////////

/// A source of uniformly distributed values in `[0, 1)`.
pub trait Uniform {
    /// Draw the next value.
    fn sample(&mut self) -> f64;
}

impl<F> Uniform for F
where
    F: FnMut() -> f64,
{
    #[inline]
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// The default [`Uniform`] source: a small, fast generator seeded from the
/// thread-local generator.
#[derive(Debug, Clone)]
pub struct ThreadUniform(SmallRng);

impl ThreadUniform {
    /// Create a new source seeded from the thread-local generator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        ThreadUniform(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new source from a fixed seed.
    #[inline]
    #[must_use]
    pub fn seed_from_u64(seed: u64) -> Self {
        ThreadUniform(SmallRng::seed_from_u64(seed))
    }
}

impl Default for ThreadUniform {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Uniform for ThreadUniform {
    #[inline]
    fn sample(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a [`LevelGenerator`].
pub trait LevelGenerator {
    /// The highest level a node may ever be assigned.
    #[must_use]
    fn max_level(&self) -> usize;

    /// Generate a random level for a new node in the range
    /// `[0, min(ceiling, max_level)]`.
    ///
    /// The skipmap passes `current_level + 1` as the ceiling so that the list
    /// only ever grows by one level at a time.
    #[must_use]
    fn level(&mut self, ceiling: usize) -> usize;
}
