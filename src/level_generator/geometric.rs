//! Geometric level generator.

use thiserror::Error;

use crate::level_generator::{LevelGenerator, ThreadUniform, Uniform};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum level must leave room for the tower of a node.
    #[error("max_level must be less than usize::BITS.")]
    MaxTooLarge,
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. This produces a geometric distribution, albeit truncated
/// at the ceiling passed to [`level`][LevelGenerator::level] and at the
/// maximum level.
#[derive(Debug, Clone)]
pub struct Geometric<U = ThreadUniform> {
    /// The highest level that may be generated.
    max_level: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The source of uniform variates.
    uniform: U,
}

/// Highest level of the default generator, sized for 65535 entries.
pub const DEFAULT_MAX_LEVEL: usize = 15;

impl Default for Geometric {
    /// A generator with `p = 1/e` and levels up to [`DEFAULT_MAX_LEVEL`].
    #[inline]
    fn default() -> Self {
        Geometric {
            max_level: DEFAULT_MAX_LEVEL,
            p: core::f64::consts::E.recip(),
            uniform: ThreadUniform::new(),
        }
    }
}

impl Geometric {
    /// Create a generator with `p = 1/e` drawing from a freshly seeded
    /// [`ThreadUniform`].
    ///
    /// # Errors
    ///
    /// See [`Geometric::new`].
    #[inline]
    pub fn with_max_level(max_level: usize) -> Result<Self, GeometricError> {
        Self::inverse_e(max_level, ThreadUniform::new())
    }
}

impl<U: Uniform> Geometric<U> {
    /// Create a new geometric level generator producing levels up to (and
    /// including) `max_level`, with `p` as the probability that a given node
    /// is present in the next level.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `max_level` must be less than
    /// `usize::BITS`.
    #[inline]
    pub fn new(max_level: usize, p: f64, uniform: U) -> Result<Self, GeometricError> {
        if u32::try_from(max_level).map_or(true, |m| m >= usize::BITS) {
            return Err(GeometricError::MaxTooLarge);
        }
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric {
            max_level,
            p,
            uniform,
        })
    }

    /// Create a generator with the promotion probability `p = 1/e`, which
    /// minimises the expected search cost.
    ///
    /// # Errors
    ///
    /// See [`Geometric::new`].
    #[inline]
    pub fn inverse_e(max_level: usize, uniform: U) -> Result<Self, GeometricError> {
        Self::new(max_level, core::f64::consts::E.recip(), uniform)
    }

    /// The probability that a node is promoted to the next level.
    #[inline]
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl<U: Uniform> LevelGenerator for Geometric<U> {
    #[inline]
    fn max_level(&self) -> usize {
        self.max_level
    }

    /// Generate a level by repeated Bernoulli trials.
    ///
    /// A variate is drawn before the cap is tested, so every call consumes at
    /// least one draw even when the cap is zero.
    #[inline]
    fn level(&mut self, ceiling: usize) -> usize {
        let cap = ceiling.min(self.max_level);
        let mut level = 0;
        while self.uniform.sample() < self.p && level < cap {
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, bail};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{DEFAULT_MAX_LEVEL, Geometric, GeometricError, LevelGenerator};
    use crate::level_generator::ThreadUniform;

    #[test]
    fn invalid_max() -> Result<()> {
        assert_eq!(
            Geometric::new(usize::MAX, 0.5, || 0.0).err(),
            Some(GeometricError::MaxTooLarge)
        );
        let bits = usize::try_from(usize::BITS)?;
        assert_eq!(
            Geometric::new(bits, 0.5, || 0.0).err(),
            Some(GeometricError::MaxTooLarge)
        );
        assert!(Geometric::new(bits - 1, 0.5, || 0.0).is_ok());
        Ok(())
    }

    #[test]
    fn invalid_p() {
        assert_eq!(
            Geometric::new(1, 0.0, || 0.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, 1.0, || 0.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, f64::NAN, || 0.0).err(),
            Some(GeometricError::InvalidProbability)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            GeometricError::InvalidProbability.to_string(),
            "p must be in (0, 1)."
        );
        assert_eq!(
            GeometricError::MaxTooLarge.to_string(),
            "max_level must be less than usize::BITS."
        );
    }

    #[test]
    fn zero_max_level_is_valid() -> Result<()> {
        let mut generator = Geometric::inverse_e(0, || 0.0)?;
        assert_eq!(generator.max_level(), 0);
        assert_eq!(generator.level(10), 0);
        Ok(())
    }

    #[test]
    fn default() {
        let generator = Geometric::default();
        assert_eq!(generator.max_level(), DEFAULT_MAX_LEVEL);
        assert!((generator.p() - core::f64::consts::E.recip()).abs() < f64::EPSILON);
    }

    #[test]
    fn inverse_e() -> Result<()> {
        let generator = Geometric::with_max_level(4)?;
        assert!((generator.p() - 0.367_879_441_171_442_3).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn draws_before_testing_cap() -> Result<()> {
        let mut draws = 0_usize;
        let mut generator = Geometric::inverse_e(8, || {
            draws += 1;
            0.0
        })?;
        // A draw below p always promotes, so the level is bounded only by the
        // cap, and the cap check happens after the draw.
        assert_eq!(generator.level(3), 3);
        assert_eq!(generator.level(0), 0);
        drop(generator);
        assert_eq!(draws, 4 + 1);
        Ok(())
    }

    #[rstest]
    #[case(&[0.9], 0)]
    #[case(&[0.1, 0.9], 1)]
    #[case(&[0.1, 0.2, 0.3, 0.5], 3)]
    #[case(&[0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.9], 5)]
    fn replayed_draws(#[case] draws: &[f64], #[case] expected: usize) -> Result<()> {
        let mut replay = draws.iter().copied();
        let mut generator = Geometric::inverse_e(5, move || replay.next().unwrap_or(1.0))?;
        assert_eq!(generator.level(usize::MAX), expected);
        Ok(())
    }

    #[rstest]
    fn bounded(
        #[values(0, 1, 2, 16)] max_level: usize,
        #[values(0, 1, 4, 100)] ceiling: usize,
        #[values(0.01, 0.1, 0.5, 0.99)] p: f64,
    ) -> Result<()> {
        let mut generator = Geometric::new(max_level, p, ThreadUniform::seed_from_u64(7))?;
        let cap = max_level.min(ceiling);
        for _ in 0..100_000 {
            let level = generator.level(ceiling);
            assert!((0..=cap).contains(&level));
        }

        // Make sure both ends of the range are reachable.
        let mut found = false;
        for _ in 0..100_000 {
            if generator.level(ceiling) == 0 {
                found = true;
                break;
            }
        }
        if !found {
            bail!("Failed to generate a level-0 node.");
        }

        found = false;
        for _ in 0..1_000_000 {
            if generator.level(ceiling) == cap {
                found = true;
                break;
            }
        }
        if !found && p >= 0.5 {
            bail!("Failed to generate a level-{} node.", cap);
        }

        Ok(())
    }
}
