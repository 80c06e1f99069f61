//! Errors raised by the skip list collections.

use thiserror::Error;

use crate::level_generator::GeometricError;

/// Errors returned by [`SkipMap`][crate::SkipMap] and
/// [`SkipSet`][crate::SkipSet].
///
/// Every failing operation is detected before any link is touched, so the
/// collection is left exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested key is not present.
    #[error("key not found.")]
    KeyNotFound,
    /// The capacity hint must be positive.
    #[error("capacity must be non-zero.")]
    ZeroCapacity,
    /// The level generator allows more levels than a list can hold.
    #[error("level generator allows too many levels.")]
    TooManyLevels,
    /// The level generator could not be built.
    #[error(transparent)]
    Geometric(#[from] GeometricError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Error;
    use crate::level_generator::GeometricError;

    #[test]
    fn messages() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found.");
        assert_eq!(Error::ZeroCapacity.to_string(), "capacity must be non-zero.");
        assert_eq!(
            Error::TooManyLevels.to_string(),
            "level generator allows too many levels."
        );
        assert_eq!(
            Error::from(GeometricError::InvalidProbability).to_string(),
            "p must be in (0, 1)."
        );
    }
}
