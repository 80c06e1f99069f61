//! An always-ordered set, stored as the keys of a [`SkipMap`].

use std::{borrow::Borrow, fmt, iter};

use crate::{
    error::Error,
    level_generator::{Geometric, LevelGenerator, Uniform},
    skipmap::{self, Direction, SkipMap},
};

// ////////////////////////////////////////////////////////////////////////////
// SkipSet
// ////////////////////////////////////////////////////////////////////////////

/// The skipset stores unique elements in sorted order.
///
/// Every operation delegates to a [`SkipMap`] whose values are `()`, so the
/// costs and iteration semantics are exactly those of the skipmap.
pub struct SkipSet<T, G = Geometric> {
    map: SkipMap<T, (), G>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T: Ord> SkipSet<T> {
    /// Create a new skipset sized for the default capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipSet;
    ///
    /// let mut skipset: SkipSet<i64> = SkipSet::new();
    /// assert!(skipset.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        SkipSet { map: SkipMap::new() }
    }

    /// Constructs a new, empty skipset with the optimal number of levels for
    /// the intended capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(SkipSet {
            map: SkipMap::with_capacity(capacity)?,
        })
    }
}

impl<T: Ord, U: Uniform> SkipSet<T, Geometric<U>> {
    /// Constructs a new, empty skipset whose tower heights are drawn from the
    /// given source of uniform variates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    #[inline]
    pub fn with_uniform(capacity: usize, uniform: U) -> Result<Self, Error> {
        Ok(SkipSet {
            map: SkipMap::with_uniform(capacity, uniform)?,
        })
    }
}

impl<T: Ord, G: LevelGenerator> SkipSet<T, G> {
    /// Constructs a new, empty skipset using a custom level generator.
    ///
    /// # Errors
    ///
    /// See [`SkipMap::with_level_generator`].
    #[inline]
    pub fn with_level_generator(capacity: usize, level_generator: G) -> Result<Self, Error> {
        Ok(SkipSet {
            map: SkipMap::with_level_generator(capacity, level_generator)?,
        })
    }

    /// Adds a value to the skipset, returning `true` if it was not already
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipSet;
    ///
    /// let mut skipset = SkipSet::new();
    /// assert!(skipset.insert(3));
    /// assert!(!skipset.insert(3));
    /// assert_eq!(skipset.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }
}

impl<T, G> SkipSet<T, G> {
    /// Removes a value from the skipset, returning the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the value is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::{Error, SkipSet};
    ///
    /// let mut skipset: SkipSet<_> = (0..5).collect();
    /// assert_eq!(skipset.remove(&2), Ok(2));
    /// assert_eq!(skipset.remove(&2), Err(Error::KeyNotFound));
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, value: &Q) -> Result<T, Error>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove_entry(value).map(|(value, ())| value)
    }

    /// Returns `true` if the skipset contains the value.
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(value)
    }

    /// Returns the number of elements in the skipset.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the skipset contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the skipset, removing all values.
    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// The smallest element, or `None` if the skipset is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.front().map(|(value, ())| value)
    }

    /// The largest element, or `None` if the skipset is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.back().map(|(value, ())| value)
    }

    /// Creates an iterator over the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipSet;
    ///
    /// let skipset: SkipSet<_> = [5, 1, 3].into_iter().collect();
    /// assert_eq!(skipset.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.map.iter())
    }

    /// Iterates from `start` in the given direction, with the semantics of
    /// [`SkipMap::items_from`].
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::{Direction, SkipSet};
    ///
    /// let skipset: SkipSet<_> = [10, 20, 30].into_iter().collect();
    /// let up: Vec<_> = skipset.range(&15, Direction::Forward).collect();
    /// let down: Vec<_> = skipset.range(&25, Direction::Reverse).collect();
    /// assert_eq!(up, [&20, &30]);
    /// assert_eq!(down, [&20, &10]);
    /// ```
    #[inline]
    pub fn range<Q>(&self, start: &Q, direction: Direction) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Range(self.map.keys_from(start, direction))
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T: Ord> Default for SkipSet<T> {
    #[inline]
    fn default() -> Self {
        SkipSet::new()
    }
}

impl<T: PartialEq, G, H> PartialEq<SkipSet<T, H>> for SkipSet<T, G> {
    #[inline]
    fn eq(&self, other: &SkipSet<T, H>) -> bool {
        self.map == other.map
    }
}

impl<T: Eq, G> Eq for SkipSet<T, G> {}

impl<T: Ord, G: LevelGenerator> Extend<T> for SkipSet<T, G> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.map.extend(iterable.into_iter().map(|value| (value, ())));
    }
}

impl<T: Ord> FromIterator<T> for SkipSet<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut skipset = SkipSet::new();
        skipset.extend(iter);
        skipset
    }
}

impl<T: fmt::Debug, G> fmt::Debug for SkipSet<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, G> fmt::Display for SkipSet<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, value) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl<T, G> IntoIterator for SkipSet<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.map.into_iter())
    }
}

impl<'a, T, G> IntoIterator for &'a SkipSet<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Double-ended iterator over the elements of a [`SkipSet`].
pub struct Iter<'a, T>(skipmap::Iter<'a, T, ()>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(value, ())| value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> iter::FusedIterator for Iter<'_, T> {}

/// Directional iterator over the elements of a [`SkipSet`], created by
/// [`SkipSet::range`].
pub struct Range<'a, T>(skipmap::Keys<'a, T, ()>);

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> iter::FusedIterator for Range<'_, T> {}

/// Owning iterator over the elements of a [`SkipSet`].
pub struct IntoIter<T>(skipmap::IntoIter<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(value, ())| value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
