//! SkipMap stores key-value pairs, with the keys being unique and always
//! sorted.

use std::{borrow::Borrow, fmt, iter, mem, ops};

use crate::{
    error::Error,
    level_generator::{Geometric, LevelGenerator, Uniform},
    skipnode::{Arena, HEAD, MAX_LEVELS, NIL, NodeId, SkipNode, max_level_for},
};

/// Capacity hint used by [`SkipMap::new`].
pub const DEFAULT_CAPACITY: usize = 65_535;

/// Which way a range iteration walks the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending key order.
    #[default]
    Forward,
    /// Descending key order.
    Reverse,
}

// ////////////////////////////////////////////////////////////////////////////
// SkipMap
// ////////////////////////////////////////////////////////////////////////////

/// The skipmap provides a way of storing element pairs such that they keys are
/// always sorted whilst at the same time providing efficient way to access,
/// insert and removes nodes.
///
/// Besides point lookups, the skipmap can begin iterating at an arbitrary key
/// in either direction, see [`items_from`][SkipMap::items_from].
///
/// Note that mutable references to keys are not available at all as this could
/// result in a node being left out of the proper ordering.
///
/// The skipmap is not synchronised; sharing it between threads requires
/// external locking, which the borrow checker enforces.
pub struct SkipMap<K, V, G = Geometric> {
    // Storage, this is not sorted
    nodes: Arena<K, V>,
    // The last node at level 0, or `NIL` when empty.
    tail: NodeId,
    len: usize,
    capacity: usize,
    // Highest level used by any node.
    current_level: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V> SkipMap<K, V>
where
    K: Ord,
{
    /// Create a new skipmap sized for [`DEFAULT_CAPACITY`] entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let skipmap: SkipMap<i64, String> = SkipMap::new();
    /// assert_eq!(skipmap.max_level(), 15);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_CAPACITY, Geometric::default())
    }

    /// Constructs a new, empty skipmap with the optimal number of levels for
    /// the intended capacity.  Specifically, it uses `floor(log2(capacity))`
    /// as the highest level, ensuring that only *a few* nodes occupy the
    /// highest level.
    ///
    /// The capacity is a hint rather than a limit: inserting more entries is
    /// always possible, but the expected search cost then grows faster than
    /// `O(log n)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::with_capacity(100)?;
    /// skipmap.extend((0..100).map(|x| (x, x)));
    /// assert_eq!(skipmap.max_level(), 6);
    /// # Ok::<(), skiplistcollections::Error>(())
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let max_level = max_level_for(capacity)?;
        Ok(Self::from_parts(capacity, Geometric::with_max_level(max_level)?))
    }
}

impl<K, V, U> SkipMap<K, V, Geometric<U>>
where
    K: Ord,
    U: Uniform,
{
    /// Constructs a new, empty skipmap whose tower heights are drawn from the
    /// given source of uniform variates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// // Never promote: every node lives on level 0 only.
    /// let mut skipmap = SkipMap::with_uniform(1024, || 0.99)?;
    /// skipmap.extend((0..100).map(|x| (x, x)));
    /// assert_eq!(skipmap.current_level(), 0);
    /// # Ok::<(), skiplistcollections::Error>(())
    /// ```
    #[inline]
    pub fn with_uniform(capacity: usize, uniform: U) -> Result<Self, Error> {
        let max_level = max_level_for(capacity)?;
        Ok(Self::from_parts(
            capacity,
            Geometric::inverse_e(max_level, uniform)?,
        ))
    }
}

impl<K, V, G> SkipMap<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    /// Constructs a new, empty skipmap using a custom level generator.  The
    /// generator's maximum level bounds the height of every tower.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero, or
    /// [`Error::TooManyLevels`] if the generator allows more levels than a
    /// list can hold.
    #[inline]
    pub fn with_level_generator(capacity: usize, level_generator: G) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if level_generator.max_level() >= MAX_LEVELS {
            return Err(Error::TooManyLevels);
        }
        Ok(Self::from_parts(capacity, level_generator))
    }

    fn from_parts(capacity: usize, level_generator: G) -> Self {
        SkipMap {
            nodes: Arena::new(level_generator.max_level()),
            tail: NIL,
            len: 0,
            capacity,
            current_level: 0,
            level_generator,
        }
    }

    /// Insert the key-value pair into the skipmap.
    ///
    /// If the key was already present, its value is replaced and the old value
    /// returned; the node keeps its position and tower.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    ///
    /// assert_eq!(skipmap.insert(1, "Hello"), None);
    /// assert_eq!(skipmap.insert(2, "World"), None);
    /// assert_eq!(skipmap.insert(1, "Goodbye"), Some("Hello"));
    /// assert_eq!(skipmap.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut update = [HEAD; MAX_LEVELS];
        let prev = self.find_less(&key, |level, node| update[level] = node);
        let next = self.nodes[prev].next(0);
        if self.nodes[next].key() == Some(&key) {
            return self.nodes[next]
                .value_mut()
                .map(|slot| mem::replace(slot, value));
        }

        let level = self
            .level_generator
            .level(self.current_level + 1)
            .min(self.max_level());
        // Levels above the old current level have only the head before them,
        // which is what `update` was initialised with.
        self.current_level = self.current_level.max(level);

        let forward = (0..=level)
            .map(|l| self.nodes[update[l]].next(l))
            .collect();
        let node = self.nodes.alloc(SkipNode::new(key, value, prev, forward));
        for (l, &before) in update.iter().enumerate().take(level + 1) {
            self.nodes[before].forward[l] = node;
        }

        let after = self.nodes[node].next(0);
        if after == NIL {
            self.tail = node;
        } else {
            self.nodes[after].backward = node;
        }

        self.len += 1;
        None
    }
}

impl<K, V, G> SkipMap<K, V, G> {
    /// Clears the skipmap, removing all values.  The capacity and level
    /// generator are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// skipmap.clear();
    /// assert!(skipmap.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.nodes = Arena::new(self.max_level());
        self.tail = NIL;
        self.len = 0;
        self.current_level = 0;
    }

    /// Returns the number of elements in the skipmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.len(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skipmap contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// assert!(skipmap.is_empty());
    ///
    /// skipmap.insert(1, "Rust");
    /// assert!(!skipmap.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The capacity hint the skipmap was created with.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The highest level any node may ever reach.
    #[inline]
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.nodes[HEAD].level()
    }

    /// The highest level currently used by any node.  This grows as taller
    /// towers are inserted and shrinks back as they are removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..1000).map(|x| (x, x)));
    /// for i in 0..1000 {
    ///     skipmap.remove(&i)?;
    /// }
    /// assert_eq!(skipmap.current_level(), 0);
    /// # Ok::<(), skiplistcollections::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Provides a reference to the front element, or `None` if the skipmap is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// assert!(skipmap.front().is_none());
    ///
    /// skipmap.insert(1, "Hello");
    /// skipmap.insert(2, "World");
    /// assert_eq!(skipmap.front(), Some((&1, &"Hello")));
    /// ```
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<(&K, &V)> {
        self.nodes[self.nodes[HEAD].next(0)].item()
    }

    /// Provides a reference to the back element, or `None` if the skipmap is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// assert!(skipmap.back().is_none());
    ///
    /// skipmap.insert(1, "Hello");
    /// skipmap.insert(2, "World");
    /// assert_eq!(skipmap.back(), Some((&2, &"World")));
    /// ```
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<(&K, &V)> {
        self.nodes[self.tail].item()
    }

    /// Provides a reference to the value stored under the key, or `None` if
    /// the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// assert!(skipmap.get(&0).is_none());
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.get(&0), Some(&0));
    /// assert_eq!(skipmap.get(&10).copied().unwrap_or(-1), -1);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_key(key).and_then(|node| self.nodes[node].value())
    }

    /// Like [`get`][SkipMap::get], but reports an absent key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::{Error, SkipMap};
    ///
    /// let skipmap: SkipMap<_, _> = (0..10).map(|x| (x, 2 * x)).collect();
    /// assert_eq!(skipmap.try_get(&3), Ok(&6));
    /// assert_eq!(skipmap.try_get(&30), Err(Error::KeyNotFound));
    /// ```
    #[inline]
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Provides a mutable reference to the value stored under the key, or
    /// `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap: SkipMap<_, _> = (0..10).map(|x| (x, x)).collect();
    /// if let Some(x) = skipmap.get_mut(&0) {
    ///     *x = 100;
    /// }
    /// assert_eq!(skipmap.get(&0), Some(&100));
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find_key(key)?;
        self.nodes[node].value_mut()
    }

    /// Returns true if the key is contained in the skipmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert!(skipmap.contains_key(&4));
    /// assert!(!skipmap.contains_key(&15));
    /// ```
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_key(key).is_some()
    }

    /// Removes the key from the skipmap, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent, leaving the
    /// skipmap untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::{Error, SkipMap};
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.remove(&4), Ok(4));
    /// assert_eq!(skipmap.remove(&4), Err(Error::KeyNotFound));
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_key, value)| value)
    }

    /// Removes the key from the skipmap, returning the stored key and value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent, leaving the
    /// skipmap untouched.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = [HEAD; MAX_LEVELS];
        let prev = self.find_less(key, |level, node| update[level] = node);
        let target = self.nodes[prev].next(0);
        match self.nodes[target].key() {
            Some(k) if k.borrow() == key => {}
            _ => return Err(Error::KeyNotFound),
        }

        let after = self.nodes[target].next(0);
        if after != NIL {
            self.nodes[after].backward = prev;
        }

        // Levels above the target's own level never linked to it, so the first
        // trail entry not pointing at it ends the splice.
        for (level, &before) in update.iter().enumerate().take(self.current_level + 1) {
            if self.nodes[before].next(level) != target {
                break;
            }
            let after = self.nodes[target].next(level);
            self.nodes[before].forward[level] = after;
        }

        while self.current_level > 0 && self.nodes[HEAD].next(self.current_level) == NIL {
            self.current_level -= 1;
        }

        if self.tail == target {
            self.tail = if prev == HEAD { NIL } else { prev };
        }

        self.len -= 1;
        match self.nodes.release(target).into_inner() {
            Some(item) => Ok(item),
            None => unreachable!("only real nodes are unlinked"),
        }
    }

    /// Creates an iterator over all entries of the skipmap in ascending key
    /// order.  The iterator is double-ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let skipmap: SkipMap<_, _> = (0..10).map(|x| (x, x)).collect();
    /// for (k, v) in skipmap.iter() {
    ///     println!("Key {}, Value: {}", k, v);
    /// }
    /// assert_eq!(skipmap.iter().next_back(), Some((&9, &9)));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[HEAD].next(0),
            back: self.tail,
            len: self.len,
        }
    }

    /// Iterates over every entry in the given direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::{Direction, SkipMap};
    ///
    /// let skipmap: SkipMap<_, _> = (0..5).map(|x| (x, x * 10)).collect();
    /// let items: Vec<_> = skipmap.items(Direction::Reverse).collect();
    /// assert_eq!(items, [(&4, &40), (&3, &30), (&2, &20), (&1, &10), (&0, &0)]);
    /// ```
    #[inline]
    pub fn items(&self, direction: Direction) -> Items<'_, K, V> {
        let start = match direction {
            Direction::Forward => self.nodes[HEAD].next(0),
            Direction::Reverse => self.tail,
        };
        Items {
            nodes: &self.nodes,
            cursor: start,
            direction,
        }
    }

    /// Iterates from `start_key` in the given direction.
    ///
    /// Walking forward begins at the first key greater than or equal to
    /// `start_key`.  Walking in reverse begins at `start_key` itself when it is
    /// present, and otherwise at the largest key below it.
    ///
    /// If no stored key is strictly less than `start_key` (in particular when
    /// the skipmap is empty) the iteration is empty in **both** directions,
    /// even though a forward walk from a key at or below the minimum would
    /// conceivably yield everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::{Direction, SkipMap};
    ///
    /// let skipmap: SkipMap<_, _> = [("b", 1), ("d", 2)].into_iter().collect();
    /// let keys = |start: &str, direction: Direction| {
    ///     skipmap.keys_from(start, direction).copied().collect::<Vec<_>>()
    /// };
    ///
    /// assert_eq!(keys("c", Direction::Forward), ["d"]);
    /// assert_eq!(keys("c", Direction::Reverse), ["b"]);
    /// assert_eq!(keys("d", Direction::Reverse), ["d", "b"]);
    /// assert!(keys("e", Direction::Forward).is_empty());
    /// assert!(keys("a", Direction::Forward).is_empty());
    /// assert!(keys("a", Direction::Reverse).is_empty());
    /// ```
    pub fn items_from<Q>(&self, start_key: &Q, direction: Direction) -> Items<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let prev = self.find_less(start_key, |_, _| {});
        let start = if prev == HEAD {
            HEAD
        } else {
            let next = self.nodes[prev].next(0);
            match direction {
                Direction::Forward => next,
                Direction::Reverse => match self.nodes[next].key() {
                    Some(k) if k.borrow() == start_key => next,
                    _ => prev,
                },
            }
        };
        Items {
            nodes: &self.nodes,
            cursor: start,
            direction,
        }
    }

    /// Iterates over every key in the given direction.
    #[inline]
    pub fn keys(&self, direction: Direction) -> Keys<'_, K, V> {
        Keys(self.items(direction))
    }

    /// Iterates over the keys starting from `start_key`, with the semantics of
    /// [`items_from`][SkipMap::items_from].
    #[inline]
    pub fn keys_from<Q>(&self, start_key: &Q, direction: Direction) -> Keys<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Keys(self.items_from(start_key, direction))
    }

    /// Iterates over every value in the given direction.
    #[inline]
    pub fn values(&self, direction: Direction) -> Values<'_, K, V> {
        Values(self.items(direction))
    }

    /// Iterates over the values starting from `start_key`, with the semantics
    /// of [`items_from`][SkipMap::items_from].
    #[inline]
    pub fn values_from<Q>(&self, start_key: &Q, direction: Direction) -> Values<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Values(self.items_from(start_key, direction))
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<K, V, G> SkipMap<K, V, G> {
    /// Finds the last node whose key is strictly less than `key`, which may be
    /// the head.
    ///
    /// The search starts at the head on the current level and descends one
    /// level at a time, never moving back left.  `visit` is called with each
    /// level and the node the search dropped down from, which is the
    /// predecessor of `key` on that level.
    fn find_less<Q>(&self, key: &Q, mut visit: impl FnMut(usize, NodeId)) -> NodeId
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = HEAD;
        for level in (0..=self.current_level).rev() {
            loop {
                let next = self.nodes[node].next(level);
                match self.nodes[next].key() {
                    Some(k) if k.borrow() < key => node = next,
                    _ => break,
                }
            }
            visit(level, node);
        }
        node
    }

    /// Finds the node holding `key`.
    fn find_key<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let prev = self.find_less(key, |_, _| {});
        let candidate = self.nodes[prev].next(0);
        match self.nodes[candidate].key() {
            Some(k) if k.borrow() == key => Some(candidate),
            _ => None,
        }
    }
}

impl<K, V, G> SkipMap<K, V, G>
where
    K: fmt::Debug,
{
    /// Renders the towers of the skipmap, one row per level from the current
    /// level down to level 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplistcollections::SkipMap;
    ///
    /// let skipmap: SkipMap<_, _> = (1..=3).map(|x| (x, ())).collect();
    /// let rows = skipmap.structure();
    /// assert_eq!(
    ///     rows.lines().last(),
    ///     Some("<head> --> [1] --> [2] --> [3] --> <nil>")
    /// );
    /// ```
    #[must_use]
    pub fn structure(&self) -> String {
        let mut towers = Vec::with_capacity(self.len);
        let mut node = self.nodes[HEAD].next(0);
        while node != NIL {
            let current = &self.nodes[node];
            towers.push((format!(" --> {}", current.label()), current.level()));
            node = current.next(0);
        }
        let head = self.nodes[HEAD].label();
        let nil = self.nodes[NIL].label();

        let rows: Vec<String> = (0..=self.current_level)
            .rev()
            .map(|level| {
                let mut row = head.clone();
                for (cell, height) in &towers {
                    if *height >= level {
                        row.push_str(cell);
                    } else {
                        row.extend(iter::repeat_n('-', cell.len()));
                    }
                }
                row.push_str(" --> ");
                row.push_str(&nil);
                row
            })
            .collect();
        rows.join("\n")
    }
}

#[cfg(test)]
impl<K: Ord, V, G> SkipMap<K, V, G> {
    /// Checks the integrity of the skipmap.
    fn check(&self) {
        assert!(self.current_level <= self.max_level());
        if self.current_level > 0 {
            assert_ne!(
                self.nodes[HEAD].next(self.current_level),
                NIL,
                "topmost level is empty"
            );
        }

        // Level 0 holds every entry in strictly increasing order, each linked
        // back to its predecessor.
        let mut count = 0;
        let mut prev = HEAD;
        let mut node = self.nodes[HEAD].next(0);
        while node != NIL {
            let current = &self.nodes[node];
            let key = current.key().expect("sentinel linked inside the list");
            if let Some(prev_key) = self.nodes[prev].key() {
                assert!(prev_key < key, "level 0 is out of order");
            }
            assert_eq!(current.backward, prev, "broken backward link");
            assert!(current.level() <= self.current_level);
            count += 1;
            prev = node;
            node = current.next(0);
        }
        assert_eq!(count, self.len);
        assert_eq!(self.tail, if self.len == 0 { NIL } else { prev });
        assert_eq!(self.nodes.occupied(), self.len + 2);

        // Every higher level is an increasing subsequence of level 0.
        for level in 1..=self.max_level() {
            let mut prev_key: Option<&K> = None;
            let mut node = self.nodes[HEAD].next(level);
            if level > self.current_level {
                assert_eq!(node, NIL);
            }
            while node != NIL {
                let current = &self.nodes[node];
                assert!(current.level() >= level);
                let key = current.key().expect("sentinel linked inside the list");
                assert!(prev_key.is_none_or(|p| p < key));
                prev_key = Some(key);
                node = current.next(level);
            }
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K: Ord, V> Default for SkipMap<K, V> {
    #[inline]
    fn default() -> SkipMap<K, V> {
        SkipMap::new()
    }
}

/// This implementation of `PartialEq` only checks that the *entries* are
/// equal; the level generators and node towers are not compared.
impl<K, V, G, H> PartialEq<SkipMap<K, V, H>> for SkipMap<K, V, G>
where
    K: PartialEq,
    V: PartialEq,
{
    #[inline]
    fn eq(&self, other: &SkipMap<K, V, H>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, G> Eq for SkipMap<K, V, G> {}

impl<K, V, G> Extend<(K, V)> for SkipMap<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V> {
    #[inline]
    fn from_iter<I>(iter: I) -> SkipMap<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut skipmap = SkipMap::new();
        skipmap.extend(iter);
        skipmap
    }
}

impl<K, V, G, Q> ops::Index<&Q> for SkipMap<K, V, G>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns the value stored under the key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found"),
        }
    }
}

impl<K, V, G> fmt::Debug for SkipMap<K, V, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, G> fmt::Display for SkipMap<K, V, G>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        write!(f, "]")
    }
}

impl<K, V, G> IntoIterator for SkipMap<K, V, G> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            front: self.nodes[HEAD].next(0),
            back: self.tail,
            len: self.len,
            nodes: self.nodes,
        }
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipMap<K, V, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Double-ended iterator over all entries of a [`SkipMap`].
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<K, V>,
    front: NodeId,
    back: NodeId,
    len: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front];
        self.front = node.next(0);
        self.len -= 1;
        node.item()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back];
        self.back = node.backward;
        self.len -= 1;
        node.item()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> iter::FusedIterator for Iter<'_, K, V> {}

/// Owning iterator over the entries of a [`SkipMap`].
pub struct IntoIter<K, V> {
    nodes: Arena<K, V>,
    front: NodeId,
    back: NodeId,
    len: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.nodes.release(self.front);
        self.front = node.next(0);
        self.len -= 1;
        node.into_inner()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.nodes.release(self.back);
        self.back = node.backward;
        self.len -= 1;
        node.into_inner()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// Directional iterator over the entries of a [`SkipMap`], created by
/// [`SkipMap::items`] and [`SkipMap::items_from`].
///
/// The walk ends at the first sentinel it reaches.
pub struct Items<'a, K, V> {
    nodes: &'a Arena<K, V>,
    cursor: NodeId,
    direction: Direction,
}

impl<'a, K, V> Iterator for Items<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.cursor];
        let item = node.item()?;
        self.cursor = match self.direction {
            Direction::Forward => node.next(0),
            Direction::Reverse => node.backward,
        };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.nodes[self.cursor].item().is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}

impl<K, V> iter::FusedIterator for Items<'_, K, V> {}

/// Iterator over a [`SkipMap`]'s keys.
pub struct Keys<'a, K, V>(Items<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> iter::FusedIterator for Keys<'_, K, V> {}

/// Iterator over a [`SkipMap`]'s values.
pub struct Values<'a, K, V>(Items<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> iter::FusedIterator for Values<'_, K, V> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
