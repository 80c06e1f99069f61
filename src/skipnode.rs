//! Nodes of the skip list and the arena that owns them.
//!
//! Nodes never hold references to one another. Every link is a [`NodeId`]
//! into the [`Arena`], which owns all nodes exclusively. The two sentinels
//! live at fixed positions: [`HEAD`] before every key and [`NIL`] after every
//! key.

use std::{fmt, mem, ops};

use crate::error::Error;

/// Upper bound on the number of levels any list may have.
///
/// Large enough for every capacity representable by `usize`.
pub(crate) const MAX_LEVELS: usize = usize::BITS as usize;

/// Index of a node within an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The head sentinel.
pub(crate) const HEAD: NodeId = NodeId(0);
/// The nil sentinel.
pub(crate) const NIL: NodeId = NodeId(1);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HEAD => write!(f, "<head>"),
            NIL => write!(f, "<nil>"),
            NodeId(i) => write!(f, "#{i}"),
        }
    }
}

/// The highest level of a list sized for `capacity` entries, that is
/// `floor(log2(capacity))`.
///
/// The capacity is only a hint: inserting more entries degrades the expected
/// search cost but never fails.
pub(crate) fn max_level_for(capacity: usize) -> Result<usize, Error> {
    if capacity == 0 {
        return Err(Error::ZeroCapacity);
    }
    Ok(capacity.ilog2() as usize)
}

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// The structural placeholders bounding the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Sentinel {
    Head,
    Nil,
}

/// What a node holds: either a sentinel or a real key-value pair.
#[derive(Clone, Debug)]
pub(crate) enum Entry<K, V> {
    Sentinel(Sentinel),
    Real { key: K, value: V },
}

/// A single node of the list.
///
/// A node of level `n` has `n + 1` forward links, one for each level it
/// participates in. The number of links is fixed when the node is created.
/// Only level 0 is linked backwards.
#[derive(Clone, Debug)]
pub(crate) struct SkipNode<K, V> {
    pub entry: Entry<K, V>,
    // The immediately preceding node at level 0. Sentinels point at `NIL`.
    pub backward: NodeId,
    // `forward[i]` is the next node present at level `i`. Empty for `NIL`.
    pub forward: Vec<NodeId>,
}

impl<K, V> SkipNode<K, V> {
    /// Create the head sentinel with links on levels `0..=max_level`, all
    /// pointing at nil.
    fn head(max_level: usize) -> Self {
        SkipNode {
            entry: Entry::Sentinel(Sentinel::Head),
            backward: NIL,
            forward: vec![NIL; max_level + 1],
        }
    }

    fn nil() -> Self {
        SkipNode {
            entry: Entry::Sentinel(Sentinel::Nil),
            backward: NIL,
            forward: Vec::new(),
        }
    }

    /// Create a real node. Its level is `forward.len() - 1`.
    pub fn new(key: K, value: V, backward: NodeId, forward: Vec<NodeId>) -> Self {
        debug_assert!(!forward.is_empty(), "a node participates in level 0");
        SkipNode {
            entry: Entry::Real { key, value },
            backward,
            forward,
        }
    }

    /// The highest level this node participates in.
    #[inline]
    pub fn level(&self) -> usize {
        self.forward.len().saturating_sub(1)
    }

    /// The next node at `level`.
    #[inline]
    pub fn next(&self, level: usize) -> NodeId {
        self.forward[level]
    }

    #[inline]
    pub fn key(&self) -> Option<&K> {
        match &self.entry {
            Entry::Real { key, .. } => Some(key),
            Entry::Sentinel(_) => None,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        match &self.entry {
            Entry::Real { value, .. } => Some(value),
            Entry::Sentinel(_) => None,
        }
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        match &mut self.entry {
            Entry::Real { value, .. } => Some(value),
            Entry::Sentinel(_) => None,
        }
    }

    #[inline]
    pub fn item(&self) -> Option<(&K, &V)> {
        match &self.entry {
            Entry::Real { key, value } => Some((key, value)),
            Entry::Sentinel(_) => None,
        }
    }

    /// How the node is drawn in a rendering of the list.
    pub fn label(&self) -> String
    where
        K: fmt::Debug,
    {
        match &self.entry {
            Entry::Sentinel(Sentinel::Head) => String::from("<head>"),
            Entry::Sentinel(Sentinel::Nil) => String::from("<nil>"),
            Entry::Real { key, .. } => format!("[{key:?}]"),
        }
    }

    /// Consumes the node returning the pair it contains.
    pub fn into_inner(self) -> Option<(K, V)> {
        match self.entry {
            Entry::Real { key, value } => Some((key, value)),
            Entry::Sentinel(_) => None,
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Arena
// ////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(SkipNode<K, V>),
    Vacant,
}

/// Owner of every node in a list.
///
/// Slots freed by removals are recycled by later insertions, so indices are
/// stable for as long as the node they refer to is linked.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    /// Create an arena holding only the two sentinels.
    pub fn new(max_level: usize) -> Self {
        Arena {
            slots: vec![
                Slot::Occupied(SkipNode::head(max_level)),
                Slot::Occupied(SkipNode::nil()),
            ],
            free: Vec::new(),
        }
    }

    /// Store a node, returning its index.
    pub fn alloc(&mut self, node: SkipNode<K, V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.0] = Slot::Occupied(node);
            id
        } else {
            self.slots.push(Slot::Occupied(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Take a node out of the arena. The caller must have unlinked it first.
    pub fn release(&mut self, id: NodeId) -> SkipNode<K, V> {
        assert!(id != HEAD && id != NIL, "sentinels are never released");
        match mem::replace(&mut self.slots[id.0], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free.push(id);
                node
            }
            Slot::Vacant => panic!("node {id:?} released twice"),
        }
    }

    /// Number of nodes currently stored, sentinels included.
    #[cfg(test)]
    pub fn occupied(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<K, V> ops::Index<NodeId> for Arena<K, V> {
    type Output = SkipNode<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("dangling link to {id:?}"),
        }
    }
}

impl<K, V> ops::IndexMut<NodeId> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("dangling link to {id:?}"),
        }
    }
}
