//! Sorted collections backed by a skiplist, a structure in which elements can
//! be accessed, inserted and removed in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list, allowing the algorithm
//! to effectively skip ahead.
//!
//! Two collections are provided:
//!
//! - [`SkipMap`], a sorted dictionary which can also begin iterating at an
//!   arbitrary key, present or not, in either [`Direction`].
//! - [`SkipSet`], a sorted set stored as the keys of a [`SkipMap`].
//!
//! The height of each node's tower is drawn by a [`LevelGenerator`]. The
//! default [`Geometric`] generator promotes a node to the next level with
//! probability `1/e`, and accepts any [`Uniform`] source (including a plain
//! closure) so that tower heights can be made deterministic.
//!
//! ```
//! use skiplistcollections::{Direction, SkipMap};
//!
//! let mut skipmap = SkipMap::with_capacity(1024)?;
//! skipmap.insert("b", 2);
//! skipmap.insert("d", 4);
//!
//! let after_c: Vec<_> = skipmap.keys_from("c", Direction::Forward).collect();
//! assert_eq!(after_c, [&"d"]);
//! # Ok::<(), skiplistcollections::Error>(())
//! ```
//!
//! The collections are not synchronised.  Nodes are kept in an arena and
//! linked by index, so the crate contains no `unsafe` code.

#![forbid(unsafe_code)]

mod error;
pub mod level_generator;
pub mod skipmap;
mod skipnode;
pub mod skipset;

pub use crate::{
    error::Error,
    level_generator::{Geometric, GeometricError, LevelGenerator, ThreadUniform, Uniform},
    skipmap::{Direction, SkipMap},
    skipset::SkipSet,
};
