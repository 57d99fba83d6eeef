//! A sorted set built on a skip list.
//!
//! Values are kept in ascending order across up to [`MAX_LEVEL`] linked
//! levels. Each inserted value gets a random number of levels (promotion
//! probability 1/4), which gives expected O(log n) insert, lookup and erase.
//!
//! ```
//! use ordered_skip_list::SkipList;
//!
//! let mut list = SkipList::with_seed(7);
//! list.insert(30);
//! list.insert(10);
//! list.insert(20);
//! list.insert(10);
//!
//! assert_eq!(3, list.len());
//! assert!(list.contains(&20));
//! assert_eq!(vec![10, 20, 30], list.iter().cloned().collect::<Vec<_>>());
//!
//! assert!(list.erase(&20));
//! assert!(!list.erase(&20));
//! assert_eq!("[10, 30]", list.to_string());
//! ```

#[macro_use]
mod error;
mod iter;
mod level_generator;
mod list;
mod node;
mod options;
#[cfg(feature = "serde")]
mod serde_impl;

/// Number of link slots in the head sentinel, and so the tallest a node can be.
pub const MAX_LEVEL: usize = 16;

pub use crate::error::{MyResult, Status, StatusCode};
pub use crate::iter::{Cursor, CursorMut, IntoIter, Iter};
pub use crate::level_generator::{GeometricLevels, LevelGenerator};
pub use crate::list::{BoxedLevelGenerator, SkipList};
pub use crate::options::Options;
