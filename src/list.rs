use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;

use log::{debug, trace};

use crate::iter::{Cursor, CursorMut, IntoIter, Iter};
use crate::level_generator::LevelGenerator;
use crate::node::{Link, NodeId, SkipListNode};
use crate::options::Options;
use crate::MAX_LEVEL;

pub type BoxedLevelGenerator = Box<dyn LevelGenerator + Send + Sync>;

/// Per-level predecessors of a value, as found by a top-down search.
type Updates = [NodeId; MAX_LEVEL];

/// A sorted set of distinct values kept in a skip list.
///
/// Nodes live in an arena indexed by `NodeId`; slot 0 is the head
/// sentinel, whose links are the entry point of every level. Released slots
/// are recycled by later inserts.
pub struct SkipList<T> {
    nodes_: Vec<SkipListNode<T>>,
    free_: Vec<NodeId>,
    length_: usize,
    level_: usize,
    options_: Options,
    level_generator: BoxedLevelGenerator,
}

impl<T> SkipList<T> {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// An empty list whose level assignments are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_options(Options::with_seed(seed))
    }

    pub fn with_options(options: Options) -> Self {
        let level_generator = Box::new(options.level_generator());
        Self::with_level_generator(options, level_generator)
    }

    pub fn with_level_generator(options: Options, level_generator: BoxedLevelGenerator) -> Self {
        SkipList {
            nodes_: vec![SkipListNode::dummy(MAX_LEVEL - 1)],
            free_: vec![],
            length_: 0,
            level_: 0,
            options_: options,
            level_generator,
        }
    }

    pub fn len(&self) -> usize {
        self.length_
    }

    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Number of levels that currently hold at least one node; 0 when empty.
    pub fn current_level(&self) -> usize {
        self.level_
    }

    pub fn options(&self) -> &Options {
        &self.options_
    }

    pub fn first(&self) -> Option<&T> {
        self.head().next(0).and_then(|id| self.node(id).value())
    }

    pub fn last(&self) -> Option<&T> {
        let mut current = NodeId::HEAD;
        for level in (0..self.level_).rev() {
            while let Some(next) = self.node(current).next(level) {
                current = next;
            }
        }
        self.node(current).value()
    }

    /// Removes and returns the smallest value.
    pub fn pop_first(&mut self) -> Option<T> {
        let id = self.head().next(0)?;
        // nothing precedes the first node at any of its levels
        self.unlink(&[NodeId::HEAD; MAX_LEVEL], id)
    }

    pub fn clear(&mut self) {
        debug!("clearing skip list of {} values", self.length_);
        self.nodes_.truncate(1);
        self.nodes_[0].clear_links();
        self.free_.clear();
        self.length_ = 0;
        self.level_ = 0;
    }

    /// Moves the contents out, leaving `self` as a fresh empty list.
    pub fn take(&mut self) -> Self {
        let empty = SkipList::with_options(self.options_.clone());
        mem::replace(self, empty)
    }

    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.begin(), self.length_)
    }

    /// Const cursor at the smallest value.
    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(self, self.head().next(0))
    }

    /// Const cursor past the largest value.
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self, None)
    }

    pub fn begin_mut(&mut self) -> CursorMut<T> {
        let first = self.head().next(0);
        CursorMut::new(self, first)
    }

    pub fn end_mut(&mut self) -> CursorMut<T> {
        CursorMut::new(self, None)
    }

    pub(crate) fn node(&self, id: NodeId) -> &SkipListNode<T> {
        &self.nodes_[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SkipListNode<T> {
        &mut self.nodes_[id.index()]
    }

    fn head(&self) -> &SkipListNode<T> {
        self.node(NodeId::HEAD)
    }

    fn allocate(&mut self, value: T, level: usize) -> NodeId {
        let node = SkipListNode::new(value, level);
        match self.free_.pop() {
            Some(id) => {
                self.nodes_[id.index()] = node;
                id
            }
            None => {
                let id = NodeId::new(self.nodes_.len());
                self.nodes_.push(node);
                id
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<T> {
        let node = mem::replace(self.node_mut(id), SkipListNode::vacant());
        self.free_.push(id);
        node.into_value()
    }

    /// Unlinks `id` from every level it occupies, given its predecessors,
    /// then drops empty top levels.
    fn unlink(&mut self, updates: &Updates, id: NodeId) -> Option<T> {
        let level = self.node(id).level();
        for i in 0..=level {
            let update = updates[i];
            debug_assert_eq!(Some(id), self.node(update).next(i));
            let next = self.node(id).next(i);
            self.node_mut(update).set_next(i, next);
        }
        trace!("unlinked node {:?} from {} levels", id, level + 1);

        let level_before = self.level_;
        while self.level_ > 0 && self.head().next(self.level_ - 1).is_none() {
            self.level_ -= 1;
        }
        if self.level_ != level_before {
            debug!("current level shrunk {} -> {}", level_before, self.level_);
        }

        self.length_ -= 1;
        self.release(id)
    }
}

impl<T: Ord> SkipList<T> {
    /// Adds `value` unless an equal value is already present. Returns whether
    /// the list changed.
    pub fn insert(&mut self, value: T) -> bool {
        let mut updates = self.get_updates(&value);

        if self.successor_matching(updates[0], &value).is_some() {
            return false;
        }

        let cap = self.options_.level_cap();
        let height = self.level_generator.gen_level(cap).max(1).min(cap);

        if height > self.level_ {
            for update in &mut updates[self.level_..height] {
                *update = NodeId::HEAD;
            }
            debug!("current level raised {} -> {}", self.level_, height);
            self.level_ = height;
        }

        let id = self.allocate(value, height - 1);
        for i in 0..height {
            let update = updates[i];
            let next = self.node(update).next(i);
            self.node_mut(id).set_next(i, next);
            self.node_mut(update).set_next(i, Some(id));
        }
        trace!("linked node {:?} into {} levels", id, height);

        self.length_ += 1;
        true
    }

    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.find(value).is_some()
    }

    pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.find(value).and_then(|id| self.node(id).value())
    }

    /// Removes `value`. Returns false, leaving the list untouched, when it
    /// is absent.
    pub fn erase<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.remove(value).is_some()
    }

    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        let updates = self.get_updates(value);
        let id = self.successor_matching(updates[0], value)?;
        self.unlink(&updates, id)
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<T> {
        let updates = match self.node(id).value() {
            Some(value) => self.get_updates(value),
            None => return None,
        };
        self.unlink(&updates, id)
    }

    /// For every level in use, the rightmost node whose value is strictly
    /// less than `value`. Levels above `current_level` point at the head.
    fn get_updates<Q: ?Sized>(&self, value: &Q) -> Updates
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        let mut updates = [NodeId::HEAD; MAX_LEVEL];
        let mut current = NodeId::HEAD;

        for level in (0..self.level_).rev() {
            current = self.advance(current, level, value);
            updates[level] = current;
        }

        updates
    }

    fn find<Q: ?Sized>(&self, value: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        let mut current = NodeId::HEAD;
        for level in (0..self.level_).rev() {
            current = self.advance(current, level, value);
        }
        self.successor_matching(current, value)
    }

    /// Walks right along `level` while the next value is below `value`.
    fn advance<Q: ?Sized>(&self, mut current: NodeId, level: usize, value: &Q) -> NodeId
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        while let Some(next) = self.node(current).next(level) {
            match self.node(next).value() {
                Some(v) if v.borrow() < value => current = next,
                _ => break,
            }
        }
        current
    }

    fn successor_matching<Q: ?Sized>(&self, update: NodeId, value: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.node(update).next(0).filter(|&id| {
            self.node(id)
                .value()
                .map_or(false, |v| v.borrow() == value)
        })
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        SkipList::new()
    }
}

impl<T: Ord + Clone> Clone for SkipList<T> {
    /// Rebuilds the list by reinsertion; the copy draws its own levels.
    fn clone(&self) -> Self {
        let mut copied = SkipList::with_options(self.options_.clone());
        for v in self.iter() {
            copied.insert(v.clone());
        }
        copied
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copied = source.clone();
        mem::swap(self, &mut copied);
    }
}

impl<T: PartialEq> PartialEq for SkipList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length_ == other.length_ && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SkipList<T> {}

impl<T: PartialOrd> PartialOrd for SkipList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for SkipList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for SkipList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length_.hash(state);
        for v in self.iter() {
            v.hash(state);
        }
    }
}

impl<T: Display> Display for SkipList<T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "[")?;
        for (i, v) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

impl<T: Debug> Debug for SkipList<T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<'a, T: Ord + Copy + 'a> Extend<&'a T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for SkipList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

#[cfg(test)]
impl<T: Ord> SkipList<T> {
    /// Panics unless every level is strictly ascending, every node is linked
    /// at all of its levels, level 0 holds `len()` nodes and `current_level`
    /// is the highest non-empty level.
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        let mut below: Option<HashSet<NodeId>> = None;
        for level in 0..MAX_LEVEL {
            let mut seen = HashSet::new();
            let mut prev: Option<&T> = None;
            let mut current = self.head().next(level);
            while let Some(id) = current {
                let node = self.node(id);
                let value = node.value().expect("linked node without a value");
                if let Some(prev) = prev {
                    assert!(prev < value, "level {} is not ascending", level);
                }
                assert!(node.level() >= level, "node linked above its tower");
                if let Some(below) = &below {
                    assert!(below.contains(&id), "node at level {} missing below", level);
                }
                seen.insert(id);
                prev = Some(value);
                current = node.next(level);
            }
            if level == 0 {
                assert_eq!(self.length_, seen.len());
            }
            if level < self.level_ {
                assert!(!seen.is_empty(), "level {} below current level is empty", level);
            } else {
                assert!(seen.is_empty(), "level {} above current level is used", level);
            }
            // every node that reaches this level is linked here
            if let Some(below) = &below {
                for id in below {
                    if self.node(*id).level() >= level {
                        assert!(seen.contains(id), "node skipped at level {}", level);
                    }
                }
            }
            below = Some(seen);
        }
        assert_eq!(self.nodes_.len(), self.length_ + self.free_.len() + 1);
    }
}
