//! Forward traversal of a [`SkipList`] along its bottom level.
//!
//! [`Cursor`] and [`CursorMut`] are positions in the list. Both compare by
//! list identity and node, so a const cursor and a mutable one agree on
//! equality whichever side is asked. A [`CursorMut`] widens into a
//! [`Cursor`], never the other way round.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::iter::FusedIterator;
use std::ptr;

use crate::error::{MyResult, StatusCode};
use crate::list::SkipList;
use crate::node::Link;

fn value_at<T>(list: &SkipList<T>, current: Link) -> MyResult<&T> {
    current
        .and_then(|id| list.node(id).value())
        .ok_or_else(|| err!(StatusCode::OutOfRange, "cursor is past the last value"))
}

fn next_of<T>(list: &SkipList<T>, current: Link) -> Link {
    current.and_then(|id| list.node(id).next(0))
}

fn same_position<T>(a: &SkipList<T>, a_at: Link, b: &SkipList<T>, b_at: Link) -> bool {
    ptr::eq(a, b) && a_at == b_at
}

pub struct Cursor<'a, T> {
    list: &'a SkipList<T>,
    current: Link,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(list: &'a SkipList<T>, current: Link) -> Self {
        Cursor { list, current }
    }

    /// The value under the cursor, or `OutOfRange` at the end.
    pub fn get(&self) -> MyResult<&'a T> {
        value_at(self.list, self.current)
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Steps to the next value. The end cursor stays at the end.
    pub fn move_next(&mut self) {
        self.current = next_of(self.list, self.current);
    }

    pub fn peek_next(&self) -> Option<&'a T> {
        next_of(self.list, self.current).and_then(|id| self.list.node(id).value())
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T: Debug> Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_tuple("Cursor").field(&self.get().ok()).finish()
    }
}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        same_position(self.list, self.current, other.list, other.current)
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        same_position(self.list, self.current, other.list, other.current)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor {
            list: cursor.list,
            current: cursor.current,
        }
    }
}

pub struct CursorMut<'a, T> {
    list: &'a mut SkipList<T>,
    current: Link,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut SkipList<T>, current: Link) -> Self {
        CursorMut { list, current }
    }

    pub fn get(&self) -> MyResult<&T> {
        value_at(self.list, self.current)
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn move_next(&mut self) {
        self.current = next_of(self.list, self.current);
    }

    pub fn peek_next(&self) -> Option<&T> {
        next_of(self.list, self.current).and_then(|id| self.list.node(id).value())
    }

    /// A const cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<T> {
        Cursor::new(self.list, self.current)
    }
}

impl<'a, T: Ord> CursorMut<'a, T> {
    /// Erases the value under the cursor and moves on to its successor.
    pub fn remove_current(&mut self) -> MyResult<T> {
        let id = self
            .current
            .ok_or_else(|| err!(StatusCode::OutOfRange, "nothing to remove at the end"))?;
        let next = self.list.node(id).next(0);
        let value = self
            .list
            .remove_node(id)
            .ok_or_else(|| err!(StatusCode::OutOfRange, "cursor points at a released node"))?;
        self.current = next;
        Ok(value)
    }
}

impl<'a, T: Debug> Debug for CursorMut<'a, T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_tuple("CursorMut").field(&self.get().ok()).finish()
    }
}

impl<'a, T> PartialEq for CursorMut<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        same_position(self.list, self.current, other.list, other.current)
    }
}

impl<'a, T> Eq for CursorMut<'a, T> {}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        same_position(self.list, self.current, other.list, other.current)
    }
}

/// Borrowing iterator over the values in ascending order.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(cursor: Cursor<'a, T>, remaining: usize) -> Self {
        Iter { cursor, remaining }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.get().ok()?;
        self.cursor.move_next();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator; drains the list from the smallest value up.
pub struct IntoIter<T> {
    list: SkipList<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: SkipList<T>) -> Self {
        IntoIter { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod test {
    use crate::error::StatusCode;
    use crate::list::SkipList;

    fn list_of(values: &[i32]) -> SkipList<i32> {
        values.iter().cloned().collect()
    }

    #[test]
    fn test_empty() {
        let list: SkipList<i32> = SkipList::new();
        assert!(list.begin() == list.end());
        assert!(list.begin().is_end());
        assert_eq!(StatusCode::OutOfRange, list.begin().get().unwrap_err().code);
        assert_eq!(StatusCode::OutOfRange, list.end().get().unwrap_err().code);
        assert_eq!(None, list.iter().next());
    }

    #[test]
    fn test_single() {
        let list = list_of(&[11]);
        let mut it = list.begin();
        assert!(it != list.end());
        assert_eq!(Ok(&11), it.get());
        it.move_next();
        assert!(it == list.end());

        // stepping past the end is harmless
        it.move_next();
        assert!(it == list.end());
    }

    #[test]
    fn test_traversal() {
        let list = list_of(&[10, 20, 5, 15, 25]);
        let expected = vec![5, 10, 15, 20, 25];

        let mut got = vec![];
        for v in &list {
            got.push(*v);
        }
        assert_eq!(expected, got);

        got.clear();
        let mut it = list.begin();
        while it != list.end() {
            got.push(*it.get().unwrap());
            it.move_next();
        }
        assert_eq!(expected, got);

        assert_eq!(5, list.iter().len());
        assert_eq!(expected, list.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_copied_cursor() {
        let list = list_of(&[10, 20]);
        let mut it = list.begin();
        let old = it;
        it.move_next();
        assert_eq!(Ok(&10), old.get());
        assert_eq!(Ok(&20), it.get());
        assert_eq!(Some(&20), old.peek_next());
        assert_eq!(None, it.peek_next());
        it.move_next();
        assert!(it == list.end());
    }

    #[test]
    fn test_find() {
        let list = list_of(&[10, 20, 5]);
        assert_eq!(Some(&10), list.iter().find(|v| **v == 10));
        assert_eq!(None, list.iter().find(|v| **v == 100));
        assert_eq!(Some(1), list.iter().position(|v| *v == 10));
    }

    #[test]
    fn test_restart() {
        let list = list_of(&[3, 1, 2]);
        let mut first = list.iter();
        assert_eq!(Some(&1), first.next());
        assert_eq!(2, first.len());
        let again: Vec<_> = list.iter().collect();
        assert_eq!(vec![&1, &2, &3], again);
        let rest: Vec<_> = first.clone().collect();
        assert_eq!(vec![&2, &3], rest);
    }

    #[test]
    fn test_widen() {
        let mut list = list_of(&[10, 20]);
        let mut it = list.begin_mut();
        assert_eq!(Ok(&10), it.get());
        let cit = it.as_cursor();
        assert_eq!(Ok(&10), cit.get());
        it.move_next();
        assert_eq!(Ok(&20), it.get());

        let mut cit: crate::Cursor<i32> = it.into();
        assert_eq!(Ok(&20), cit.get());
        cit.move_next();
        assert!(cit.is_end());
    }

    #[test]
    fn test_cross_eq() {
        let mut list = list_of(&[10, 20, 30]);
        let mut it = list.begin_mut();

        let c10 = it.as_cursor();
        assert!(it == c10);
        assert!(c10 == it);

        let mut c20 = it.as_cursor();
        c20.move_next();
        assert!(it != c20);
        assert!(c20 != it);

        it.move_next();
        let past_end = {
            let mut c = it.as_cursor();
            c.move_next();
            c.move_next();
            c
        };
        assert!(past_end.is_end());
        assert!(it != past_end);
        assert!(past_end != it);

        it.move_next();
        it.move_next();
        let cend = it.as_cursor();
        assert!(it.is_end());
        assert!(it == cend);
        assert!(cend == it);
    }

    #[test]
    fn test_end_mut_eq() {
        let mut list = list_of(&[1]);
        let end: crate::Cursor<i32> = list.end_mut().into();
        assert!(end.is_end());
        assert_eq!(StatusCode::OutOfRange, end.get().unwrap_err().code);
        assert!(list.end() == list.end());
        assert!(list.begin() != list.end());
    }

    #[test]
    fn test_other_list() {
        let a: SkipList<i32> = SkipList::new();
        let b: SkipList<i32> = SkipList::new();
        // two ends of different lists are different positions
        assert!(a.end() != b.end());
    }

    #[test]
    fn test_remove_current() {
        let mut list = list_of(&[1, 2, 3, 4, 5, 6]);
        {
            let mut it = list.begin_mut();
            while !it.is_end() {
                if it.get().map_or(false, |v| v % 2 == 0) {
                    it.remove_current().unwrap();
                } else {
                    it.move_next();
                }
            }
            assert_eq!(
                StatusCode::OutOfRange,
                it.remove_current().unwrap_err().code
            );
        }
        assert_eq!(vec![1, 3, 5], list.iter().cloned().collect::<Vec<_>>());
        assert_eq!(3, list.len());
        list.check_invariants();

        let mut it = list.begin_mut();
        assert_eq!(Ok(1), it.remove_current());
        assert_eq!(Ok(&3), it.get());
        assert_eq!(Some(&5), it.peek_next());
        drop(it);
        assert_eq!(Some(&3), list.first());
        list.check_invariants();
    }

    #[test]
    fn test_into_iter_partial() {
        let list = list_of(&[4, 2, 8, 6]);
        let mut it = list.into_iter();
        assert_eq!(4, it.len());
        assert_eq!(Some(2), it.next());
        assert_eq!(Some(4), it.next());
        assert_eq!(2, it.len());
        // the remaining values are dropped with the iterator
    }
}
