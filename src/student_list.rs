//! Student List - the roster's insertion-order sequence.
//!
//! Implements a doubly-linked list using arena indices for O(1)
//! append and removal from any position.

use crate::arena::{Arena, ArenaIndex, NULL_INDEX};
use crate::student::Student;

/// Head/tail bookkeeping for the records held in an [`Arena`].
///
/// The list does not own nodes; it only threads `prev`/`next` through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudentList {
    /// Index of the oldest record (first in traversal)
    pub head: ArenaIndex,
    /// Index of the newest record (last in traversal)
    pub tail: ArenaIndex,
    /// Number of linked records
    pub count: u32,
}

impl StudentList {
    /// Create a new empty list
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: NULL_INDEX,
            tail: NULL_INDEX,
            count: 0,
        }
    }

    /// Returns true if no records are linked
    #[cfg(test)]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append a node to the tail (newest record).
    ///
    /// # Complexity
    /// O(1)
    #[inline]
    pub fn push_back<K>(&mut self, arena: &mut Arena<K>, index: ArenaIndex) {
        if self.tail == NULL_INDEX {
            debug_assert!(self.head == NULL_INDEX);
            self.head = index;
            self.tail = index;
            let node = arena.get_mut(index);
            node.prev = NULL_INDEX;
            node.next = NULL_INDEX;
        } else {
            arena.get_mut(self.tail).next = index;
            let node = arena.get_mut(index);
            node.prev = self.tail;
            node.next = NULL_INDEX;
            self.tail = index;
        }

        self.count += 1;
    }

    /// Unlink a node from anywhere in the list.
    ///
    /// Handles all edge cases:
    /// - Only node (head == tail)
    /// - Removing head
    /// - Removing tail
    /// - Removing from middle
    ///
    /// The node is NOT freed from the arena; caller must do that.
    ///
    /// # Complexity
    /// O(1)
    #[inline]
    pub fn remove<K>(&mut self, arena: &mut Arena<K>, index: ArenaIndex) {
        let node = arena.get(index);
        let prev_idx = node.prev;
        let next_idx = node.next;

        if prev_idx == NULL_INDEX && next_idx == NULL_INDEX {
            debug_assert!(self.head == index && self.tail == index);
            self.head = NULL_INDEX;
            self.tail = NULL_INDEX;
        } else if prev_idx == NULL_INDEX {
            debug_assert!(self.head == index);
            self.head = next_idx;
            arena.get_mut(next_idx).prev = NULL_INDEX;
        } else if next_idx == NULL_INDEX {
            debug_assert!(self.tail == index);
            self.tail = prev_idx;
            arena.get_mut(prev_idx).next = NULL_INDEX;
        } else {
            arena.get_mut(prev_idx).next = next_idx;
            arena.get_mut(next_idx).prev = prev_idx;
        }

        self.count -= 1;

        let node = arena.get_mut(index);
        node.prev = NULL_INDEX;
        node.next = NULL_INDEX;
    }

    /// Walk the list from head to tail.
    #[inline]
    pub fn iter<'a, K>(&self, arena: &'a Arena<K>) -> Iter<'a, K> {
        Iter {
            arena,
            cursor: self.head,
            remaining: self.count as usize,
        }
    }

    /// Walk the list yielding arena indices instead of records.
    pub fn indices<'a, K>(&self, arena: &'a Arena<K>) -> impl Iterator<Item = ArenaIndex> + 'a {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            if cursor == NULL_INDEX {
                return None;
            }
            let index = cursor;
            cursor = arena.get(index).next;
            Some(index)
        })
    }
}

impl Default for StudentList {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-order iterator over the records of a [`StudentList`].
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    cursor: ArenaIndex,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a Student<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor != NULL_INDEX {
            let node = self.arena.get(self.cursor);
            self.cursor = node.next;
            if let Some(student) = node.student.as_ref() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(student);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
