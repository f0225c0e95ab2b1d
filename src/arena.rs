//! Arena Allocator - O(1) slab of student nodes addressed by `u32` indices.
//!
//! Nodes live in one contiguous `Vec`. Freed slots are threaded onto a free
//! list through their `next` field and reused before the vector grows, so a
//! churn of adds and deletes does not fragment the heap.

use std::fmt;

use crate::student::Student;

/// Sentinel value representing a null/invalid index (like nullptr)
pub const NULL_INDEX: u32 = u32::MAX;

/// Type alias for arena indices - our "compressed pointers"
pub type ArenaIndex = u32;

/// A single slot in the arena.
///
/// While allocated, `student` is `Some` and `prev`/`next` link the node into
/// the roster's insertion-order list. While free, `student` is `None` and
/// `next` points at the following free slot.
pub struct StudentNode<K> {
    /// The record, present only while the slot is allocated
    pub student: Option<Student<K>>,

    /// Index of the next node in insertion order (or next free slot)
    pub next: ArenaIndex,

    /// Index of the previous node (enables O(1) unlink)
    pub prev: ArenaIndex,
}

impl<K> StudentNode<K> {
    /// Create an empty/unlinked node
    #[inline]
    pub const fn empty() -> Self {
        Self {
            student: None,
            next: NULL_INDEX,
            prev: NULL_INDEX,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for StudentNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudentNode")
            .field("id", &self.student.as_ref().map(|s| s.id()))
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

/// Growable memory pool with O(1) allocation and deallocation.
///
/// Uses a free list threaded through the `next` field of unused nodes.
pub struct Arena<K> {
    /// Contiguous block of nodes
    nodes: Vec<StudentNode<K>>,

    /// Head of the free list (index of first available node)
    free_head: ArenaIndex,

    /// Number of currently allocated nodes
    allocated_count: u32,
}

impl<K> Arena<K> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an arena with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_head: NULL_INDEX,
            allocated_count: 0,
        }
    }

    /// Place a record into a free slot and return its index.
    ///
    /// Reuses the most recently freed slot if one exists, otherwise grows.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX - 1` nodes (we reserve MAX
    /// for NULL_INDEX).
    ///
    /// # Complexity
    /// O(1) amortized
    #[inline]
    pub fn alloc(&mut self, student: Student<K>) -> ArenaIndex {
        let index = if self.free_head == NULL_INDEX {
            let index = self.nodes.len();
            assert!(index < NULL_INDEX as usize, "Arena index space exhausted");
            self.nodes.push(StudentNode::empty());
            index as ArenaIndex
        } else {
            let index = self.free_head;
            self.free_head = self.nodes[index as usize].next;
            index
        };

        let node = &mut self.nodes[index as usize];
        node.student = Some(student);
        node.next = NULL_INDEX;
        node.prev = NULL_INDEX;
        self.allocated_count += 1;

        index
    }

    /// Free a node back to the arena, handing its record to the caller.
    ///
    /// The caller must have unlinked the node from any list first.
    /// Returns `None` if the slot was already free.
    ///
    /// # Complexity
    /// O(1) - pushes to head of free list
    #[inline]
    pub fn free(&mut self, index: ArenaIndex) -> Option<Student<K>> {
        let free_head = self.free_head;
        let node = self.nodes.get_mut(index as usize)?;
        let student = node.student.take()?;

        node.prev = NULL_INDEX;
        node.next = free_head;
        self.free_head = index;
        self.allocated_count -= 1;

        Some(student)
    }

    /// Get an immutable reference to a node.
    ///
    /// # Complexity
    /// O(1) - direct array access
    #[inline]
    pub fn get(&self, index: ArenaIndex) -> &StudentNode<K> {
        &self.nodes[index as usize]
    }

    /// Get a mutable reference to a node.
    #[inline]
    pub fn get_mut(&mut self, index: ArenaIndex) -> &mut StudentNode<K> {
        &mut self.nodes[index as usize]
    }

    /// Record stored at `index`, if the slot is allocated.
    #[inline]
    pub fn student(&self, index: ArenaIndex) -> Option<&Student<K>> {
        self.nodes.get(index as usize)?.student.as_ref()
    }

    /// Mutable record stored at `index`, if the slot is allocated.
    #[inline]
    pub fn student_mut(&mut self, index: ArenaIndex) -> Option<&mut Student<K>> {
        self.nodes.get_mut(index as usize)?.student.as_mut()
    }

    /// Returns the number of currently allocated nodes.
    #[inline]
    pub fn allocated(&self) -> u32 {
        self.allocated_count
    }

    /// Returns the number of slots (allocated or free) backing the arena.
    #[cfg(test)]
    #[inline]
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the reserved capacity of the backing vector.
    #[cfg(test)]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns true if the arena is empty (no allocated nodes).
    #[cfg(test)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.allocated_count == 0
    }

    /// Drop every node and reset the free list.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_head = NULL_INDEX;
        self.allocated_count = 0;
    }

    /// Bytes held by the node vector itself (records' heap data excluded).
    pub fn node_bytes(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<StudentNode<K>>()
    }
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Arena<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("slots", &self.nodes.len())
            .field("allocated", &self.allocated_count)
            .field("free_head", &self.free_head)
            .finish()
    }
}
