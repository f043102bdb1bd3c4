//! Fixed-capacity FIFO of small `Copy` values.
//!
//! Backs the free-frame list, the free-slot list and the victim queue. The
//! storage is allocated once; pushing and popping only move the head/tail
//! cursor, so there is no per-node allocation and exhaustion is a length
//! check.

use alloc::boxed::Box;
use alloc::vec;

pub struct IndexRing<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T: Copy> IndexRing<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append at the tail. Hands the value back if the ring is full.
    pub fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        let tail = (self.head + self.len) % self.capacity();
        self.slots[tail] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Remove from the head.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        value
    }

    /// Peek at the head without removing it.
    pub fn front(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.head]
        }
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[(self.head + i) % self.capacity()])
    }
}
