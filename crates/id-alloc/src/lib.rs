//! Process identifier allocation.
//!
//! Identifiers are handed out in ascending order starting from a configurable
//! floor, and released identifiers are recycled before the counter advances.
//! The floor lets the caller keep a range below it out of circulation (pid 0
//! is the conventional in-child return value of `fork` and must never name a
//! real process).

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Allocate identifications using different algorithms.
pub trait IDAllocator {
    fn alloc(&mut self) -> usize;
    fn dealloc(&mut self, id: usize);
}

/// Ascending counter with a recycle list.
pub struct RecycleAllocator {
    floor: usize,
    next: usize,
    recycled: Vec<usize>,
}

impl RecycleAllocator {
    /// Creates an allocator whose smallest id is `floor`.
    pub fn new(floor: usize) -> Self {
        Self {
            floor,
            next: floor,
            recycled: Vec::new(),
        }
    }

    /// Number of identifiers currently live.
    pub fn in_use(&self) -> usize {
        self.next - self.floor - self.recycled.len()
    }
}

impl IDAllocator for RecycleAllocator {
    fn alloc(&mut self) -> usize {
        if let Some(id) = self.recycled.pop() {
            id
        } else {
            let id = self.next;
            assert_ne!(id, usize::MAX);
            self.next += 1;
            id
        }
    }

    fn dealloc(&mut self, id: usize) {
        debug_assert!(id >= self.floor && id < self.next);
        debug_assert!(!self.recycled.contains(&id));
        self.recycled.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_from_floor() {
        let mut pids = RecycleAllocator::new(1);
        assert_eq!(pids.alloc(), 1);
        assert_eq!(pids.alloc(), 2);
        assert_eq!(pids.in_use(), 2);
    }

    #[test]
    fn recycle_before_advancing() {
        let mut pids = RecycleAllocator::new(1);
        let a = pids.alloc();
        let b = pids.alloc();
        assert_eq!((a, b), (1, 2));
        pids.dealloc(a);
        assert_eq!(pids.alloc(), 1);
        assert_eq!(pids.alloc(), 3);
    }
}
