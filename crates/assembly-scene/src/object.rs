//! Scene object handles and allocation.
//!
//! An [`ObjectId`] is a 64-bit handle that packs a *generation* counter in the
//! high 32 bits and a *slot* index in the low 32 bits. Destroying an object
//! bumps the generation of its slot, so handles kept across an episode reset
//! are detected as stale instead of aliasing a newly instantiated object.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// ---------------------------------------------------------------------------
// ObjectId
// ---------------------------------------------------------------------------

/// A generational handle to an instantiated scene object.
///
/// Layout: `[generation: u32 | slot: u32]`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Construct an `ObjectId` from a slot index and generation.
    #[inline]
    pub fn new(slot: u32, generation: u32) -> Self {
        Self((generation as u64) << 32 | slot as u64)
    }

    /// The slot portion (low 32 bits).
    #[inline]
    pub fn slot(self) -> u32 {
        self.0 as u32
    }

    /// The generation portion (high 32 bits).
    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Raw `u64` representation.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Reconstruct from a raw `u64`.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}v{})", self.slot(), self.generation())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.slot(), self.generation())
    }
}

// ---------------------------------------------------------------------------
// ObjectAllocator
// ---------------------------------------------------------------------------

/// Hands out [`ObjectId`]s and recycles slots with generational tracking.
///
/// Freed slots go to the back of a FIFO queue, so a slot is not reused until
/// every other free slot has been handed out once.
#[derive(Debug, Default)]
pub struct ObjectAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_slots: VecDeque<u32>,
}

impl ObjectAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle, reusing the oldest free slot if one exists.
    pub fn allocate(&mut self) -> ObjectId {
        if let Some(slot) = self.free_slots.pop_front() {
            // Generation was already bumped when the slot was freed.
            self.alive[slot as usize] = true;
            ObjectId::new(slot, self.generations[slot as usize])
        } else {
            let slot = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            ObjectId::new(slot, 0)
        }
    }

    /// Release a handle, invalidating every copy of it.
    ///
    /// Returns `false` if the handle was already released or is stale.
    pub fn deallocate(&mut self, id: ObjectId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = id.slot() as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free_slots.push_back(id.slot());
        true
    }

    /// Returns `true` if `id` refers to a live object of the current generation.
    pub fn is_alive(&self, id: ObjectId) -> bool {
        let slot = id.slot() as usize;
        slot < self.generations.len()
            && self.alive[slot]
            && self.generations[slot] == id.generation()
    }

    /// Number of live objects.
    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_unique_slots() {
        let mut alloc = ObjectAllocator::new();
        let ids: Vec<ObjectId> = (0..64).map(|_| alloc.allocate()).collect();
        let mut slots: Vec<u32> = ids.iter().map(|id| id.slot()).collect();
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), 64);
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut alloc = ObjectAllocator::new();
        let first = alloc.allocate();
        assert!(alloc.deallocate(first));
        let second = alloc.allocate();
        assert_eq!(second.slot(), first.slot());
        assert_eq!(second.generation(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn stale_handle_stays_dead_after_recycle() {
        let mut alloc = ObjectAllocator::new();
        let old = alloc.allocate();
        alloc.deallocate(old);
        let _new = alloc.allocate();
        assert!(!alloc.is_alive(old));
    }

    #[test]
    fn double_release_is_noop() {
        let mut alloc = ObjectAllocator::new();
        let id = alloc.allocate();
        assert!(alloc.deallocate(id));
        assert!(!alloc.deallocate(id));
        assert_eq!(alloc.alive_count(), 0);
    }

    #[test]
    fn unknown_slot_is_not_alive() {
        let alloc = ObjectAllocator::new();
        assert!(!alloc.is_alive(ObjectId::new(7, 0)));
    }

    #[test]
    fn display_and_debug_format() {
        let id = ObjectId::new(3, 1);
        assert_eq!(id.to_string(), "3v1");
        assert_eq!(format!("{id:?}"), "ObjectId(3v1)");
        assert_eq!(ObjectId::from_raw(id.to_raw()), id);
    }
}
