#![forbid(unsafe_code)]

//! Arena of icon handles with slot reuse.
//!
//! Released slots go on a free list and are handed out again by index, so a
//! grid that rebuilds with a similar item count stops allocating after the
//! first pass. Each reuse bumps the slot generation; ids from earlier
//! occupants are rejected with [`GridError::HandleNotFound`].
//!
//! A pool holds at most [`max_slots`](HandlePool::max_slots) slots
//! (`u32::MAX` unless capped); past that, `acquire` fails with
//! [`GridError::PoolExhausted`].

use crate::error::{GridError, Result};
use crate::handle::{HandleId, IconHandle};
use stargrid_layout::IconTier;

#[derive(Debug, Clone)]
struct Slot<K> {
    generation: u32,
    handle: Option<IconHandle<K>>,
}

/// Pool of [`IconHandle`]s owned by one grid.
#[derive(Debug, Clone)]
pub struct HandlePool<K> {
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    live: usize,
    max_slots: u32,
}

impl<K> Default for HandlePool<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            max_slots: u32::MAX,
        }
    }
}

impl<K> HandlePool<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool that never grows past `max_slots` slots.
    #[must_use]
    pub fn with_max_slots(max_slots: u32) -> Self {
        Self {
            max_slots,
            ..Self::default()
        }
    }

    /// Take a fresh, unbound handle.
    pub fn acquire(&mut self, tier: IconTier) -> Result<HandleId> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            let id = HandleId::from_raw_parts(index, slot.generation);
            slot.handle = Some(IconHandle::new(id, tier));
            self.live += 1;
            return Ok(id);
        }
        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&index| index < self.max_slots)
            .ok_or(GridError::PoolExhausted {
                max_slots: self.max_slots,
            })?;
        let id = HandleId::from_raw_parts(index, 0);
        self.slots.push(Slot {
            generation: 0,
            handle: Some(IconHandle::new(id, tier)),
        });
        self.live += 1;
        Ok(id)
    }

    /// Return a handle's slot to the free list.
    pub fn release(&mut self, id: HandleId) -> Result<IconHandle<K>> {
        let slot = self
            .slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .ok_or(GridError::HandleNotFound(id))?;
        let handle = slot.handle.take().ok_or(GridError::HandleNotFound(id))?;
        self.free.push(id.index());
        self.live -= 1;
        Ok(handle)
    }

    /// Release every live handle, returning them in slot order.
    pub fn release_all(&mut self) -> Vec<IconHandle<K>> {
        let mut released = Vec::with_capacity(self.live);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(handle) = slot.handle.take() {
                self.free.push(index as u32);
                released.push(handle);
            }
        }
        self.live = 0;
        released
    }

    pub fn get(&self, id: HandleId) -> Option<&IconHandle<K>> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.handle.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: HandleId) -> Option<&mut IconHandle<K>> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.handle.as_mut())
    }

    pub(crate) fn require_mut(&mut self, id: HandleId) -> Result<&mut IconHandle<K>> {
        self.get_mut(id).ok_or(GridError::HandleNotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: HandleId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live handles.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Most slots this pool will ever allocate.
    #[inline]
    pub fn max_slots(&self) -> u32 {
        self.max_slots
    }

    /// Number of slots ever allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live handles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &IconHandle<K>> {
        self.slots.iter().filter_map(|slot| slot.handle.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_release() {
        let mut pool: HandlePool<u32> = HandlePool::new();
        let a = pool.acquire(IconTier::Large).unwrap();
        let b = pool.acquire(IconTier::Large).unwrap();
        assert_ne!(a, b);
        assert_eq!(pool.live_count(), 2);

        let released = pool.release(a).unwrap();
        assert_eq!(released.id(), a);
        assert!(!pool.contains(a));
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn reuse_bumps_generation() {
        let mut pool: HandlePool<u32> = HandlePool::new();
        let a = pool.acquire(IconTier::Small).unwrap();
        pool.release(a).unwrap();
        let b = pool.acquire(IconTier::Small).unwrap();
        assert_eq!(b.index(), a.index());
        assert_eq!(b.generation(), a.generation() + 1);
        assert_eq!(pool.capacity(), 1);
        // Stale id is rejected.
        assert!(pool.get(a).is_none());
        assert_eq!(pool.release(a).unwrap_err(), GridError::HandleNotFound(a));
    }

    #[test]
    fn double_release_is_not_found() {
        let mut pool: HandlePool<u32> = HandlePool::new();
        let a = pool.acquire(IconTier::Small).unwrap();
        pool.release(a).unwrap();
        assert_eq!(pool.release(a).unwrap_err(), GridError::HandleNotFound(a));
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn release_all_then_reacquire_reuses_slots() {
        let mut pool: HandlePool<u32> = HandlePool::new();
        for _ in 0..4 {
            pool.acquire(IconTier::Medium).unwrap();
        }
        assert_eq!(pool.release_all().len(), 4);
        assert_eq!(pool.live_count(), 0);
        for _ in 0..4 {
            pool.acquire(IconTier::Medium).unwrap();
        }
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.iter().count(), 4);
    }

    #[test]
    fn reacquired_slot_is_unbound() {
        let mut pool: HandlePool<&str> = HandlePool::new();
        let a = pool.acquire(IconTier::Small).unwrap();
        pool.require_mut(a).unwrap().bind("cruiser").unwrap();
        pool.release(a).unwrap();
        let b = pool.acquire(IconTier::Small).unwrap();
        assert!(!pool.get(b).unwrap().is_initialized());
    }

    #[test]
    fn capped_pool_reports_exhaustion_and_recovers_on_release() {
        let mut pool: HandlePool<u32> = HandlePool::with_max_slots(2);
        let a = pool.acquire(IconTier::Small).unwrap();
        pool.acquire(IconTier::Small).unwrap();
        assert_eq!(
            pool.acquire(IconTier::Small),
            Err(GridError::PoolExhausted { max_slots: 2 })
        );
        assert_eq!(pool.live_count(), 2);
        assert_eq!(pool.capacity(), 2);

        pool.release(a).unwrap();
        let c = pool.acquire(IconTier::Small).unwrap();
        assert_eq!(c.index(), a.index());
    }
}
