#![forbid(unsafe_code)]

//! Icon handles: the binding between one visual slot and one domain item.
//!
//! # State Machine
//!
//! ```text
//! Unbound --bind--> Bound --release--> (slot freed)
//! ```
//!
//! A handle is bound at most once. There is no way back to `Unbound`
//! short of releasing the handle to its [`HandlePool`](crate::pool::HandlePool);
//! the slot's next occupant gets a new generation and therefore a new
//! [`HandleId`].

use crate::error::{GridError, Result};
use stargrid_layout::IconTier;
use std::fmt;

/// Identity of a visual slot.
///
/// `index` addresses an arena slot; `generation` distinguishes successive
/// occupants of that slot so a stale id never aliases a live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId {
    index: u32,
    generation: u32,
}

impl HandleId {
    /// Build an id from its raw parts.
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Occupancy generation of the slot.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}v{}", self.index, self.generation)
    }
}

/// Lifecycle state of a live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Unbound,
    Bound,
}

/// One visual slot, bound to zero or one domain item.
///
/// Renderers read `is_picked`, `tier`, and `bound_item`; only the owning
/// controller writes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconHandle<K> {
    id: HandleId,
    bound: Option<K>,
    picked: bool,
    tier: IconTier,
}

impl<K> IconHandle<K> {
    pub(crate) fn new(id: HandleId, tier: IconTier) -> Self {
        Self {
            id,
            bound: None,
            picked: false,
            tier,
        }
    }

    #[inline]
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Identity of the bound domain item.
    #[inline]
    pub fn bound_item(&self) -> Option<&K> {
        self.bound.as_ref()
    }

    #[inline]
    pub fn is_picked(&self) -> bool {
        self.picked
    }

    #[inline]
    pub fn tier(&self) -> IconTier {
        self.tier
    }

    /// True once an item has been bound since the handle was created.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    pub fn state(&self) -> HandleState {
        if self.is_initialized() {
            HandleState::Bound
        } else {
            HandleState::Unbound
        }
    }

    /// Bind the handle to a domain item. Rebinding is an error.
    pub(crate) fn bind(&mut self, item: K) -> Result<()> {
        if self.bound.is_some() {
            return Err(GridError::AlreadyBound(self.id));
        }
        self.bound = Some(item);
        Ok(())
    }

    pub(crate) fn set_picked(&mut self, picked: bool) {
        self.picked = picked;
    }

    pub(crate) fn set_tier(&mut self, tier: IconTier) {
        self.tier = tier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_once() {
        let id = HandleId::from_raw_parts(0, 0);
        let mut handle = IconHandle::new(id, IconTier::Small);
        assert_eq!(handle.state(), HandleState::Unbound);
        assert!(!handle.is_initialized());

        handle.bind("scout").unwrap();
        assert_eq!(handle.state(), HandleState::Bound);
        assert_eq!(handle.bound_item(), Some(&"scout"));

        assert_eq!(handle.bind("frigate"), Err(GridError::AlreadyBound(id)));
        assert_eq!(handle.bound_item(), Some(&"scout"));
    }

    #[test]
    fn display_includes_generation() {
        assert_eq!(HandleId::from_raw_parts(12, 4).to_string(), "H12v4");
    }
}
