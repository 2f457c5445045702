#![forbid(unsafe_code)]

//! Multi-select over a [`SortedIconSequence`].
//!
//! # Gestures
//!
//! - **Single**: replace the picked set with one handle.
//! - **Ctrl toggle**: add or remove one handle. Removing the only pick is a
//!   no-op, so ctrl-clicking never empties a selection.
//! - **Shift range**: replace the picked set with the contiguous run between
//!   the anchor and the clicked handle, in either direction.
//!
//! # Invariants
//!
//! 1. Every picked handle is in the sequence the last operation saw.
//! 2. The anchor, when set, is the most recently picked handle still picked.
//! 3. A failed operation changes nothing.
//!
//! Each operation returns a [`SelectionDelta`] listing the handles whose
//! picked flag must flip; the controller applies it to the icon handles.

use crate::error::{GridError, Result};
use crate::handle::HandleId;
use crate::sequence::SortedIconSequence;

/// Handles whose picked flag changed during one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub picked: Vec<HandleId>,
    pub unpicked: Vec<HandleId>,
}

impl SelectionDelta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.picked.is_empty() && self.unpicked.is_empty()
    }

    fn between(old: &[HandleId], new: &[HandleId]) -> Self {
        Self {
            picked: new.iter().filter(|id| !old.contains(id)).copied().collect(),
            unpicked: old.iter().filter(|id| !new.contains(id)).copied().collect(),
        }
    }
}

/// Picked set and anchor for one grid.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    /// Insertion-ordered; the last element is the anchor.
    picked: Vec<HandleId>,
    anchor: Option<HandleId>,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn require<S: Ord>(id: HandleId, seq: &SortedIconSequence<S>) -> Result<usize> {
        seq.index_of(id).ok_or_else(|| {
            tracing::error!(message = "grid.selection.stale", handle = %id);
            GridError::InvalidSelection(id)
        })
    }

    fn replace(&mut self, new: Vec<HandleId>, action: &'static str) -> SelectionDelta {
        let delta = SelectionDelta::between(&self.picked, &new);
        self.picked = new;
        self.anchor = self.picked.last().copied();
        self.log_selection_change(action);
        delta
    }

    fn log_selection_change(&self, action: &'static str) {
        tracing::debug!(
            message = "grid.selection",
            action,
            picked = self.picked.len(),
            anchor = ?self.anchor,
        );
    }

    /// Pick only `id`.
    pub fn pick_single<S: Ord>(
        &mut self,
        id: HandleId,
        seq: &SortedIconSequence<S>,
    ) -> Result<SelectionDelta> {
        Self::require(id, seq)?;
        Ok(self.replace(vec![id], "single"))
    }

    /// Ctrl-click: toggle `id`, keeping at least one pick.
    pub fn toggle_with_ctrl<S: Ord>(
        &mut self,
        id: HandleId,
        seq: &SortedIconSequence<S>,
    ) -> Result<SelectionDelta> {
        Self::require(id, seq)?;
        let mut new = self.picked.clone();
        if let Some(pos) = new.iter().position(|&p| p == id) {
            if new.len() == 1 {
                return Ok(SelectionDelta::default());
            }
            new.remove(pos);
        } else {
            new.push(id);
        }
        Ok(self.replace(new, "ctrl_toggle"))
    }

    /// Shift-click: pick the run between the anchor and `id`.
    ///
    /// With nothing picked (or an anchor that left the sequence) the run
    /// starts at the first icon. The clicked handle becomes the anchor.
    pub fn range_pick_with_shift<S: Ord>(
        &mut self,
        id: HandleId,
        seq: &SortedIconSequence<S>,
    ) -> Result<SelectionDelta> {
        let target = Self::require(id, seq)?;
        let start = self
            .anchor
            .filter(|_| !self.picked.is_empty())
            .and_then(|anchor| seq.index_of(anchor))
            .unwrap_or(0);

        let mut new: Vec<HandleId> = seq.span(start, target).collect();
        // Keep the clicked handle last so it becomes the anchor.
        if target < start {
            new.reverse();
        }
        Ok(self.replace(new, "shift_range"))
    }

    /// Drop a handle that left the sequence. Returns whether it was picked.
    pub fn forget(&mut self, id: HandleId) -> bool {
        let Some(pos) = self.picked.iter().position(|&p| p == id) else {
            return false;
        };
        self.picked.remove(pos);
        self.anchor = self.picked.last().copied();
        self.log_selection_change("forget");
        true
    }

    /// Drop every pick that is no longer in `seq`; returns the dropped handles.
    pub fn retain_in<S: Ord>(&mut self, seq: &SortedIconSequence<S>) -> Vec<HandleId> {
        let (kept, dropped): (Vec<_>, Vec<_>) =
            self.picked.iter().copied().partition(|&id| seq.contains(id));
        if !dropped.is_empty() {
            self.picked = kept;
            self.anchor = self.picked.last().copied();
            self.log_selection_change("retain");
        }
        dropped
    }

    /// Unpick everything; returns the handles that were picked.
    pub fn clear(&mut self) -> Vec<HandleId> {
        self.anchor = None;
        std::mem::take(&mut self.picked)
    }

    /// Picked handles, oldest pick first.
    #[inline]
    pub fn picked(&self) -> &[HandleId] {
        &self.picked
    }

    /// Picked handles in display order.
    pub fn picked_in_order<S: Ord>(&self, seq: &SortedIconSequence<S>) -> Vec<HandleId> {
        seq.iter().filter(|id| self.picked.contains(id)).collect()
    }

    #[inline]
    pub fn anchor(&self) -> Option<HandleId> {
        self.anchor
    }

    #[inline]
    pub fn is_picked(&self, id: HandleId) -> bool {
        self.picked.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.picked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(i: u32) -> HandleId {
        HandleId::from_raw_parts(i, 0)
    }

    fn seq_of(n: u32) -> SortedIconSequence<()> {
        let mut seq = SortedIconSequence::new();
        for i in 0..n {
            seq.insert(h(i), ()).unwrap();
        }
        seq
    }

    fn set(ids: &[u32]) -> Vec<HandleId> {
        ids.iter().copied().map(h).collect()
    }

    fn sorted(mut v: Vec<HandleId>) -> Vec<HandleId> {
        v.sort();
        v
    }

    #[test]
    fn single_pick_replaces() {
        let seq = seq_of(3);
        let mut sel = SelectionController::new();
        sel.pick_single(h(0), &seq).unwrap();
        let delta = sel.pick_single(h(2), &seq).unwrap();
        assert_eq!(sel.picked(), &set(&[2]));
        assert_eq!(sel.anchor(), Some(h(2)));
        assert_eq!(delta.picked, set(&[2]));
        assert_eq!(delta.unpicked, set(&[0]));
    }

    #[test]
    fn shift_range_forward_from_anchor() {
        let seq = seq_of(10);
        let mut sel = SelectionController::new();
        sel.pick_single(h(3), &seq).unwrap();
        sel.range_pick_with_shift(h(7), &seq).unwrap();
        assert_eq!(sorted(sel.picked().to_vec()), set(&[3, 4, 5, 6, 7]));
        assert_eq!(sel.anchor(), Some(h(7)));
    }

    #[test]
    fn shift_range_backward_from_anchor() {
        let seq = seq_of(10);
        let mut sel = SelectionController::new();
        sel.pick_single(h(3), &seq).unwrap();
        sel.range_pick_with_shift(h(1), &seq).unwrap();
        assert_eq!(sorted(sel.picked().to_vec()), set(&[1, 2, 3]));
        assert_eq!(sel.anchor(), Some(h(1)));
    }

    #[test]
    fn shift_range_from_empty_starts_at_zero() {
        let seq = seq_of(6);
        let mut sel = SelectionController::new();
        sel.range_pick_with_shift(h(2), &seq).unwrap();
        assert_eq!(sel.picked(), &set(&[0, 1, 2]));
        assert_eq!(sel.anchor(), Some(h(2)));
    }

    #[test]
    fn shift_range_replaces_rather_than_unions() {
        let seq = seq_of(10);
        let mut sel = SelectionController::new();
        sel.pick_single(h(8), &seq).unwrap();
        sel.toggle_with_ctrl(h(1), &seq).unwrap();
        // Anchor is now 1.
        let delta = sel.range_pick_with_shift(h(3), &seq).unwrap();
        assert_eq!(sorted(sel.picked().to_vec()), set(&[1, 2, 3]));
        assert_eq!(delta.unpicked, set(&[8]));
    }

    #[test]
    fn ctrl_toggle_keeps_last_pick() {
        let seq = seq_of(3);
        let mut sel = SelectionController::new();
        sel.pick_single(h(0), &seq).unwrap();
        let delta = sel.toggle_with_ctrl(h(0), &seq).unwrap();
        assert!(delta.is_empty());
        assert_eq!(sel.picked(), &set(&[0]));
        assert_eq!(sel.anchor(), Some(h(0)));
    }

    #[test]
    fn ctrl_toggle_removes_when_more_remain() {
        let seq = seq_of(3);
        let mut sel = SelectionController::new();
        sel.pick_single(h(0), &seq).unwrap();
        sel.toggle_with_ctrl(h(1), &seq).unwrap();
        let delta = sel.toggle_with_ctrl(h(0), &seq).unwrap();
        assert_eq!(sel.picked(), &set(&[1]));
        assert_eq!(delta.unpicked, set(&[0]));
        assert_eq!(sel.anchor(), Some(h(1)));
    }

    #[test]
    fn ctrl_unpicking_anchor_moves_it_to_latest_remaining() {
        let seq = seq_of(4);
        let mut sel = SelectionController::new();
        sel.pick_single(h(0), &seq).unwrap();
        sel.toggle_with_ctrl(h(2), &seq).unwrap();
        sel.toggle_with_ctrl(h(3), &seq).unwrap();
        assert_eq!(sel.anchor(), Some(h(3)));
        sel.toggle_with_ctrl(h(3), &seq).unwrap();
        assert_eq!(sel.anchor(), Some(h(2)));
    }

    #[test]
    fn ctrl_pick_from_empty() {
        let seq = seq_of(2);
        let mut sel = SelectionController::new();
        sel.toggle_with_ctrl(h(1), &seq).unwrap();
        assert_eq!(sel.picked(), &set(&[1]));
        assert_eq!(sel.anchor(), Some(h(1)));
    }

    #[test]
    fn stale_handle_is_invalid_and_changes_nothing() {
        let seq = seq_of(2);
        let mut sel = SelectionController::new();
        sel.pick_single(h(0), &seq).unwrap();
        let stale = h(9);
        assert_eq!(
            sel.pick_single(stale, &seq),
            Err(GridError::InvalidSelection(stale))
        );
        assert_eq!(
            sel.range_pick_with_shift(stale, &seq),
            Err(GridError::InvalidSelection(stale))
        );
        assert_eq!(sel.picked(), &set(&[0]));
    }

    #[test]
    fn forget_and_retain() {
        let mut seq = seq_of(4);
        let mut sel = SelectionController::new();
        sel.range_pick_with_shift(h(3), &seq).unwrap();
        assert!(sel.forget(h(3)));
        assert!(!sel.forget(h(3)));
        assert_eq!(sel.anchor(), Some(h(2)));

        seq.remove(h(1)).unwrap();
        assert_eq!(sel.retain_in(&seq), set(&[1]));
        assert_eq!(sel.picked_in_order(&seq), set(&[0, 2]));

        assert_eq!(sel.clear().len(), 2);
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), None);
    }
}
