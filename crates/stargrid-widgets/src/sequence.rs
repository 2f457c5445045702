#![forbid(unsafe_code)]

//! Canonical display order of a grid's icons.
//!
//! Each entry carries a sort key and the insertion index it was given. The
//! order is `(key, insertion)` lexicographic, so ties between equal keys keep
//! their arrival order and repositioning is deterministic. A grid without a
//! comparator uses `()` keys (or all-`None` keys), which degenerates to plain
//! insertion order.
//!
//! After a drag-drop [`reorder`](SortedIconSequence::reorder) the sequence is
//! in *manual* mode: the user's arrangement wins and later inserts append.
//!
//! # Invariants
//!
//! 1. No handle appears twice.
//! 2. In sorted mode, entries are non-decreasing by `(key, insertion)`.
//! 3. `index_of` returns `None` for handles not in the sequence; callers
//!    never index with it blindly.

use crate::error::{GridError, Result};
use crate::handle::HandleId;
use ahash::AHashSet;

#[derive(Debug, Clone)]
struct Entry<S> {
    id: HandleId,
    key: S,
    insertion: u64,
}

/// Ordered list of icon handles.
#[derive(Debug, Clone)]
pub struct SortedIconSequence<S> {
    entries: Vec<Entry<S>>,
    next_insertion: u64,
    manual: bool,
}

impl<S> Default for SortedIconSequence<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_insertion: 0,
            manual: false,
        }
    }
}

impl<S: Ord> SortedIconSequence<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle at its sorted position and return that position.
    ///
    /// Equal keys keep insertion order. In manual mode the handle is
    /// appended.
    pub fn insert(&mut self, id: HandleId, key: S) -> Result<usize> {
        if self.contains(id) {
            return Err(GridError::DuplicateHandle(id));
        }
        let insertion = self.next_insertion;
        self.next_insertion += 1;
        let position = if self.manual {
            self.entries.len()
        } else {
            // New insertion index is the largest so far, so it goes after
            // every entry with an equal key.
            self.entries.partition_point(|e| e.key <= key)
        };
        self.entries.insert(position, Entry { id, key, insertion });
        Ok(position)
    }

    /// Append a handle regardless of its key and switch to manual mode.
    pub fn push(&mut self, id: HandleId, key: S) -> Result<usize> {
        if self.contains(id) {
            return Err(GridError::DuplicateHandle(id));
        }
        self.manual = true;
        self.insert(id, key)
    }

    /// Remove a handle, returning its sort key.
    pub fn remove(&mut self, id: HandleId) -> Result<S> {
        let index = self.index_of(id).ok_or(GridError::HandleNotFound(id))?;
        Ok(self.entries.remove(index).key)
    }

    /// Replace the order wholesale with a user-arranged permutation.
    ///
    /// Fails without changing anything unless `new_order` lists exactly the
    /// current handles, each once.
    pub fn reorder(&mut self, new_order: &[HandleId]) -> Result<()> {
        if new_order.len() != self.entries.len() {
            return Err(GridError::ReorderMismatch {
                expected: self.entries.len(),
                actual: new_order.len(),
            });
        }
        let mut seen = AHashSet::with_capacity(new_order.len());
        for &id in new_order {
            if !self.contains(id) {
                return Err(GridError::HandleNotFound(id));
            }
            if !seen.insert(id) {
                return Err(GridError::DuplicateHandle(id));
            }
        }

        let mut old: Vec<Option<Entry<S>>> = std::mem::take(&mut self.entries)
            .into_iter()
            .map(Some)
            .collect();
        for &id in new_order {
            let taken = old
                .iter_mut()
                .find_map(|slot| slot.take_if(|e| e.id == id));
            if let Some(mut entry) = taken {
                entry.insertion = self.next_insertion;
                self.next_insertion += 1;
                self.entries.push(entry);
            }
        }
        self.manual = true;
        Ok(())
    }

    /// Whether `new_order` differs from the current order.
    #[must_use]
    pub fn differs_from(&self, new_order: &[HandleId]) -> bool {
        new_order.len() != self.entries.len()
            || self
                .entries
                .iter()
                .zip(new_order)
                .any(|(entry, &id)| entry.id != id)
    }

    /// Drop every entry and return to sorted mode.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_insertion = 0;
        self.manual = false;
    }

    /// Position of a handle, or `None` if it is not in view.
    #[must_use]
    pub fn index_of(&self, id: HandleId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    #[inline]
    pub fn contains(&self, id: HandleId) -> bool {
        self.index_of(id).is_some()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<HandleId> {
        self.entries.get(index).map(|e| e.id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True after a user reorder, until the next `clear`.
    #[inline]
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Handles in display order.
    pub fn iter(&self) -> impl Iterator<Item = HandleId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Handles in display order, collected.
    #[must_use]
    pub fn ids(&self) -> Vec<HandleId> {
        self.iter().collect()
    }

    /// Handles between two positions, inclusive, in display order.
    ///
    /// The bounds may be given in either order.
    pub fn span(&self, a: usize, b: usize) -> impl Iterator<Item = HandleId> + '_ {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.entries
            .iter()
            .skip(lo)
            .take(hi.saturating_sub(lo) + 1)
            .map(|e| e.id)
    }

    #[cfg(test)]
    fn keys_in_order(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| (&w[0].key, w[0].insertion) <= (&w[1].key, w[1].insertion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(i: u32) -> HandleId {
        HandleId::from_raw_parts(i, 0)
    }

    #[test]
    fn unit_keys_keep_insertion_order() {
        let mut seq = SortedIconSequence::new();
        for i in 0..5 {
            assert_eq!(seq.insert(h(i), ()).unwrap(), i as usize);
        }
        assert_eq!(seq.ids(), (0..5).map(h).collect::<Vec<_>>());
    }

    #[test]
    fn keyed_insert_sorts_and_breaks_ties_by_arrival() {
        let mut seq = SortedIconSequence::new();
        seq.insert(h(0), 30).unwrap();
        seq.insert(h(1), 10).unwrap();
        seq.insert(h(2), 30).unwrap();
        seq.insert(h(3), 20).unwrap();
        seq.insert(h(4), 10).unwrap();
        assert_eq!(seq.ids(), vec![h(1), h(4), h(3), h(0), h(2)]);
        assert!(seq.keys_in_order());
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut seq = SortedIconSequence::new();
        seq.insert(h(0), ()).unwrap();
        assert_eq!(seq.insert(h(0), ()), Err(GridError::DuplicateHandle(h(0))));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn remove_compacts() {
        let mut seq = SortedIconSequence::new();
        for i in 0..4 {
            seq.insert(h(i), ()).unwrap();
        }
        seq.remove(h(1)).unwrap();
        assert_eq!(seq.ids(), vec![h(0), h(2), h(3)]);
        assert_eq!(seq.index_of(h(2)), Some(1));
        assert_eq!(seq.index_of(h(1)), None);
        assert_eq!(seq.remove(h(1)), Err(GridError::HandleNotFound(h(1))));
    }

    #[test]
    fn reorder_switches_to_manual_and_appends_after() {
        let mut seq = SortedIconSequence::new();
        seq.insert(h(0), 1).unwrap();
        seq.insert(h(1), 2).unwrap();
        seq.insert(h(2), 3).unwrap();
        seq.reorder(&[h(2), h(0), h(1)]).unwrap();
        assert!(seq.is_manual());
        assert_eq!(seq.ids(), vec![h(2), h(0), h(1)]);

        // A smaller key would sort first, but manual mode appends.
        seq.insert(h(3), 0).unwrap();
        assert_eq!(seq.ids(), vec![h(2), h(0), h(1), h(3)]);

        seq.clear();
        assert!(!seq.is_manual());
        assert!(seq.is_empty());
    }

    #[test]
    fn push_appends_and_goes_manual() {
        let mut seq = SortedIconSequence::new();
        seq.insert(h(0), 5).unwrap();
        seq.insert(h(1), 9).unwrap();
        assert_eq!(seq.push(h(2), 1).unwrap(), 2);
        assert!(seq.is_manual());
        assert_eq!(seq.ids(), vec![h(0), h(1), h(2)]);
        assert_eq!(seq.push(h(2), 1), Err(GridError::DuplicateHandle(h(2))));
    }

    #[test]
    fn reorder_must_be_a_permutation() {
        let mut seq = SortedIconSequence::new();
        seq.insert(h(0), ()).unwrap();
        seq.insert(h(1), ()).unwrap();

        assert_eq!(
            seq.reorder(&[h(0)]),
            Err(GridError::ReorderMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            seq.reorder(&[h(0), h(0)]),
            Err(GridError::DuplicateHandle(h(0)))
        );
        assert_eq!(
            seq.reorder(&[h(0), h(9)]),
            Err(GridError::HandleNotFound(h(9)))
        );
        assert!(!seq.is_manual());
        assert_eq!(seq.ids(), vec![h(0), h(1)]);
    }

    #[test]
    fn differs_from_detects_identity_reorders() {
        let mut seq = SortedIconSequence::new();
        seq.insert(h(0), ()).unwrap();
        seq.insert(h(1), ()).unwrap();
        assert!(!seq.differs_from(&[h(0), h(1)]));
        assert!(seq.differs_from(&[h(1), h(0)]));
        assert!(seq.differs_from(&[h(0)]));
    }

    #[test]
    fn span_is_direction_agnostic() {
        let mut seq = SortedIconSequence::new();
        for i in 0..6 {
            seq.insert(h(i), ()).unwrap();
        }
        let forward: Vec<_> = seq.span(1, 3).collect();
        let backward: Vec<_> = seq.span(3, 1).collect();
        assert_eq!(forward, vec![h(1), h(2), h(3)]);
        assert_eq!(forward, backward);
        assert_eq!(seq.span(4, 4).collect::<Vec<_>>(), vec![h(4)]);
    }
}
