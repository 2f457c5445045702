#![forbid(unsafe_code)]

//! Pooled grid controller: keeps a container's icons in step with a domain
//! collection.
//!
//! # Flow
//!
//! ```text
//! collection changed ──► rebuild ──► plan ──► tear down ──► acquire + bind
//!                                                         └► sequence insert
//!                                                         └► restore picks
//! item joined ─────────► handle_domain_item_added (incremental, re-plans)
//! item died ───────────► handle_domain_item_removed (incremental)
//! drag-drop ended ─────► apply_reorder (no-op when order is unchanged)
//! click ───────────────► handle_click ──► SelectionController ──► picked flags
//! ```
//!
//! # Invariants
//!
//! 1. Every bound handle is in the sequence and indexed by its item; every
//!    displayed item has exactly one handle (bijection).
//! 2. Every picked handle is in the sequence, and a handle's `is_picked`
//!    flag matches selection membership.
//! 3. Placeholder handles are never bound and never in the sequence.
//! 4. Operations validate before mutating; an `Err` leaves the grid as it was.
//!
//! # Failure Modes
//!
//! All errors are bookkeeping desyncs on the caller's side (stale handles,
//! unknown or duplicate items). They are logged at `error` level with the
//! offending handle or item and returned; nothing is recovered silently.

use crate::compare::{IconComparator, InsertionOrder};
use crate::cue::{CueSink, Silent, UiCue};
use crate::error::{GridError, Result};
use crate::events::{EventBus, GridEvent, Registration};
use crate::handle::{HandleId, IconHandle};
use crate::headless::HeadlessGrid;
use crate::item::GridItem;
use crate::pool::HandlePool;
use crate::selection::{SelectionController, SelectionDelta};
use crate::sequence::SortedIconSequence;
use crate::view::{GridContainer, IconView};
use ahash::{AHashMap, AHashSet};
use stargrid_core::event::ClickGesture;
use stargrid_core::geometry::Size;
use stargrid_layout::{GridLayoutPlanner, GridPlan, IconTier};

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome<Id> {
    /// The picked set changed (possibly by nothing).
    Selection(SelectionDelta),
    /// Middle click: the host should inspect this item.
    Inspect(Id),
}

/// Drives one grid of pooled icons.
pub struct PooledGridController<T, O = InsertionOrder, G = HeadlessGrid<T>>
where
    T: GridItem,
    O: IconComparator<T>,
    G: GridContainer<T>,
{
    planner: GridLayoutPlanner,
    viewport: Size,
    plan: Option<GridPlan>,
    pool: HandlePool<T::Id>,
    sequence: SortedIconSequence<Option<O::Key>>,
    selection: SelectionController,
    by_item: AHashMap<T::Id, HandleId>,
    placeholders: Vec<HandleId>,
    order: Option<O>,
    /// Whether the last rebuild sorted its items.
    sorted: bool,
    container: G,
    cues: Box<dyn CueSink>,
    registration: Option<Registration<GridEvent<T>>>,
}

impl<T, O, G> PooledGridController<T, O, G>
where
    T: GridItem,
    O: IconComparator<T>,
    G: GridContainer<T>,
{
    /// Create an empty grid over `container`, planned for `viewport`.
    pub fn new(container: G, planner: GridLayoutPlanner, viewport: Size) -> Self {
        Self {
            planner,
            viewport,
            plan: None,
            pool: HandlePool::new(),
            sequence: SortedIconSequence::new(),
            selection: SelectionController::new(),
            by_item: AHashMap::new(),
            placeholders: Vec::new(),
            order: None,
            sorted: false,
            container,
            cues: Box::new(Silent),
            registration: None,
        }
    }

    /// Route UI cues to `sink`.
    #[must_use]
    pub fn with_cues(mut self, sink: Box<dyn CueSink>) -> Self {
        self.cues = sink;
        self
    }

    /// Ordering used for domain events and for items added to a sorted
    /// grid.
    #[must_use]
    pub fn with_order(mut self, order: O) -> Self {
        self.order = Some(order);
        self
    }

    /// Cap the number of icon slots this grid may allocate.
    #[must_use]
    pub fn with_pool_limit(mut self, max_slots: u32) -> Self {
        self.pool = HandlePool::with_max_slots(max_slots);
        self
    }

    // ── Rebuild / teardown ─────────────────────────────────────────────

    /// Replace the grid's contents with `items`.
    ///
    /// With `order`, icons are sorted by it (ties keep collection order);
    /// without, they follow the collection. Picks on items that survive the
    /// rebuild are kept. Returns the new display order.
    pub fn rebuild(&mut self, items: &[T], order: Option<&O>) -> Result<Vec<HandleId>> {
        let mut seen = AHashSet::with_capacity(items.len());
        for item in items {
            let id = item.item_id();
            if !seen.insert(id.clone()) {
                tracing::error!(message = "grid.rebuild.duplicate", item = ?id);
                return Err(GridError::duplicate_item(&id));
            }
        }
        let max_slots = self.pool.max_slots();
        if items.len() > max_slots as usize {
            tracing::error!(message = "grid.rebuild.pool_full", items = items.len(), max_slots);
            return Err(GridError::PoolExhausted { max_slots });
        }

        let previous_picks: Vec<T::Id> = self
            .selection
            .picked()
            .iter()
            .filter_map(|&h| self.pool.get(h).and_then(|h| h.bound_item().cloned()))
            .collect();

        self.teardown();
        self.sorted = order.is_some();

        let plan = self.planner.plan(self.viewport, items.len());
        self.container.set_shape(&plan);
        self.plan = Some(plan);

        for item in items {
            let item_id = item.item_id();
            let id = self.pool.acquire(plan.tier)?;
            self.pool.require_mut(id)?.bind(item_id.clone())?;
            self.container.add_child(id, plan.tier).bind(item);
            self.sequence.insert(id, order.map(|o| o.sort_key(item)))?;
            self.by_item.insert(item_id, id);
        }
        let ids = self.sequence.ids();
        self.container.reposition(&ids);

        let mut restored = 0usize;
        for item in &previous_picks {
            if let Some(&id) = self.by_item.get(item) {
                let delta = self.selection.toggle_with_ctrl(id, &self.sequence)?;
                self.apply_delta(&delta);
                restored += 1;
            }
        }

        tracing::debug!(
            message = "grid.rebuild",
            items = items.len(),
            tier = %plan.tier,
            columns = plan.columns,
            rows = plan.rows,
            overflow = plan.overflow,
            sorted = order.is_some(),
            restored_picks = restored,
            pool_capacity = self.pool.capacity(),
        );
        Ok(ids)
    }

    /// Release every handle and view, tolerating unbound placeholders.
    fn teardown(&mut self) {
        for handle in self.pool.release_all() {
            if let Some(view) = self.container.child_mut(handle.id()) {
                view.unbind();
            }
            self.container.remove_child(handle.id());
            // Placeholders were never bound and have no domain bookkeeping.
            if let Some(item) = handle.bound_item() {
                self.by_item.remove(item);
            }
        }
        self.by_item.clear();
        self.placeholders.clear();
        self.sequence.clear();
        self.selection.clear();
        self.sorted = false;
    }

    /// Clear the grid for reuse in a different context. Idempotent.
    pub fn reset(&mut self) {
        let released = self.pool.live_count();
        self.teardown();
        self.plan = None;
        tracing::debug!(message = "grid.reset", released);
    }

    // ── Incremental updates ────────────────────────────────────────────

    /// Show a domain item that joined the collection, without a rebuild.
    ///
    /// In a grid last rebuilt sorted, the icon takes its sorted position
    /// under the [`with_order`](Self::with_order) ordering. Unsorted grids,
    /// grids the user rearranged, and sorted grids with no ordering to key
    /// the item append it. Other icons keep their handles and bindings; the
    /// grid is re-planned, so growth can move every icon to a smaller tier.
    pub fn handle_domain_item_added(&mut self, item: &T) -> Result<HandleId> {
        let item_id = item.item_id();
        if self.by_item.contains_key(&item_id) {
            tracing::error!(message = "grid.add.duplicate", item = ?item_id);
            return Err(GridError::duplicate_item(&item_id));
        }
        let plan = self.planner.plan(self.viewport, self.sequence.len() + 1);
        let id = self.pool.acquire(plan.tier)?;
        let position = match self.insert_added(id, item) {
            Ok(position) => position,
            Err(err) => {
                self.pool.release(id)?;
                return Err(err);
            }
        };
        self.pool.require_mut(id)?.bind(item_id.clone())?;
        self.container.add_child(id, plan.tier).bind(item);
        self.by_item.insert(item_id, id);
        self.apply_plan(plan);
        tracing::debug!(
            message = "grid.add",
            handle = %id,
            position,
            manual = self.sequence.is_manual(),
            tier = %plan.tier,
        );
        Ok(id)
    }

    fn insert_added(&mut self, id: HandleId, item: &T) -> Result<usize> {
        match (&self.order, self.sorted) {
            (Some(order), true) => self.sequence.insert(id, Some(order.sort_key(item))),
            // No ordering to key the item with; keep the sort and append.
            (None, true) => self.sequence.push(id, None),
            (_, false) => self.sequence.insert(id, None),
        }
    }

    /// Drop the icon bound to a removed domain item.
    ///
    /// Other icons keep their handles, bindings, and relative order.
    pub fn handle_domain_item_removed(&mut self, item: &T::Id) -> Result<()> {
        let Some(&id) = self.by_item.get(item) else {
            tracing::error!(message = "grid.remove.unknown_item", item = ?item);
            return Err(GridError::item_not_found(item));
        };
        self.sequence.remove(id)?;
        let was_picked = self.selection.forget(id);
        self.by_item.remove(item);
        self.pool.release(id)?;
        if let Some(view) = self.container.child_mut(id) {
            view.unbind();
        }
        self.container.remove_child(id);
        self.container.reposition(&self.sequence.ids());
        tracing::debug!(
            message = "grid.remove",
            handle = %id,
            was_picked,
            remaining = self.sequence.len(),
        );
        Ok(())
    }

    /// Apply a drag-drop result given as the new item order.
    ///
    /// Returns `false` without side effects when the order is unchanged, so
    /// callers only forward real reorders to the domain.
    pub fn apply_reorder(&mut self, new_order: &[T::Id]) -> Result<bool> {
        let mut ids = Vec::with_capacity(new_order.len());
        for item in new_order {
            match self.by_item.get(item) {
                Some(&id) => ids.push(id),
                None => {
                    tracing::error!(message = "grid.reorder.unknown_item", item = ?item);
                    return Err(GridError::item_not_found(item));
                }
            }
        }
        if !self.sequence.differs_from(&ids) {
            return Ok(false);
        }
        self.sequence.reorder(&ids)?;
        self.container.reposition(&ids);
        self.cues.play(UiCue::Reorder);
        tracing::debug!(message = "grid.reorder", items = ids.len());
        Ok(true)
    }

    /// Re-plan for a new container size, retiering live icons if needed.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        if self.plan.is_none() {
            return;
        }
        let plan = self.planner.plan(viewport, self.sequence.len());
        self.apply_plan(plan);
        tracing::debug!(message = "grid.resize", tier = %plan.tier, columns = plan.columns);
    }

    /// Adopt `plan`, retiering every live icon and placeholder when the tier
    /// changed.
    fn apply_plan(&mut self, plan: GridPlan) {
        if self.plan.is_some_and(|old| old.tier != plan.tier) {
            let live = self.sequence.iter().chain(self.placeholders.iter().copied());
            for id in live {
                if let Some(handle) = self.pool.get_mut(id) {
                    handle.set_tier(plan.tier);
                }
                if let Some(view) = self.container.child_mut(id) {
                    view.set_tier(plan.tier);
                }
            }
        }
        self.container.set_shape(&plan);
        self.container.reposition(&self.sequence.ids());
        self.plan = Some(plan);
    }

    /// Add an unbound debug placeholder icon.
    ///
    /// Placeholders sit outside the sequence and cannot be picked; teardown
    /// releases them with everything else.
    pub fn spawn_placeholder(&mut self) -> Result<HandleId> {
        let tier = self
            .plan
            .map(|p| p.tier)
            .unwrap_or_else(|| self.planner.tiers().largest().tier);
        let id = self.pool.acquire(tier)?;
        self.container.add_child(id, tier);
        self.placeholders.push(id);
        Ok(id)
    }

    // ── Input ──────────────────────────────────────────────────────────

    /// Apply an already-classified click on `id`.
    pub fn handle_click(
        &mut self,
        id: HandleId,
        gesture: ClickGesture,
    ) -> Result<ClickOutcome<T::Id>> {
        let delta = match gesture {
            ClickGesture::Plain => self.selection.pick_single(id, &self.sequence)?,
            ClickGesture::Ctrl => self.selection.toggle_with_ctrl(id, &self.sequence)?,
            ClickGesture::Shift => self.selection.range_pick_with_shift(id, &self.sequence)?,
            ClickGesture::Middle => {
                let item = self
                    .sequence
                    .contains(id)
                    .then(|| self.pool.get(id).and_then(|h| h.bound_item().cloned()))
                    .flatten()
                    .ok_or(GridError::InvalidSelection(id))?;
                return Ok(ClickOutcome::Inspect(item));
            }
        };
        self.apply_delta(&delta);
        if !delta.picked.is_empty() {
            self.cues.play(UiCue::Pick);
        } else if !delta.unpicked.is_empty() {
            self.cues.play(UiCue::Unpick);
        }
        Ok(ClickOutcome::Selection(delta))
    }

    fn apply_delta(&mut self, delta: &SelectionDelta) {
        let changes = delta
            .unpicked
            .iter()
            .map(|&id| (id, false))
            .chain(delta.picked.iter().map(|&id| (id, true)));
        for (id, picked) in changes {
            if let Some(handle) = self.pool.get_mut(id) {
                handle.set_picked(picked);
            }
            if let Some(view) = self.container.child_mut(id) {
                view.set_picked(picked);
            }
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn sequence(&self) -> &SortedIconSequence<Option<O::Key>> {
        &self.sequence
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn handle(&self, id: HandleId) -> Option<&IconHandle<T::Id>> {
        self.pool.get(id)
    }

    /// Handle bound to a domain item.
    pub fn handle_for(&self, item: &T::Id) -> Option<HandleId> {
        self.by_item.get(item).copied()
    }

    /// Domain item bound to a handle.
    pub fn item_for(&self, id: HandleId) -> Option<&T::Id> {
        self.pool.get(id).and_then(IconHandle::bound_item)
    }

    /// Picked items in display order, ready to forward to a domain manager.
    pub fn picked_items(&self) -> Vec<T::Id> {
        self.selection
            .picked_in_order(&self.sequence)
            .into_iter()
            .filter_map(|id| self.item_for(id).cloned())
            .collect()
    }

    /// Items in display order.
    pub fn items(&self) -> Vec<T::Id> {
        self.sequence
            .iter()
            .filter_map(|id| self.item_for(id).cloned())
            .collect()
    }

    /// Layout from the last rebuild or resize.
    pub fn plan(&self) -> Option<&GridPlan> {
        self.plan.as_ref()
    }

    /// Tier icons are currently shown at.
    pub fn tier(&self) -> Option<IconTier> {
        self.plan.map(|p| p.tier)
    }

    pub fn container(&self) -> &G {
        &self.container
    }

    pub fn placeholders(&self) -> &[HandleId] {
        &self.placeholders
    }

    /// Number of displayed items.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Slots allocated by the pool over the grid's lifetime.
    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Check the bookkeeping invariants.
    ///
    /// Returns a list of violations; empty means consistent.
    #[must_use]
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.by_item.len() != self.sequence.len() {
            errors.push(format!(
                "{} indexed items but {} sequenced handles",
                self.by_item.len(),
                self.sequence.len()
            ));
        }
        for (item, &id) in &self.by_item {
            match self.pool.get(id) {
                Some(handle) if handle.bound_item() == Some(item) => {}
                Some(_) => errors.push(format!("handle {id} is not bound to {item:?}")),
                None => errors.push(format!("handle {id} for {item:?} is not live")),
            }
            if !self.sequence.contains(id) {
                errors.push(format!("handle {id} for {item:?} is not sequenced"));
            }
        }
        for &id in self.selection.picked() {
            if !self.sequence.contains(id) {
                errors.push(format!("picked handle {id} is not sequenced"));
            }
        }
        for handle in self.pool.iter() {
            if handle.is_picked() != self.selection.is_picked(handle.id()) {
                errors.push(format!("handle {} picked flag is stale", handle.id()));
            }
        }
        if self.selection.anchor() != self.selection.picked().last().copied() {
            errors.push("anchor is not the latest pick".to_owned());
        }
        for &id in &self.placeholders {
            if self.pool.get(id).is_some_and(IconHandle::is_initialized) {
                errors.push(format!("placeholder {id} is bound"));
            }
        }
        if self.pool.live_count() != self.sequence.len() + self.placeholders.len() {
            errors.push(format!(
                "{} live handles for {} icons and {} placeholders",
                self.pool.live_count(),
                self.sequence.len(),
                self.placeholders.len()
            ));
        }
        errors
    }
}

impl<T, O, G> PooledGridController<T, O, G>
where
    T: GridItem + Clone,
    O: IconComparator<T>,
    G: GridContainer<T>,
{
    /// Register for domain events on `bus`, replacing any earlier
    /// registration.
    pub fn attach(&mut self, bus: &EventBus<GridEvent<T>>) {
        self.registration = Some(bus.subscribe());
    }

    /// Drop the event registration.
    pub fn detach(&mut self) {
        self.registration = None;
    }

    pub fn is_attached(&self) -> bool {
        self.registration.is_some()
    }

    /// Apply every pending domain event in publish order.
    ///
    /// Stops at the first failing event and returns its error; events after
    /// it in the same batch are discarded with a `warn` diagnostic. Returns
    /// the number applied.
    pub fn process_events(&mut self) -> Result<usize> {
        let Some(registration) = &self.registration else {
            return Ok(0);
        };
        let events = registration.drain();
        let total = events.len();
        for (applied, event) in events.into_iter().enumerate() {
            if let Err(err) = self.apply_event(event) {
                let discarded = total - applied - 1;
                if discarded > 0 {
                    tracing::warn!(
                        message = "grid.events.discarded",
                        applied,
                        discarded,
                        error = %err,
                    );
                }
                return Err(err);
            }
        }
        Ok(total)
    }

    fn apply_event(&mut self, event: GridEvent<T>) -> Result<()> {
        match event {
            GridEvent::CollectionChanged(items) => {
                let order = self.order.take();
                let result = self.rebuild(&items, order.as_ref());
                self.order = order;
                result.map(drop)
            }
            GridEvent::ItemAdded(item) => self.handle_domain_item_added(&item).map(drop),
            GridEvent::ItemRemoved(item) => self.handle_domain_item_removed(&item),
            GridEvent::Reordered(items) => self.apply_reorder(&items).map(drop),
        }
    }
}
