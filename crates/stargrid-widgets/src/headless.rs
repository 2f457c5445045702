#![forbid(unsafe_code)]

//! In-memory container for hosts without a widget tree (servers, tests).

use crate::handle::HandleId;
use crate::item::GridItem;
use crate::view::{GridContainer, IconView};
use ahash::AHashMap;
use stargrid_layout::{GridPlan, IconTier};
use std::marker::PhantomData;

/// Recorded state of one headless icon.
pub struct HeadlessIcon<T: GridItem> {
    pub item: Option<T::Id>,
    pub picked: bool,
    pub tier: IconTier,
}

impl<T: GridItem> HeadlessIcon<T> {
    fn new(tier: IconTier) -> Self {
        Self {
            item: None,
            picked: false,
            tier,
        }
    }
}

impl<T: GridItem> Clone for HeadlessIcon<T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            picked: self.picked,
            tier: self.tier,
        }
    }
}

impl<T: GridItem> std::fmt::Debug for HeadlessIcon<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessIcon")
            .field("item", &self.item)
            .field("picked", &self.picked)
            .field("tier", &self.tier)
            .finish()
    }
}

impl<T: GridItem> IconView<T> for HeadlessIcon<T> {
    fn bind(&mut self, item: &T) {
        self.item = Some(item.item_id());
    }

    fn unbind(&mut self) {
        self.item = None;
    }

    fn set_picked(&mut self, picked: bool) {
        self.picked = picked;
    }

    fn set_tier(&mut self, tier: IconTier) {
        self.tier = tier;
    }
}

/// A [`GridContainer`] that records what a renderer would show.
pub struct HeadlessGrid<T: GridItem> {
    children: AHashMap<HandleId, HeadlessIcon<T>>,
    order: Vec<HandleId>,
    shape: Option<GridPlan>,
    repositions: usize,
    _item: PhantomData<fn(&T)>,
}

impl<T: GridItem> std::fmt::Debug for HeadlessGrid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessGrid")
            .field("children", &self.children.len())
            .field("order", &self.order)
            .field("shape", &self.shape)
            .finish()
    }
}

impl<T: GridItem> Default for HeadlessGrid<T> {
    fn default() -> Self {
        Self {
            children: AHashMap::new(),
            order: Vec::new(),
            shape: None,
            repositions: 0,
            _item: PhantomData,
        }
    }
}

impl<T: GridItem> HeadlessGrid<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, id: HandleId) -> Option<&HeadlessIcon<T>> {
        self.children.get(&id)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Display order from the last reposition.
    pub fn order(&self) -> &[HandleId] {
        &self.order
    }

    /// Bound items in display order.
    pub fn displayed_items(&self) -> Vec<T::Id> {
        self.order
            .iter()
            .filter_map(|id| self.children.get(id))
            .filter_map(|icon| icon.item.clone())
            .collect()
    }

    pub fn shape(&self) -> Option<&GridPlan> {
        self.shape.as_ref()
    }

    /// How many times the controller asked for a layout pass.
    pub fn reposition_count(&self) -> usize {
        self.repositions
    }
}

impl<T: GridItem> GridContainer<T> for HeadlessGrid<T> {
    type View = HeadlessIcon<T>;

    fn add_child(&mut self, id: HandleId, tier: IconTier) -> &mut Self::View {
        self.children
            .entry(id)
            .or_insert_with(|| HeadlessIcon::new(tier))
    }

    fn child_mut(&mut self, id: HandleId) -> Option<&mut Self::View> {
        self.children.get_mut(&id)
    }

    fn remove_child(&mut self, id: HandleId) {
        self.children.remove(&id);
        self.order.retain(|&o| o != id);
    }

    fn set_shape(&mut self, plan: &GridPlan) {
        self.shape = Some(*plan);
    }

    fn reposition(&mut self, order: &[HandleId]) {
        self.order = order.to_vec();
        self.repositions += 1;
    }
}
