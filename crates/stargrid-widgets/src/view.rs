#![forbid(unsafe_code)]

//! Rendering capabilities the controller drives.
//!
//! The controller never touches engine widgets. A rendering backend
//! implements [`GridContainer`] (the grid's parent widget) and hands out
//! [`IconView`]s (one per icon) keyed by [`HandleId`].

use crate::handle::HandleId;
use stargrid_layout::{GridPlan, IconTier};

/// One visual icon.
pub trait IconView<T> {
    /// Show a domain item.
    fn bind(&mut self, item: &T);

    /// Clear the displayed item.
    fn unbind(&mut self);

    /// Paint or clear the picked highlight.
    fn set_picked(&mut self, picked: bool);

    fn set_tier(&mut self, tier: IconTier);
}

/// The widget that parents a grid's icons.
pub trait GridContainer<T> {
    type View: IconView<T>;

    /// Create a child view for a new handle.
    fn add_child(&mut self, id: HandleId, tier: IconTier) -> &mut Self::View;

    fn child_mut(&mut self, id: HandleId) -> Option<&mut Self::View>;

    /// Destroy a child view.
    ///
    /// Removal must take effect immediately; a deferred destroy leaves a
    /// stale icon in place until the next layout pass.
    fn remove_child(&mut self, id: HandleId);

    /// Apply a planned tier/column shape.
    fn set_shape(&mut self, plan: &GridPlan);

    /// Lay children out in the given display order.
    fn reposition(&mut self, order: &[HandleId]);
}
