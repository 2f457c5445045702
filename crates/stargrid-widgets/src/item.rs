#![forbid(unsafe_code)]

//! The domain-facing side of a grid.

use std::fmt::Debug;
use std::hash::Hash;

/// A domain object a grid can display.
///
/// The grid stores only the [`GridItem::Id`], never the item itself: domain
/// objects stay owned by their managers and the identity key is the weak
/// reference handles bind to.
pub trait GridItem {
    /// Stable identity, usable as a map key.
    type Id: Clone + Eq + Hash + Debug;

    fn item_id(&self) -> Self::Id;
}
