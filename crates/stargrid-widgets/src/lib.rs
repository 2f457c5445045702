#![forbid(unsafe_code)]

//! Pooled, sorted, multi-select icon grids.
//!
//! [`PooledGridController`] keeps a container's icons in step with a domain
//! collection. It recycles [`IconHandle`]s through a [`HandlePool`], orders
//! them with a [`SortedIconSequence`], and routes clicks through a
//! [`SelectionController`]. Rendering stays behind the [`GridContainer`] and
//! [`IconView`] traits; [`HeadlessGrid`] records what a renderer would show.

pub mod compare;
pub mod controller;
pub mod cue;
pub mod error;
pub mod events;
pub mod handle;
pub mod headless;
pub mod item;
pub mod pool;
pub mod selection;
pub mod sequence;
pub mod view;

pub use compare::{
    ActiveQueueOrder, Descending, HealthOrder, HeroIntel, HeroOrder, IconComparator,
    InsertionOrder, NameOrder, OwnerIntel, OwnerOrder, TotalF32,
};
pub use controller::{ClickOutcome, PooledGridController};
pub use cue::{CueSink, RecordingCues, Silent, UiCue};
pub use error::{GridError, Result};
pub use events::{EventBus, GridEvent, Registration};
pub use handle::{HandleId, HandleState, IconHandle};
pub use headless::{HeadlessGrid, HeadlessIcon};
pub use item::GridItem;
pub use pool::HandlePool;
pub use selection::{SelectionController, SelectionDelta};
pub use sequence::SortedIconSequence;
pub use view::{GridContainer, IconView};
