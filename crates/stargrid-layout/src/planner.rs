#![forbid(unsafe_code)]

//! Grid planning: pick the largest icon tier that fits a container.
//!
//! # Algorithm
//!
//! Walk the [`TierTable`] from largest to smallest. For each tier:
//!
//! - **Horizontal**: `columns = floor(width / icon_width)`,
//!   `rows = ceil(count / columns)`.
//! - **Vertical**: a single column, `rows = count`.
//!
//! Accept the first tier where one icon fits the width (`columns >= 1`, or
//! `icon_width <= width` for a column) and `rows * icon_height <= height`.
//! If none fits, return the smallest tier with `overflow = true` and at
//! least one column; scrolling is the container's job. An empty collection
//! fits any tier.
//!
//! # Invariants
//!
//! 1. Planning never fails.
//! 2. `columns >= 1` for every plan.
//! 3. Monotone in item count: more items never yield a larger tier.
//! 4. An empty collection plans the largest tier with zero rows.

use crate::tier::{IconTier, TierFootprint, TierTable};
use serde::{Deserialize, Serialize};
use stargrid_core::geometry::{Sides, Size};

/// How icons flow through the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Left to right, wrapping into rows.
    #[default]
    Horizontal,
    /// A single top-to-bottom column.
    Vertical,
}

/// Result of planning a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlan {
    /// Chosen icon tier.
    pub tier: IconTier,
    /// Pixel footprint of one icon at `tier`.
    pub footprint: Size,
    /// Column count (1 for vertical arrangements).
    pub columns: u16,
    /// Rows needed to show every item.
    pub rows: u32,
    /// True when even the smallest tier could not fit every item.
    pub overflow: bool,
}

impl GridPlan {
    /// Number of slots the planned shape provides.
    #[must_use]
    pub fn slots(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// Pixel height of the full planned content.
    #[must_use]
    pub fn content_height(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.footprint.height)
    }
}

/// Columns and rows for one tier, or `None` when an icon is wider than the
/// container.
fn shape_for(
    container: Size,
    item_count: usize,
    entry: &TierFootprint,
    arrangement: Arrangement,
) -> Option<(u16, u32)> {
    let count = u32::try_from(item_count).unwrap_or(u32::MAX);
    match arrangement {
        Arrangement::Horizontal => {
            let columns = container.width / entry.width;
            (columns > 0).then(|| (columns, count.div_ceil(u32::from(columns))))
        }
        Arrangement::Vertical => (entry.width <= container.width).then_some((1, count)),
    }
}

/// Plan a grid for `item_count` icons inside `container`.
#[must_use]
pub fn plan_grid(
    container: Size,
    item_count: usize,
    tiers: &TierTable,
    arrangement: Arrangement,
) -> GridPlan {
    let count = u32::try_from(item_count).unwrap_or(u32::MAX);
    if count == 0 {
        let largest = tiers.largest();
        let columns = match arrangement {
            Arrangement::Horizontal => (container.width / largest.width).max(1),
            Arrangement::Vertical => 1,
        };
        return GridPlan {
            tier: largest.tier,
            footprint: largest.size(),
            columns,
            rows: 0,
            overflow: false,
        };
    }

    for entry in tiers.entries() {
        let Some((columns, rows)) = shape_for(container, item_count, entry, arrangement) else {
            continue;
        };
        if u64::from(rows) * u64::from(entry.height) <= u64::from(container.height) {
            return GridPlan {
                tier: entry.tier,
                footprint: entry.size(),
                columns,
                rows,
                overflow: false,
            };
        }
    }

    let smallest = tiers.smallest();
    let columns = match arrangement {
        Arrangement::Horizontal => (container.width / smallest.width).max(1),
        Arrangement::Vertical => 1,
    };
    GridPlan {
        tier: smallest.tier,
        footprint: smallest.size(),
        columns,
        rows: count.div_ceil(u32::from(columns)),
        overflow: true,
    }
}

/// A tier table and arrangement bundled for repeated planning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridLayoutPlanner {
    tiers: TierTable,
    arrangement: Arrangement,
    padding: Sides,
}

impl GridLayoutPlanner {
    /// Create a planner over the given tiers.
    #[must_use]
    pub fn new(tiers: TierTable, arrangement: Arrangement) -> Self {
        Self {
            tiers,
            arrangement,
            padding: Sides::default(),
        }
    }

    /// Set the padding subtracted from the container before planning.
    #[must_use]
    pub fn padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Plan for a container of the given outer size.
    #[must_use]
    pub fn plan(&self, container: Size, item_count: usize) -> GridPlan {
        let inner = Size::new(
            container
                .width
                .saturating_sub(self.padding.left)
                .saturating_sub(self.padding.right),
            container
                .height
                .saturating_sub(self.padding.top)
                .saturating_sub(self.padding.bottom),
        );
        plan_grid(inner, item_count, &self.tiers, self.arrangement)
    }
}
