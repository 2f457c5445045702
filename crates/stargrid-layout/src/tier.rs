#![forbid(unsafe_code)]

//! Icon size tiers and the footprint table the planner walks.
//!
//! # Invariants
//!
//! 1. A [`TierTable`] is never empty.
//! 2. Entries are ordered largest-to-smallest by footprint area, strictly.
//! 3. Every footprint has positive width and height.
//!
//! The table is validated once at construction so that [`crate::plan_grid`]
//! can stay infallible.

use serde::{Deserialize, Serialize};
use stargrid_core::geometry::Size;
use std::fmt;
use thiserror::Error;

/// A discrete icon size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconTier {
    Small,
    Medium,
    Large,
    Huge,
}

impl IconTier {
    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }
}

impl fmt::Display for IconTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a [`TierTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFootprint {
    pub tier: IconTier,
    pub width: u16,
    pub height: u16,
}

impl TierFootprint {
    pub const fn new(tier: IconTier, width: u16, height: u16) -> Self {
        Self {
            tier,
            width,
            height,
        }
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Rejected tier table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,

    #[error("tier {tier} has a zero-sized footprint")]
    ZeroFootprint { tier: IconTier },

    #[error("tier {tier} is listed more than once")]
    DuplicateTier { tier: IconTier },

    #[error("tier {smaller} ({smaller_area}px) is not smaller than the tier before it ({larger_area}px)")]
    NotDescending {
        smaller: IconTier,
        smaller_area: u32,
        larger_area: u32,
    },
}

/// Per-tier icon footprints, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    entries: Vec<TierFootprint>,
}

impl TierTable {
    /// Validate and build a table.
    pub fn new(entries: impl IntoIterator<Item = TierFootprint>) -> Result<Self, TierTableError> {
        let entries: Vec<TierFootprint> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(TierTableError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.size().is_empty() {
                return Err(TierTableError::ZeroFootprint { tier: entry.tier });
            }
            if entries[..i].iter().any(|prev| prev.tier == entry.tier) {
                return Err(TierTableError::DuplicateTier { tier: entry.tier });
            }
            if let Some(prev) = i.checked_sub(1).map(|p| &entries[p])
                && entry.size().area() >= prev.size().area()
            {
                return Err(TierTableError::NotDescending {
                    smaller: entry.tier,
                    smaller_area: entry.size().area(),
                    larger_area: prev.size().area(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Entries, largest first.
    #[inline]
    pub fn entries(&self) -> &[TierFootprint] {
        &self.entries
    }

    /// The largest tier.
    #[inline]
    pub fn largest(&self) -> &TierFootprint {
        &self.entries[0]
    }

    /// The smallest tier, used as the overflow fallback.
    #[inline]
    pub fn smallest(&self) -> &TierFootprint {
        &self.entries[self.entries.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TierTable {
    /// The three icon sizes the HUD grids ship with.
    fn default() -> Self {
        Self {
            entries: vec![
                TierFootprint::new(IconTier::Large, 96, 96),
                TierFootprint::new(IconTier::Medium, 64, 64),
                TierFootprint::new(IconTier::Small, 40, 40),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = TierTable::default();
        assert_eq!(TierTable::new(table.entries().to_vec()), Ok(table.clone()));
        assert_eq!(table.largest().tier, IconTier::Large);
        assert_eq!(table.smallest().tier, IconTier::Small);
    }

    #[test]
    fn empty_table_rejected() {
        assert_eq!(TierTable::new([]), Err(TierTableError::Empty));
    }

    #[test]
    fn zero_footprint_rejected() {
        let err = TierTable::new([TierFootprint::new(IconTier::Small, 0, 10)]).unwrap_err();
        assert_eq!(
            err,
            TierTableError::ZeroFootprint {
                tier: IconTier::Small
            }
        );
    }

    #[test]
    fn ascending_order_rejected() {
        let err = TierTable::new([
            TierFootprint::new(IconTier::Small, 32, 32),
            TierFootprint::new(IconTier::Large, 64, 64),
        ])
        .unwrap_err();
        assert!(matches!(err, TierTableError::NotDescending { .. }));
        assert!(err.to_string().contains("large"));
    }

    #[test]
    fn duplicate_tier_rejected() {
        let err = TierTable::new([
            TierFootprint::new(IconTier::Medium, 64, 64),
            TierFootprint::new(IconTier::Medium, 32, 32),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TierTableError::DuplicateTier {
                tier: IconTier::Medium
            }
        );
    }
}
