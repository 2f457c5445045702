#![forbid(unsafe_code)]

//! Icon orderings.
//!
//! A comparator maps each item to an `Ord` sort key; the sequence then
//! orders by `(key, insertion)`. Because keys are `Ord`, every comparator
//! here is a total order: transitive, antisymmetric, and deterministic.
//!
//! # Unknown values
//!
//! Scouting reports may not know a stat. Each comparator fixes where the
//! "unknown" class sits relative to known values and to any sentinel
//! classes, and the choice differs per attribute:
//!
//! | comparator           | order                                              |
//! |----------------------|----------------------------------------------------|
//! | [`HealthOrder`]      | unknown, then 0.0 ..= 1.0                          |
//! | [`OwnerOrder`]       | unowned, then known owners by name, then unknown   |
//! | [`HeroOrder`]        | no hero, then unknown, then heroes by level, name  |
//! | [`ActiveQueueOrder`] | in progress by completion, then completed          |

use std::cmp::{Ordering, Reverse};
use std::fmt::Debug;

/// Orders grid items through a sort key.
pub trait IconComparator<T> {
    type Key: Ord + Clone + Debug;

    fn sort_key(&self, item: &T) -> Self::Key;

    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }
}

/// Leaves items in collection order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionOrder;

impl<T> IconComparator<T> for InsertionOrder {
    type Key = ();

    fn sort_key(&self, _item: &T) -> Self::Key {}
}

/// Reverses another comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending<C>(pub C);

impl<T, C: IconComparator<T>> IconComparator<T> for Descending<C> {
    type Key = Reverse<C::Key>;

    fn sort_key(&self, item: &T) -> Self::Key {
        Reverse(self.0.sort_key(item))
    }
}

/// `f32` with IEEE total ordering.
#[derive(Debug, Clone, Copy)]
pub struct TotalF32(pub f32);

impl PartialEq for TotalF32 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF32 {}

impl PartialOrd for TotalF32 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF32 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Items with a scouted health fraction.
pub trait ReportsHealth {
    /// Fraction in `0.0..=1.0`, or `None` when not scouted.
    fn health(&self) -> Option<f32>;
}

/// Unknown health first, then ascending health.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthOrder;

impl<T: ReportsHealth> IconComparator<T> for HealthOrder {
    // `None < Some(_)` puts unknowns first.
    type Key = Option<TotalF32>;

    fn sort_key(&self, item: &T) -> Self::Key {
        item.health().map(TotalF32)
    }
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// What a report knows about an item's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerIntel {
    Unowned,
    Known(String),
    Unknown,
}

pub trait ReportsOwner {
    fn owner(&self) -> OwnerIntel;
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum OwnerKey {
    Unowned,
    Known { folded: String, name: String },
    Unknown,
}

/// Unowned, then known owners case-insensitively, then unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrder;

impl<T: ReportsOwner> IconComparator<T> for OwnerOrder {
    type Key = OwnerKey;

    fn sort_key(&self, item: &T) -> Self::Key {
        match item.owner() {
            OwnerIntel::Unowned => OwnerKey::Unowned,
            OwnerIntel::Known(name) => OwnerKey::Known {
                folded: name.to_lowercase(),
                name,
            },
            OwnerIntel::Unknown => OwnerKey::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Hero
// ---------------------------------------------------------------------------

/// What a report knows about the hero commanding an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroIntel {
    None,
    Unknown,
    Known { level: u32, name: String },
}

pub trait ReportsHero {
    fn hero(&self) -> HeroIntel;
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeroKey {
    None,
    Unknown,
    Known { level: u32, name: String },
}

/// No hero, then unknown, then heroes by level and name.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeroOrder;

impl<T: ReportsHero> IconComparator<T> for HeroOrder {
    type Key = HeroKey;

    fn sort_key(&self, item: &T) -> Self::Key {
        match item.hero() {
            HeroIntel::None => HeroKey::None,
            HeroIntel::Unknown => HeroKey::Unknown,
            HeroIntel::Known { level, name } => HeroKey::Known { level, name },
        }
    }
}

// ---------------------------------------------------------------------------
// Construction progress
// ---------------------------------------------------------------------------

/// Items with build progress, such as construction queue entries.
pub trait ReportsProgress {
    fn is_complete(&self) -> bool;
    /// Completion fraction in `0.0..=1.0`.
    fn completion(&self) -> f32;
}

/// In-progress items by ascending completion; completed items last.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveQueueOrder;

impl<T: ReportsProgress> IconComparator<T> for ActiveQueueOrder {
    type Key = (bool, TotalF32);

    fn sort_key(&self, item: &T) -> Self::Key {
        (item.is_complete(), TotalF32(item.completion()))
    }
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

pub trait Named {
    fn name(&self) -> &str;
}

/// Case-insensitive name, exact name as tie-break.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameOrder;

impl<T: Named> IconComparator<T> for NameOrder {
    type Key = (String, String);

    fn sort_key(&self, item: &T) -> Self::Key {
        let name = item.name();
        (name.to_lowercase(), name.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hull(Option<f32>);

    impl ReportsHealth for Hull {
        fn health(&self) -> Option<f32> {
            self.0
        }
    }

    struct Build {
        done: bool,
        pct: f32,
    }

    impl ReportsProgress for Build {
        fn is_complete(&self) -> bool {
            self.done
        }
        fn completion(&self) -> f32 {
            self.pct
        }
    }

    struct Ship(&'static str);

    impl Named for Ship {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn sort_by<T, C: IconComparator<T>>(cmp: &C, items: &mut [T]) {
        items.sort_by(|a, b| cmp.compare(a, b));
    }

    #[test]
    fn health_unknown_sorts_first() {
        let mut hulls = vec![Hull(Some(1.0)), Hull(Some(0.0)), Hull(None), Hull(Some(0.5))];
        sort_by(&HealthOrder, &mut hulls);
        let got: Vec<_> = hulls.iter().map(|h| h.0).collect();
        assert_eq!(got, vec![None, Some(0.0), Some(0.5), Some(1.0)]);
    }

    #[test]
    fn descending_health_puts_unknown_last() {
        let mut hulls = vec![Hull(None), Hull(Some(0.5)), Hull(Some(1.0))];
        sort_by(&Descending(HealthOrder), &mut hulls);
        let got: Vec<_> = hulls.iter().map(|h| h.0).collect();
        assert_eq!(got, vec![Some(1.0), Some(0.5), None]);
    }

    #[test]
    fn active_queue_puts_done_last() {
        let mut queue = vec![
            Build { done: true, pct: 1.0 },
            Build { done: false, pct: 0.7 },
            Build { done: false, pct: 0.3 },
        ];
        sort_by(&ActiveQueueOrder, &mut queue);
        let got: Vec<_> = queue.iter().map(|b| (b.done, b.pct)).collect();
        assert_eq!(got, vec![(false, 0.3), (false, 0.7), (true, 1.0)]);
    }

    #[test]
    fn name_order_folds_case() {
        let mut ships = vec![Ship("scout"), Ship("Cruiser"), Ship("frigate"), Ship("cruiser")];
        sort_by(&NameOrder, &mut ships);
        let got: Vec<_> = ships.iter().map(|s| s.0).collect();
        assert_eq!(got, vec!["Cruiser", "cruiser", "frigate", "scout"]);
    }

    #[test]
    fn insertion_order_is_all_equal() {
        assert_eq!(
            <InsertionOrder as IconComparator<Ship>>::compare(&InsertionOrder, &Ship("a"), &Ship("b")),
            Ordering::Equal
        );
    }

    #[test]
    fn total_f32_orders_nan() {
        let mut values = vec![TotalF32(f32::NAN), TotalF32(1.0), TotalF32(-0.0), TotalF32(0.0)];
        values.sort();
        assert_eq!(values[0].0.to_bits(), (-0.0f32).to_bits());
        assert_eq!(values[1].0.to_bits(), 0.0f32.to_bits());
        assert!(values[3].0.is_nan());
    }
}
