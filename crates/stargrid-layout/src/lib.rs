#![forbid(unsafe_code)]

//! Icon tiers and grid planning.
//!
//! The planner answers one question: given a container and an item count,
//! which icon size should the grid use and how many columns does it get?

pub mod config;
pub mod planner;
pub mod tier;

pub use config::{ConfigError, GridConfig};
pub use planner::{Arrangement, GridLayoutPlanner, GridPlan, plan_grid};
pub use stargrid_core::geometry::{Sides, Size};
pub use tier::{IconTier, TierFootprint, TierTable, TierTableError};
