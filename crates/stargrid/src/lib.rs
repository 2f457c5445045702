#![forbid(unsafe_code)]

//! Stargrid public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! prelude for hosts that just want a grid on screen.

use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use stargrid_core::event::{ClickGesture, Modifiers, MouseButton};
pub use stargrid_core::geometry::{Sides, Size};

// --- Layout re-exports -----------------------------------------------------

pub use stargrid_layout::{
    Arrangement, ConfigError, GridConfig, GridLayoutPlanner, GridPlan, IconTier, TierFootprint,
    TierTable,
};

// --- Widget re-exports -----------------------------------------------------

pub use stargrid_widgets::{
    ClickOutcome, CueSink, EventBus, GridContainer, GridError, GridEvent, GridItem, HandleId,
    HeadlessGrid, IconComparator, IconHandle, IconView, PooledGridController, Registration,
    SelectionDelta, Silent, UiCue,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for stargrid hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Standard result type for stargrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Construction helpers --------------------------------------------------

/// Build a grid over `container` from a validated configuration.
pub fn grid_from_config<T, O, G>(
    config: &GridConfig,
    container: G,
    viewport: Size,
) -> Result<PooledGridController<T, O, G>>
where
    T: GridItem,
    O: IconComparator<T>,
    G: GridContainer<T>,
{
    let planner = config.planner()?;
    Ok(PooledGridController::new(container, planner, viewport))
}

/// Build a headless grid from a TOML configuration file.
pub fn headless_grid_from_toml<T, O>(
    path: impl AsRef<Path>,
    viewport: Size,
) -> Result<PooledGridController<T, O, HeadlessGrid<T>>>
where
    T: GridItem,
    O: IconComparator<T>,
{
    let config = GridConfig::from_toml_file(path)?;
    grid_from_config(&config, HeadlessGrid::new(), viewport)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ClickGesture, ClickOutcome, Error, EventBus, GridConfig, GridEvent, GridItem,
        HeadlessGrid, IconComparator, PooledGridController, Result, Size,
    };

    pub use crate::{core, layout, widgets};
}

pub use stargrid_core as core;
pub use stargrid_layout as layout;
pub use stargrid_widgets as widgets;
