#![forbid(unsafe_code)]

//! Core: geometry, input classification, and logging bootstrap.
//!
//! # Role in stargrid
//! `stargrid-core` is the leaf crate. It owns the pixel geometry the layout
//! planner works in and the already-classified click gestures that the grid
//! controller consumes. It knows nothing about icons, handles, or domain
//! items.
//!
//! # How it fits in the system
//! `stargrid-layout` plans grids in terms of [`geometry::Size`], and
//! `stargrid-widgets` routes [`event::ClickGesture`] values into selection
//! operations. Raw engine input never crosses this boundary unclassified.

pub mod event;
pub mod geometry;
pub mod logging;
