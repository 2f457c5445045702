#![forbid(unsafe_code)]

//! Grid configuration loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # construction-queue.toml
//! arrangement = "horizontal"
//! padding = 4
//!
//! [[tiers]]
//! tier = "large"
//! width = 96
//! height = 96
//!
//! [[tiers]]
//! tier = "small"
//! width = 40
//! height = 40
//! ```
//!
//! ```rust,ignore
//! let config = GridConfig::from_toml_file("construction-queue.toml")?;
//! let planner = config.planner()?;
//! ```
//!
//! # Defaults
//!
//! Every field has a default, so an empty document yields
//! [`GridConfig::default()`]: horizontal flow, no padding, and the
//! [`TierTable::default()`] footprints.

use crate::planner::{Arrangement, GridLayoutPlanner};
use crate::tier::{TierFootprint, TierTable, TierTableError};
use serde::{Deserialize, Serialize};
use stargrid_core::geometry::Sides;
use std::path::Path;
use thiserror::Error;

/// Upper bound on container padding.
pub const MAX_PADDING: u16 = 256;

/// Errors from loading or validating a [`GridConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tier table: {0}")]
    Tiers(#[from] TierTableError),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Tunables for one icon grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Flow direction.
    pub arrangement: Arrangement,
    /// Uniform padding inside the container, in pixels.
    pub padding: u16,
    /// Footprints, largest first.
    pub tiers: Vec<TierFootprint>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            arrangement: Arrangement::Horizontal,
            padding: 0,
            tiers: TierTable::default().entries().to_vec(),
        }
    }
}

impl GridConfig {
    /// Preset for the unit HUD's fleet element column.
    #[must_use]
    pub fn unit_hud() -> Self {
        Self {
            arrangement: Arrangement::Vertical,
            ..Self::default()
        }
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(err) = TierTable::new(self.tiers.iter().copied()) {
            errors.push(format!("tiers: {err}"));
        }
        if self.padding > MAX_PADDING {
            errors.push(format!(
                "padding {} exceeds the {MAX_PADDING}px limit",
                self.padding
            ));
        }
        errors
    }

    /// Build the validated tier table.
    pub fn tier_table(&self) -> Result<TierTable, ConfigError> {
        Ok(TierTable::new(self.tiers.iter().copied())?)
    }

    /// Build a planner, rejecting invalid configs.
    pub fn planner(&self) -> Result<GridLayoutPlanner, ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            tracing::warn!(message = "grid.config.invalid", errors = errors.len());
            return Err(ConfigError::Validation(errors));
        }
        Ok(GridLayoutPlanner::new(self.tier_table()?, self.arrangement)
            .padding(Sides::all(self.padding)))
    }
}
