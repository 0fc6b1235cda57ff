//! Configuration
//!
//! Defaults reproduce the dashboard's chart: 120-unit sibling slots,
//! 280-unit level gap, 1.1/1.3 separation, initial zoom 0.75 inside a
//! 0.15..2 zoom range and an 80-unit left padding.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tree layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical slot per node (screen units)
    pub node_size: f64,
    /// Horizontal distance between depth levels
    pub level_gap: f64,
    /// Separation multiplier between nodes sharing a parent
    pub sibling_separation: f64,
    /// Separation multiplier between nodes with different parents
    pub cousin_separation: f64,
}

impl LayoutConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With node slot size
    #[inline]
    #[must_use]
    pub fn with_node_size(mut self, node_size: f64) -> Self {
        self.node_size = node_size;
        self
    }

    /// With level gap
    #[inline]
    #[must_use]
    pub fn with_level_gap(mut self, level_gap: f64) -> Self {
        self.level_gap = level_gap;
        self
    }

    /// With separation multipliers
    #[inline]
    #[must_use]
    pub fn with_separation(mut self, sibling: f64, cousin: f64) -> Self {
        self.sibling_separation = sibling;
        self.cousin_separation = cousin;
        self
    }

    /// Check all values
    ///
    /// # Errors
    /// Returns [`ConfigError`] for non-positive sizes or separations below 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("node_size", self.node_size)?;
        positive("level_gap", self.level_gap)?;
        at_least_one("sibling_separation", self.sibling_separation)?;
        at_least_one("cousin_separation", self.cousin_separation)?;
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_size: 120.0,
            level_gap: 280.0,
            sibling_separation: 1.1,
            cousin_separation: 1.3,
        }
    }
}

/// Initial viewport placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub initial_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Distance of the root from the left edge
    pub left_padding: f64,
}

impl ViewportConfig {
    /// Check all values
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the zoom range is empty or excludes the
    /// initial scale
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        if !(self.min_scale..=self.max_scale).contains(&self.initial_scale) {
            return Err(ConfigError::ScaleOutOfRange {
                scale: self.initial_scale,
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_scale: 0.75,
            min_scale: 0.15,
            max_scale: 2.0,
            left_padding: 80.0,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NexusConfig {
    /// Label of the ROOT node
    pub root_label: String,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
}

impl NexusConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With root label
    #[inline]
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// With layout parameters
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Check the whole configuration
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_label.trim().is_empty() {
            return Err(ConfigError::EmptyRootLabel);
        }
        self.layout.validate()?;
        self.viewport.validate()
    }
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            root_label: "Nexus".to_string(),
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn at_least_one(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 1.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::SeparationTooSmall { field, value })
    }
}
