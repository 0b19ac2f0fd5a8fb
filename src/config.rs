// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration.
//!
//! All tunables live here with their defaults; a TOML file can override
//! any subset. Values are validated once at load time so the per-frame
//! path never has to re-check them.

use crate::color::Color;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Error loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("eraser brush diameter must be odd and non-zero, got {0}")]
    BadBrushDiameter(u32),
    #[error("zoom range is empty: min {min} > max {max}")]
    EmptyZoomRange { min: f64, max: f64 },
    #[error("zoom step and minimum must be positive (step {step}, min {min})")]
    NonPositiveZoom { step: f64, min: f64 },
}

// ===== Sections =====

/// Pan tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    /// Maximum pan speed in view-space pixels per frame at zoom 1.
    pub max_speed: f64,
    /// Horizontal overscroll past the grid edge, as a fraction of grid width.
    pub overscroll_x: f64,
    /// Vertical overscroll past the grid edge, as a fraction of grid height.
    pub overscroll_y: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        PanConfig {
            max_speed: 16.0,
            overscroll_x: 0.15,
            overscroll_y: 0.15,
        }
    }
}

/// Zoom tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom change per wheel step.
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            step: 0.6,
            min: 0.6,
            max: 4.2,
        }
    }
}

/// Eraser tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EraserConfig {
    /// Square brush size in pixels; must be odd so the brush centers on
    /// the pointer pixel. Tile mode ignores this and erases one cell.
    pub brush_diameter: u32,
}

impl Default for EraserConfig {
    fn default() -> Self {
        EraserConfig { brush_diameter: 5 }
    }
}

/// Drawing colors.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Grid overlay line color.
    pub grid_line: Color,
    /// Committed stroke color.
    pub stroke: Color,
    /// Canvas background; erasing paints with this.
    pub background: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            grid_line: Color::from_rgb(0xCAEBFD),
            stroke: Color::from_rgb(0x292929),
            background: Color::from_rgb(0xFFFFF1),
        }
    }
}

// ===== Top level =====

/// Complete runtime configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pan: PanConfig,
    pub zoom: ZoomConfig,
    pub eraser: EraserConfig,
    pub colors: ColorConfig,
}

impl Config {
    /// Load from a TOML file, falling back to defaults for absent keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.eraser.brush_diameter;
        if d == 0 || d % 2 == 0 {
            return Err(ConfigError::BadBrushDiameter(d));
        }
        if self.zoom.min > self.zoom.max {
            return Err(ConfigError::EmptyZoomRange {
                min: self.zoom.min,
                max: self.zoom.max,
            });
        }
        if self.zoom.step <= 0.0 || self.zoom.min <= 0.0 {
            return Err(ConfigError::NonPositiveZoom {
                step: self.zoom.step,
                min: self.zoom.min,
            });
        }
        Ok(())
    }
}
