// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection and rectification settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DoccamError, Result};

/// Smallest share of the frame a boundary must enclose to count as a document.
pub const MIN_AREA_RATIO: f64 = 0.25;
/// First approximation tolerance tried when collapsing the hull to 4 corners.
pub const TOLERANCE_START: u32 = 1;
/// Last approximation tolerance tried before giving up.
pub const TOLERANCE_MAX: u32 = 100;
/// Output width used when the caller does not pick one.
pub const DEFAULT_DEST_WIDTH: u32 = 1000;

/// Edge-map preprocessing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Bilateral window diameter in pixels (odd).
    pub bilateral_diameter: u32,
    /// Bilateral intensity influence.
    pub bilateral_sigma_color: f32,
    /// Bilateral spatial influence.
    pub bilateral_sigma_space: f32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Dilation radius applied to the edge map; 0 disables it.
    pub edge_closing_radius: u8,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            bilateral_diameter: 5,
            bilateral_sigma_color: 75.0,
            bilateral_sigma_space: 75.0,
            canny_low: 10.0,
            canny_high: 150.0,
            edge_closing_radius: 1,
        }
    }
}

/// Boundary plausibility filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub min_area_ratio: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            min_area_ratio: MIN_AREA_RATIO,
        }
    }
}

/// Tolerance search bounds for quadrilateral simplification (pixels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    pub tolerance_start: u32,
    pub tolerance_max: u32,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            tolerance_start: TOLERANCE_START,
            tolerance_max: TOLERANCE_MAX,
        }
    }
}

/// Resampling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    /// RGB value for output pixels whose source lies outside the photo.
    pub fill: [u8; 3],
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self { fill: [0, 0, 0] }
    }
}

/// Complete scanner configuration.
///
/// Every field has a default, so a JSON file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub preprocess: PreprocessConfig,
    pub boundary: BoundaryConfig,
    pub simplify: SimplifyConfig,
    pub rectify: RectifyConfig,
    /// Output width used when the caller does not pick one.
    pub default_dest_width: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            boundary: BoundaryConfig::default(),
            simplify: SimplifyConfig::default(),
            rectify: RectifyConfig::default(),
            default_dest_width: DEFAULT_DEST_WIDTH,
        }
    }
}

impl ScanConfig {
    /// Read a JSON configuration file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: ScanConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let p = &self.preprocess;
        if p.bilateral_diameter == 0 || p.bilateral_diameter % 2 == 0 {
            return Err(DoccamError::InvalidConfig(format!(
                "bilateral_diameter must be odd and positive, got {}",
                p.bilateral_diameter
            )));
        }
        if !(p.bilateral_sigma_color > 0.0 && p.bilateral_sigma_space > 0.0) {
            return Err(DoccamError::InvalidConfig(
                "bilateral sigmas must be positive".into(),
            ));
        }
        if !(p.canny_low >= 0.0 && p.canny_low <= p.canny_high) {
            return Err(DoccamError::InvalidConfig(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                p.canny_low, p.canny_high
            )));
        }
        if !(0.0..=1.0).contains(&self.boundary.min_area_ratio) {
            return Err(DoccamError::InvalidConfig(format!(
                "min_area_ratio must be within [0, 1], got {}",
                self.boundary.min_area_ratio
            )));
        }
        let s = &self.simplify;
        if s.tolerance_start == 0 || s.tolerance_start > s.tolerance_max {
            return Err(DoccamError::InvalidConfig(format!(
                "tolerance range must satisfy 1 <= start <= max, got {}..={}",
                s.tolerance_start, s.tolerance_max
            )));
        }
        if self.default_dest_width == 0 {
            return Err(DoccamError::InvalidConfig(
                "default_dest_width must be positive".into(),
            ));
        }
        Ok(())
    }
}
