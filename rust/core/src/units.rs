// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length units at the editor boundary
//!
//! The floor-plan editor draws on a 50-pixel grid where one grid cell is one
//! meter. Everything past the boundary works in meters, so the conversion
//! happens exactly once when editor records become [`WallSegment`]s.
//!
//! [`WallSegment`]: crate::types::WallSegment

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Editor grid size in pixels; one grid cell is one meter.
pub const EDITOR_GRID_PX: f64 = 50.0;

/// Vertical distance between floors (floor-to-floor height) in meters.
pub const CEILING_HEIGHT_M: f64 = 2.40;

/// Scale of editor coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlanUnits {
    /// Editor pixels per meter
    pub pixels_per_meter: f64,
}

impl PlanUnits {
    /// Create a validated scale.
    pub fn new(pixels_per_meter: f64) -> Result<Self> {
        if !pixels_per_meter.is_finite() || pixels_per_meter <= 0.0 {
            return Err(Error::InvalidScale(pixels_per_meter));
        }
        Ok(Self { pixels_per_meter })
    }

    /// Convert an editor length to meters.
    #[inline]
    pub fn to_meters(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_meter
    }

    /// Convert meters back to editor pixels.
    #[inline]
    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }
}

impl Default for PlanUnits {
    fn default() -> Self {
        Self {
            pixels_per_meter: EDITOR_GRID_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_grid_is_one_meter() {
        let units = PlanUnits::default();
        assert_relative_eq!(units.to_meters(50.0), 1.0);
        assert_relative_eq!(units.to_meters(500.0), 10.0);
        assert_relative_eq!(units.to_pixels(2.5), 125.0);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(matches!(PlanUnits::new(0.0), Err(Error::InvalidScale(_))));
        assert!(matches!(PlanUnits::new(-3.0), Err(Error::InvalidScale(_))));
        assert!(matches!(PlanUnits::new(f64::NAN), Err(Error::InvalidScale(_))));
        assert!(PlanUnits::new(100.0).is_ok());
    }
}
