// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sample lattice generation
//!
//! Points sit on a square horizontal grid around an anchor (the
//! transmitter's rounded horizontal position), clipped to the building
//! outline, with one point per floor layer. Layer `k` sits at height
//! `k * ceiling_height`, so layer 0 is the ground plane.

use crate::error::{Error, Result};
use crate::outline::BuildingOutline;
use serde::{Deserialize, Serialize};
use wifi_coverage_core::{Point2D, SamplePoint, CEILING_HEIGHT_M};

/// Lattice layout parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LatticeConfig {
    /// Horizontal grid step in meters
    pub spacing: f64,
    /// Half-width of the sampled square around the anchor
    pub radius: f64,
    /// Vertical distance between sample layers
    pub ceiling_height: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            spacing: 2.0,
            radius: 20.5,
            ceiling_height: CEILING_HEIGHT_M,
        }
    }
}

impl LatticeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(Error::InvalidLattice(format!(
                "spacing must be positive, got {}",
                self.spacing
            )));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(Error::InvalidLattice(format!(
                "radius must be non-negative, got {}",
                self.radius
            )));
        }
        if !self.ceiling_height.is_finite() || self.ceiling_height <= 0.0 {
            return Err(Error::InvalidCeilingHeight(self.ceiling_height));
        }
        Ok(())
    }
}

/// Round half up, matching how the editor rounds canvas positions.
#[inline]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Lattice anchor for a horizontal position: both axes rounded to whole
/// meters. The lattice only moves when this anchor changes.
#[inline]
pub fn lattice_anchor(x: f64, z: f64) -> Point2D {
    Point2D::new(round_half_up(x), round_half_up(z))
}

/// Grid coordinates on one axis: `center - radius + n * spacing` while
/// below `center + radius`.
fn axis_steps(center: f64, config: &LatticeConfig) -> impl Iterator<Item = f64> {
    let start = center - config.radius;
    let end = center + config.radius;
    let spacing = config.spacing;
    (0u64..)
        .map(move |n| start + n as f64 * spacing)
        .take_while(move |&v| v < end)
}

/// Generate the sample lattice.
///
/// `anchor` is the grid center, normally [`lattice_anchor`] of the
/// transmitter. Positions outside the outline are excluded. An empty outline
/// or a zero floor count yields no points.
pub fn generate_lattice(
    outline: &BuildingOutline,
    floor_count: u32,
    anchor: Point2D,
    config: &LatticeConfig,
) -> Result<Vec<SamplePoint>> {
    config.validate()?;

    if outline.is_empty() || floor_count == 0 {
        return Ok(Vec::new());
    }

    let mut points = Vec::new();

    for x in axis_steps(anchor.x, config) {
        if !outline.contains_x(x) {
            continue;
        }
        for z in axis_steps(anchor.y, config) {
            if !outline.contains_z(z) {
                continue;
            }
            for layer in 0..floor_count {
                let y = layer as f64 * config.ceiling_height;
                points.push(SamplePoint::new(x, y, z, layer));
            }
        }
    }

    Ok(points)
}
