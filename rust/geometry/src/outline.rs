// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building outline - planar bounds of all walls
//!
//! World x follows plan x and world z follows plan y.

use wifi_coverage_core::{Footprint, Point2D, WallSegment};

/// Planar bounding box of the building
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingOutline {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    /// Number of footprints folded in
    pub segment_count: usize,
}

impl BuildingOutline {
    /// Create an outline with no footprints
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
            segment_count: 0,
        }
    }

    /// No footprint has been added; there are no usable bounds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment_count == 0
    }

    /// Expand bounds to include a wall footprint
    #[inline]
    pub fn expand(&mut self, footprint: &Footprint) {
        self.min_x = self.min_x.min(footprint.left);
        self.max_x = self.max_x.max(footprint.right());
        self.min_z = self.min_z.min(footprint.top);
        self.max_z = self.max_z.max(footprint.bottom());
        self.segment_count += 1;
    }

    /// Center of the bounds; the origin when empty
    #[inline]
    pub fn centroid(&self) -> Point2D {
        if self.is_empty() {
            return Point2D::new(0.0, 0.0);
        }
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Corners as `[min-min, max-min, min-max, max-max]` in `(x, z)`;
    /// all at the origin when empty
    pub fn corners(&self) -> [Point2D; 4] {
        if self.is_empty() {
            return [Point2D::new(0.0, 0.0); 4];
        }
        [
            Point2D::new(self.min_x, self.min_z),
            Point2D::new(self.max_x, self.min_z),
            Point2D::new(self.min_x, self.max_z),
            Point2D::new(self.max_x, self.max_z),
        ]
    }

    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        !self.is_empty() && x >= self.min_x && x <= self.max_x
    }

    #[inline]
    pub fn contains_z(&self, z: f64) -> bool {
        !self.is_empty() && z >= self.min_z && z <= self.max_z
    }

    /// Whether a horizontal position lies inside the bounds (edges included)
    #[inline]
    pub fn contains(&self, x: f64, z: f64) -> bool {
        self.contains_x(x) && self.contains_z(z)
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn depth(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_z - self.min_z
        }
    }
}

impl Default for BuildingOutline {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold the footprints of all usable segments into an outline.
///
/// Degenerate segments are not walls and do not contribute; with no usable
/// segment the outline is empty.
pub fn extract_outline(segments: &[WallSegment]) -> BuildingOutline {
    let mut outline = BuildingOutline::new();
    for segment in segments.iter().filter(|s| !s.is_degenerate()) {
        outline.expand(&segment.bounds);
    }
    outline
}
