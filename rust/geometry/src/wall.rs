// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall extrusion - turning 2D wall segments into vertical 3D rectangles
//!
//! A wall on floor `f` spans heights `[(f - 1) * H, f * H]`. Floors are
//! never renumbered, so a wall on floor 3 sits at the third level even when
//! floor 2 has no walls.

use crate::error::{Error, Result};
use crate::raycast::Triangle;
use nalgebra::Point3;
use wifi_coverage_core::{Material, WallSegment};

/// Index of a rectangle in the slice produced by [`build_walls`]
pub type WallId = usize;

/// A wall extruded between its floor's ground and ceiling
///
/// Vertices follow the quad order `top-start, top-end, bottom-end,
/// bottom-start`; the two triangles are `(0, 1, 2)` and `(0, 2, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WallRectangle {
    pub id: WallId,
    /// Owning floor (1-based)
    pub floor: u32,
    pub material: Material,
    pub vertices: [Point3<f64>; 4],
}

impl WallRectangle {
    /// Attenuation for one crossing of this wall
    #[inline]
    pub fn loss_db(&self) -> f64 {
        self.material.loss_db()
    }

    /// The two triangles covering the quad
    #[inline]
    pub fn triangles(&self) -> [Triangle; 2] {
        let [v0, v1, v2, v3] = self.vertices;
        [Triangle::new(v0, v1, v2), Triangle::new(v0, v2, v3)]
    }

    /// Vertical span `(bottom, top)`
    pub fn height_range(&self) -> (f64, f64) {
        (self.vertices[3].y, self.vertices[0].y)
    }
}

/// Vertical span `(bottom, top)` of a 1-based floor.
#[inline]
pub fn floor_span(floor: u32, ceiling_height: f64) -> (f64, f64) {
    let bottom = floor.saturating_sub(1) as f64 * ceiling_height;
    (bottom, floor as f64 * ceiling_height)
}

/// Extrude one wall segment.
///
/// The footprint runs from the bounding box's `(left, top)` corner across
/// `(width, height)`. A wall drawn along the anti-diagonal of its box
/// instead starts at `(left, top + height)` and runs `-height` in z, so the
/// rectangle follows the drawn line rather than the opposite diagonal.
pub fn extrude_segment(id: WallId, segment: &WallSegment, ceiling_height: f64) -> WallRectangle {
    let bounds = &segment.bounds;

    let (z_origin, z_extent) = if segment.is_backward_diagonal() {
        (bounds.top + bounds.height, -bounds.height)
    } else {
        (bounds.top, bounds.height)
    };

    let x_start = bounds.left;
    let z_start = z_origin;
    let x_end = bounds.left + bounds.width;
    let z_end = z_origin + z_extent;

    let (bottom, top) = floor_span(segment.floor, ceiling_height);

    WallRectangle {
        id,
        floor: segment.floor,
        material: segment.material,
        vertices: [
            Point3::new(x_start, top, z_start),
            Point3::new(x_end, top, z_end),
            Point3::new(x_end, bottom, z_end),
            Point3::new(x_start, bottom, z_start),
        ],
    }
}

/// Build wall rectangles for every usable segment.
///
/// Degenerate segments (zero extent on both axes) are dropped silently.
/// Rectangle ids are their positions in the returned vector.
pub fn build_walls(segments: &[WallSegment], ceiling_height: f64) -> Result<Vec<WallRectangle>> {
    if !ceiling_height.is_finite() || ceiling_height <= 0.0 {
        return Err(Error::InvalidCeilingHeight(ceiling_height));
    }

    let walls = segments
        .iter()
        .filter(|segment| !segment.is_degenerate())
        .enumerate()
        .map(|(id, segment)| extrude_segment(id, segment, ceiling_height))
        .collect();

    Ok(walls)
}

/// Number of segments [`build_walls`] drops.
pub fn count_degenerate(segments: &[WallSegment]) -> usize {
    segments.iter().filter(|s| s.is_degenerate()).count()
}
