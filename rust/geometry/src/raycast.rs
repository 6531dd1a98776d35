// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray casting against wall rectangles
//!
//! Rays are bounded segments: only walls between the origin and the sample
//! point count. Walls are double sided and each rectangle is reported at
//! most once per ray, even when the ray crosses the diagonal shared by its
//! two triangles.

use crate::wall::{WallId, WallRectangle};
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// Determinant threshold below which a ray is parallel to a triangle
const PARALLEL_EPSILON: f64 = 1e-12;

/// Slack on hit distances and box overlap tests
const HIT_TOLERANCE: f64 = 1e-9;

/// Segments shorter than this have no direction.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Triangle definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculate triangle normal
    pub fn normal(&self) -> Vector3<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Calculate triangle area
    pub fn area(&self) -> f64 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).norm() * 0.5
    }
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns the parameter `t` of the hit along `dir` (the distance when `dir`
/// is unit length). Both faces are hit; hits behind the origin are not.
pub fn ray_triangle_distance(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    triangle: &Triangle,
) -> Option<f64> {
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let h = dir.cross(&edge2);
    let a = edge1.dot(&h);

    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - triangle.v0;
    let u = f * s.dot(&h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * dir.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t < -HIT_TOLERANCE {
        return None;
    }
    Some(t.max(0.0))
}

/// A ray from `origin` along unit `direction`, bounded to `length`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
    pub length: f64,
}

impl RaySegment {
    /// Segment from `from` to `to`; `None` when the points coincide.
    pub fn between(from: &Point3<f64>, to: &Point3<f64>) -> Option<Self> {
        let delta = to - from;
        let length = delta.norm();
        if length < DISTANCE_EPSILON {
            return None;
        }
        Some(Self {
            origin: *from,
            direction: delta / length,
            length,
        })
    }

    /// End point of the segment
    pub fn end(&self) -> Point3<f64> {
        self.origin + self.direction * self.length
    }

    fn aabb(&self) -> (Point3<f64>, Point3<f64>) {
        let end = self.end();
        (self.origin.inf(&end), self.origin.sup(&end))
    }
}

/// Axis-aligned bounds of a wall rectangle
fn wall_aabb(wall: &WallRectangle) -> (Point3<f64>, Point3<f64>) {
    let [v0, v1, v2, v3] = wall.vertices;
    (v0.inf(&v1).inf(&v2).inf(&v3), v0.sup(&v1).sup(&v2).sup(&v3))
}

#[inline]
fn boxes_overlap(a: &(Point3<f64>, Point3<f64>), b: &(Point3<f64>, Point3<f64>)) -> bool {
    a.0.x <= b.1.x + HIT_TOLERANCE
        && b.0.x <= a.1.x + HIT_TOLERANCE
        && a.0.y <= b.1.y + HIT_TOLERANCE
        && b.0.y <= a.1.y + HIT_TOLERANCE
        && a.0.z <= b.1.z + HIT_TOLERANCE
        && b.0.z <= a.1.z + HIT_TOLERANCE
}

/// Nearest hit of a bounded ray on one wall rectangle.
///
/// Both triangles are tested but the rectangle yields a single distance.
pub fn intersect_wall(ray: &RaySegment, wall: &WallRectangle) -> Option<f64> {
    wall.triangles()
        .iter()
        .filter_map(|triangle| ray_triangle_distance(&ray.origin, &ray.direction, triangle))
        .filter(|&t| t <= ray.length + HIT_TOLERANCE)
        .reduce(f64::min)
}

/// One wall crossed by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub wall: WallId,
    /// Distance from the ray origin
    pub distance: f64,
    pub loss_db: f64,
}

/// Hits of one ray, most rays cross only a handful of walls
pub type WallHits = SmallVec<[WallHit; 8]>;

/// Every wall crossed by a bounded ray, nearest first, one entry per
/// rectangle.
pub fn walls_crossed(ray: &RaySegment, walls: &[WallRectangle]) -> WallHits {
    let ray_box = ray.aabb();
    let mut hits = WallHits::new();

    for wall in walls {
        if !boxes_overlap(&ray_box, &wall_aabb(wall)) {
            continue;
        }
        if let Some(distance) = intersect_wall(ray, wall) {
            hits.push(WallHit {
                wall: wall.id,
                distance,
                loss_db: wall.loss_db(),
            });
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Total material loss along a bounded ray.
pub fn wall_loss_db(ray: &RaySegment, walls: &[WallRectangle]) -> f64 {
    walls_crossed(ray, walls).iter().map(|hit| hit.loss_db).sum()
}
