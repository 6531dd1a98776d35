// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for coverage estimation
//!
//! Plan coordinates are 2D `(x, y)` as drawn in the editor. In 3D the plan
//! `y` axis becomes world `z` and world `y` is height above the ground plane.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// A 2D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A 3D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

/// Wall construction material
///
/// Each material attenuates a ray by a fixed number of dB per wall crossed.
/// Tags that are not recognized become [`Material::Unknown`], which adds no
/// loss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Drywall,
    Wood,
    Concrete,
    Glass,
    #[default]
    Unknown,
}

impl Material {
    /// All known materials, in table order.
    pub const ALL: [Material; 5] = [
        Material::Drywall,
        Material::Wood,
        Material::Concrete,
        Material::Glass,
        Material::Unknown,
    ];

    /// Parse an editor material tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "drywall" => Material::Drywall,
            "wood" => Material::Wood,
            "concrete" => Material::Concrete,
            "glass" => Material::Glass,
            _ => Material::Unknown,
        }
    }

    /// Canonical editor tag
    pub fn tag(&self) -> &'static str {
        match self {
            Material::Drywall => "drywall",
            Material::Wood => "wood",
            Material::Concrete => "concrete",
            Material::Glass => "glass",
            Material::Unknown => "unknown",
        }
    }

    /// Attenuation in dB for one wall crossing
    #[inline]
    pub fn loss_db(&self) -> f64 {
        match self {
            Material::Drywall => 3.0,
            Material::Wood => 4.0,
            Material::Concrete => 12.0,
            Material::Glass => 2.0,
            Material::Unknown => 0.0,
        }
    }
}

/// Axis-aligned bounding box of a wall segment in plan coordinates
///
/// `left`/`top` is the minimum corner; `width`/`height` are non-negative
/// extents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Footprint {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Footprint {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounding box spanned by two points.
    pub fn from_points(a: &Point2D, b: &Point2D) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Tolerance below which a footprint extent counts as zero.
pub const DEGENERATE_EXTENT: f64 = 1e-9;

/// A straight wall drawn on one floor, in meters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallSegment {
    /// Drawn start point
    pub start: Point2D,
    /// Drawn end point
    pub end: Point2D,
    /// Bounding box of the wall
    pub bounds: Footprint,
    /// Owning floor (1-based)
    pub floor: u32,
    pub material: Material,
}

impl WallSegment {
    /// Create a wall whose bounding box is derived from its endpoints.
    pub fn new(start: Point2D, end: Point2D, floor: u32, material: Material) -> Result<Self> {
        let bounds = Footprint::from_points(&start, &end);
        Self::with_bounds(start, end, bounds, floor, material)
    }

    /// Create a wall with an explicit bounding box (as reported by the editor).
    pub fn with_bounds(
        start: Point2D,
        end: Point2D,
        bounds: Footprint,
        floor: u32,
        material: Material,
    ) -> Result<Self> {
        if floor == 0 {
            return Err(Error::InvalidFloor(floor));
        }
        Ok(Self {
            start,
            end,
            bounds,
            floor,
            material,
        })
    }

    /// True for click-without-drag artifacts: zero extent on both axes.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.bounds.width.abs() < DEGENERATE_EXTENT && self.bounds.height.abs() < DEGENERATE_EXTENT
    }

    /// True when the wall was drawn along the anti-diagonal of its bounding
    /// box: x grows while y shrinks, or the reverse.
    #[inline]
    pub fn is_backward_diagonal(&self) -> bool {
        let (x1, y1, x2, y2) = (self.start.x, self.start.y, self.end.x, self.end.y);
        (x2 > x1 && y2 < y1) || (x2 < x1 && y2 > y1)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Coverage quality band, weakest first so that derived ordering ranks
/// stronger bands higher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CoverageBand {
    Dead,
    Poor,
    Weak,
    Fair,
    Good,
    Excellent,
}

impl CoverageBand {
    /// All bands, strongest first.
    pub const ALL: [CoverageBand; 6] = [
        CoverageBand::Excellent,
        CoverageBand::Good,
        CoverageBand::Fair,
        CoverageBand::Weak,
        CoverageBand::Poor,
        CoverageBand::Dead,
    ];

    /// Marker color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            CoverageBand::Excellent => 0x2ae300,
            CoverageBand::Good => 0xa8e300,
            CoverageBand::Fair => 0xfdff00,
            CoverageBand::Weak => 0xffdb00,
            CoverageBand::Poor => 0xff9a00,
            CoverageBand::Dead => 0xff3300,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoverageBand::Excellent => "excellent",
            CoverageBand::Good => "good",
            CoverageBand::Fair => "fair",
            CoverageBand::Weak => "weak",
            CoverageBand::Poor => "poor",
            CoverageBand::Dead => "dead",
        }
    }
}

/// Classification written onto a sample point by the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Received power estimate
    pub dbm: f64,
    /// Signal-to-noise ratio against the configured noise floor
    pub snr_db: f64,
    pub band: CoverageBand,
}

/// A measurement point of the coverage lattice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Sample layer (0 = ground plane)
    pub layer: u32,
    /// Latest classification, `None` until the first recompute
    pub reading: Option<Reading>,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, z: f64, layer: u32) -> Self {
        Self {
            x,
            y,
            z,
            layer,
            reading: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn dbm(&self) -> Option<f64> {
        self.reading.map(|r| r.dbm)
    }

    pub fn band(&self) -> Option<CoverageBand> {
        self.reading.map(|r| r.band)
    }
}
