// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WiFi-Coverage Geometry
//!
//! Building geometry for coverage estimation: wall rectangles extruded from
//! floor-plan segments, the planar building outline, the sample lattice and
//! bounded ray casting with nalgebra.

pub mod error;
pub mod lattice;
pub mod mesh;
pub mod outline;
pub mod raycast;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use lattice::{generate_lattice, lattice_anchor, LatticeConfig};
pub use mesh::{wall_to_mesh, walls_to_mesh, Mesh};
pub use outline::{extract_outline, BuildingOutline};
pub use raycast::{
    intersect_wall, ray_triangle_distance, wall_loss_db, walls_crossed, RaySegment, Triangle,
    WallHit, WallHits, DISTANCE_EPSILON,
};
pub use wall::{build_walls, count_degenerate, extrude_segment, floor_span, WallId, WallRectangle};
