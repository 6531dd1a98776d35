// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # WiFi-Coverage Core
//!
//! Plain data types shared by the coverage crates and the import boundary
//! for floor-plan editor exports.
//!
//! ## Overview
//!
//! - **Types**: points, wall segments, materials, sample points and
//!   coverage bands
//! - **Units**: the one-time pixel to meter conversion
//! - **Floor plans**: parsing the editor's per-floor canvas documents into a
//!   [`BuildingPlan`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wifi_coverage_core::{BuildingPlan, PlanUnits};
//!
//! let export = std::fs::read_to_string("store.json")?;
//! let plan = BuildingPlan::from_editor_json(&export, &PlanUnits::default())?;
//! println!("{} walls on {} floors", plan.segments.len(), plan.floor_count);
//! ```

pub mod error;
pub mod floorplan;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use floorplan::{BuildingPlan, EditorStore, FloorDocument, WallRecord};
pub use types::{
    CoverageBand, Footprint, Material, Point2D, Point3D, Reading, SamplePoint, WallSegment,
};
pub use units::{PlanUnits, CEILING_HEIGHT_M, EDITOR_GRID_PX};
