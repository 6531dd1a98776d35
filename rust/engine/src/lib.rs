// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # WiFi-Coverage Engine
//!
//! Estimates received signal strength of one access point across a
//! multi-floor building and classifies every sample point into a coverage
//! band.
//!
//! ## Pipeline
//!
//! 1. Wall segments are extruded into per-floor rectangles
//! 2. A sample lattice is laid around the transmitter, clipped to the outline
//! 3. Each point gets free-space path loss plus the loss of every wall on
//!    the direct path
//! 4. The result is bucketed into [`CoverageBand`]s
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wifi_coverage_engine::{Coordinator, EngineConfig, FrequencyBand};
//! use wifi_coverage_core::{PlanUnits, Point3D};
//!
//! let mut coordinator = Coordinator::new(EngineConfig::default())?;
//! coordinator.load_editor_json(&export, &PlanUnits::default())?;
//! coordinator.place_transmitter(Point3D::new(4.0, 1.2, 3.0), FrequencyBand::Ghz5)?;
//! for point in coordinator.recompute()? {
//!     println!("{:?} {:?}", point.position(), point.band());
//! }
//! ```

pub mod attenuation;
pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod propagation;
pub mod summary;
pub mod transmitter;

pub use attenuation::{compute, compute_parallel, reading_at, received_power_dbm};
pub use classifier::{classify, lower_bound, BAND_THRESHOLDS};
pub use config::{EngineConfig, PropagationConfig};
pub use coordinator::{
    Coordinator, CoordinatorState, GeometryReport, RecomputeJob, RecomputeOutput,
};
pub use error::{Error, PlacementViolation, Result};
pub use propagation::{eirp_dbm, free_space_path_loss_db, FrequencyBand, FSPL_CONSTANT_DB};
pub use summary::CoverageSummary;
pub use transmitter::{Transmitter, DEFAULT_TRANSMITTER_HEIGHT};

pub use wifi_coverage_core::CoverageBand;
