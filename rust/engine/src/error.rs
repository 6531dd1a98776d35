// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the coverage engine.

use std::fmt;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a transmitter placement was refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementViolation {
    /// No geometry has been loaded yet
    NoGeometry,
    /// Height is under the ground plane
    BelowGround { y: f64, ground: f64 },
    /// Horizontal position is outside the building outline
    OutsideOutline { x: f64, z: f64 },
}

impl fmt::Display for PlacementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementViolation::NoGeometry => write!(f, "no building geometry loaded"),
            PlacementViolation::BelowGround { y, ground } => {
                write!(f, "height {:.2} is below ground level {:.2}", y, ground)
            }
            PlacementViolation::OutsideOutline { x, z } => {
                write!(f, "position ({:.2}, {:.2}) is outside the building outline", x, z)
            }
        }
    }
}

/// Errors that can occur in the coverage engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transmitter was not moved; the previous placement is kept.
    #[error("transmitter placement rejected: {0}")]
    InvalidPlacement(PlacementViolation),

    /// Engine configuration values are out of range.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Geometry(#[from] wifi_coverage_geometry::Error),

    #[error(transparent)]
    Core(#[from] wifi_coverage_core::Error),
}
