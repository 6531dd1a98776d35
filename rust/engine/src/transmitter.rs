// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The access point being positioned

use crate::propagation::FrequencyBand;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use wifi_coverage_core::Point3D;
use wifi_coverage_geometry::BuildingOutline;

/// Height of a freshly placed transmitter (desk height)
pub const DEFAULT_TRANSMITTER_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transmitter {
    pub position: Point3D,
    pub band: FrequencyBand,
}

impl Transmitter {
    pub fn new(position: Point3D, band: FrequencyBand) -> Self {
        Self { position, band }
    }

    /// Transmitter at the outline centroid, at default height
    pub fn at_centroid(outline: &BuildingOutline, band: FrequencyBand) -> Self {
        let centroid = outline.centroid();
        Self {
            position: Point3D::new(centroid.x, DEFAULT_TRANSMITTER_HEIGHT, centroid.y),
            band,
        }
    }

    #[inline]
    pub fn point(&self) -> Point3<f64> {
        self.position.to_nalgebra()
    }
}

impl Default for Transmitter {
    fn default() -> Self {
        Self {
            position: Point3D::new(0.0, DEFAULT_TRANSMITTER_HEIGHT, 0.0),
            band: FrequencyBand::default(),
        }
    }
}
