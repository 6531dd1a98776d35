// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray attenuation
//!
//! Received power at a sample point is
//!
//! ```text
//! dBm = EIRP - FSPL(d, f) - cable_loss + antenna_gain - Σ wall_loss - noise_margin
//! ```
//!
//! where the wall sum covers every rectangle crossed by the segment from the
//! transmitter to the point, counted once per rectangle. A point coincident
//! with the transmitter has no path loss and no walls.
//!
//! Points are independent, so the parallel pass produces exactly the same
//! readings as the sequential one.

use crate::classifier::classify;
use crate::config::PropagationConfig;
use crate::propagation::free_space_path_loss_db;
use crate::transmitter::Transmitter;
use nalgebra::Point3;
use rayon::prelude::*;
use wifi_coverage_core::{Reading, SamplePoint};
use wifi_coverage_geometry::{wall_loss_db, RaySegment, WallRectangle};

/// Received power estimate at `target`.
pub fn received_power_dbm(
    transmitter: &Transmitter,
    target: &Point3<f64>,
    walls: &[WallRectangle],
    config: &PropagationConfig,
) -> f64 {
    let budget = transmitter.band.eirp_dbm() - config.cable_loss_db + config.antenna_gain_db
        - config.noise_margin_db;

    match RaySegment::between(&transmitter.point(), target) {
        Some(ray) => {
            let fspl = free_space_path_loss_db(ray.length, transmitter.band.frequency_hz());
            budget - fspl - wall_loss_db(&ray, walls)
        }
        // Colocated: strongest possible reading
        None => budget,
    }
}

/// Full reading (power, SNR and band) at `target`.
#[inline]
pub fn reading_at(
    transmitter: &Transmitter,
    target: &Point3<f64>,
    walls: &[WallRectangle],
    config: &PropagationConfig,
) -> Reading {
    let dbm = received_power_dbm(transmitter, target, walls, config);
    Reading {
        dbm,
        snr_db: dbm - config.noise_floor_dbm,
        band: classify(dbm),
    }
}

/// Classify every point in place.
pub fn compute(
    transmitter: &Transmitter,
    walls: &[WallRectangle],
    points: &mut [SamplePoint],
    config: &PropagationConfig,
) {
    for point in points.iter_mut() {
        point.reading = Some(reading_at(transmitter, &point.position(), walls, config));
    }
}

/// [`compute`] spread over the rayon pool.
pub fn compute_parallel(
    transmitter: &Transmitter,
    walls: &[WallRectangle],
    points: &mut [SamplePoint],
    config: &PropagationConfig,
) {
    points.par_iter_mut().for_each(|point| {
        point.reading = Some(reading_at(transmitter, &point.position(), walls, config));
    });
}
