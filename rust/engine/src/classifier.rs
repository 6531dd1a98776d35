// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Signal classification
//!
//! Bands are checked strongest first with strict `>` comparisons, so a value
//! sitting exactly on a threshold falls into the weaker band. Anything that
//! passes no threshold (including NaN) is [`CoverageBand::Dead`].

use wifi_coverage_core::CoverageBand;

/// Lower (exclusive) dBm bound of each band, strongest first
pub const BAND_THRESHOLDS: [(f64, CoverageBand); 5] = [
    (-60.0, CoverageBand::Excellent),
    (-65.0, CoverageBand::Good),
    (-70.0, CoverageBand::Fair),
    (-75.0, CoverageBand::Weak),
    (-85.0, CoverageBand::Poor),
];

/// Map a received power to its coverage band.
#[inline]
pub fn classify(dbm: f64) -> CoverageBand {
    BAND_THRESHOLDS
        .iter()
        .find(|(threshold, _)| dbm > *threshold)
        .map_or(CoverageBand::Dead, |&(_, band)| band)
}

/// Exclusive lower bound of a band; `None` for the weakest band.
pub fn lower_bound(band: CoverageBand) -> Option<f64> {
    BAND_THRESHOLDS
        .iter()
        .find(|(_, b)| *b == band)
        .map(|&(threshold, _)| threshold)
}
