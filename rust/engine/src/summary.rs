// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coverage statistics over a classified lattice

use rustc_hash::FxHashMap;
use serde::Serialize;
use wifi_coverage_core::{CoverageBand, SamplePoint};

#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageSummary {
    /// Points in the lattice, classified or not
    pub total: usize,
    /// Points that carry a reading
    pub classified: usize,
    pub band_counts: FxHashMap<CoverageBand, usize>,
    pub min_dbm: Option<f64>,
    pub max_dbm: Option<f64>,
    pub mean_dbm: Option<f64>,
}

impl CoverageSummary {
    pub fn from_points(points: &[SamplePoint]) -> Self {
        let mut summary = Self {
            total: points.len(),
            ..Default::default()
        };
        let mut sum = 0.0;

        for reading in points.iter().filter_map(|p| p.reading) {
            *summary.band_counts.entry(reading.band).or_insert(0) += 1;
            summary.classified += 1;
            sum += reading.dbm;
            summary.min_dbm = Some(summary.min_dbm.map_or(reading.dbm, |m| m.min(reading.dbm)));
            summary.max_dbm = Some(summary.max_dbm.map_or(reading.dbm, |m| m.max(reading.dbm)));
        }

        if summary.classified > 0 {
            summary.mean_dbm = Some(sum / summary.classified as f64);
        }
        summary
    }

    #[inline]
    pub fn count(&self, band: CoverageBand) -> usize {
        self.band_counts.get(&band).copied().unwrap_or(0)
    }

    /// Share of classified points in `band`, 0 when nothing is classified
    pub fn fraction(&self, band: CoverageBand) -> f64 {
        if self.classified == 0 {
            return 0.0;
        }
        self.count(band) as f64 / self.classified as f64
    }
}
