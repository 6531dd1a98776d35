// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use wifi_coverage_geometry::LatticeConfig;

/// Link budget terms applied to every sample point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropagationConfig {
    /// Loss between radio and antenna (dB)
    pub cable_loss_db: f64,
    /// Transmit antenna gain (dBi)
    pub antenna_gain_db: f64,
    /// Allowance for interference and effects not modeled, subtracted from
    /// every point (dB)
    pub noise_margin_db: f64,
    /// Background noise level used for SNR reporting (dBm)
    pub noise_floor_dbm: f64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            cable_loss_db: 0.0,
            antenna_gain_db: 0.0,
            noise_margin_db: 10.0,
            noise_floor_dbm: -90.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub propagation: PropagationConfig,
    pub lattice: LatticeConfig,
    /// Lowest accepted transmitter height
    pub ground_offset: f64,
    /// Spread the attenuation pass over the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            propagation: PropagationConfig::default(),
            lattice: LatticeConfig::default(),
            ground_offset: 0.0,
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Check every value is usable.
    pub fn validate(&self) -> Result<()> {
        self.lattice.validate()?;

        let p = &self.propagation;
        for (name, value) in [
            ("cable_loss_db", p.cable_loss_db),
            ("antenna_gain_db", p.antenna_gain_db),
            ("noise_margin_db", p.noise_margin_db),
            ("noise_floor_dbm", p.noise_floor_dbm),
            ("ground_offset", self.ground_offset),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{} must be finite, got {}", name, value)));
            }
        }
        Ok(())
    }
}
