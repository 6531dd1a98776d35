// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Free-space propagation
//!
//! FSPL(dB) = 20*log10(d) + 20*log10(f) + 20*log10(4π/c), with `d` in
//! meters and `f` in hertz. The last term is [`FSPL_CONSTANT_DB`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 20*log10(4π/c) for distances in meters and frequencies in hertz
pub const FSPL_CONSTANT_DB: f64 = -147.55;

/// Supported transmitter bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrequencyBand {
    /// 2.4 GHz at 100 mW
    #[default]
    #[serde(rename = "2.4ghz")]
    Ghz2_4,
    /// 5 GHz at 200 mW
    #[serde(rename = "5ghz")]
    Ghz5,
}

impl FrequencyBand {
    #[inline]
    pub fn frequency_hz(&self) -> f64 {
        match self {
            FrequencyBand::Ghz2_4 => 2.4e9,
            FrequencyBand::Ghz5 => 5.0e9,
        }
    }

    /// Radiated power of the band
    #[inline]
    pub fn milliwatts(&self) -> f64 {
        match self {
            FrequencyBand::Ghz2_4 => 100.0,
            FrequencyBand::Ghz5 => 200.0,
        }
    }

    #[inline]
    pub fn eirp_dbm(&self) -> f64 {
        eirp_dbm(self.milliwatts())
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyBand::Ghz2_4 => write!(f, "2.4 GHz"),
            FrequencyBand::Ghz5 => write!(f, "5 GHz"),
        }
    }
}

impl FromStr for FrequencyBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let normalized = normalized.trim_end_matches("ghz").trim();
        match normalized {
            "2.4" | "2" => Ok(FrequencyBand::Ghz2_4),
            "5" | "5.0" => Ok(FrequencyBand::Ghz5),
            other => Err(format!("unsupported band '{}', expected 2.4 or 5", other)),
        }
    }
}

/// Power in dBm of a transmitter radiating `milliwatts`.
#[inline]
pub fn eirp_dbm(milliwatts: f64) -> f64 {
    10.0 * milliwatts.log10()
}

/// Free-space path loss in dB; `distance_m` must be positive.
#[inline]
pub fn free_space_path_loss_db(distance_m: f64, frequency_hz: f64) -> f64 {
    20.0 * distance_m.log10() + 20.0 * frequency_hz.log10() + FSPL_CONSTANT_DB
}
