// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI defaults loaded from environment variables.

use wifi_coverage_engine::EngineConfig;

/// Defaults applied before command-line overrides.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lattice spacing in meters.
    pub spacing: f64,
    /// Lattice half-width around the transmitter in meters.
    pub radius: f64,
    /// Noise margin subtracted from every reading in dB.
    pub noise_margin_db: f64,
    /// Editor pixels per meter.
    pub pixels_per_meter: f64,
    /// Run the attenuation pass on the rayon pool.
    pub parallel: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        Self {
            spacing: env_or("COVERAGE_SPACING", defaults.lattice.spacing),
            radius: env_or("COVERAGE_RADIUS", defaults.lattice.radius),
            noise_margin_db: env_or(
                "COVERAGE_NOISE_MARGIN_DB",
                defaults.propagation.noise_margin_db,
            ),
            pixels_per_meter: env_or(
                "COVERAGE_PIXELS_PER_METER",
                wifi_coverage_core::EDITOR_GRID_PX,
            ),
            parallel: std::env::var("COVERAGE_PARALLEL")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.parallel),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.lattice.spacing = self.spacing;
        config.lattice.radius = self.radius;
        config.propagation.noise_margin_db = self.noise_margin_db;
        config.parallel = self.parallel;
        config
    }
}

fn env_or(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
