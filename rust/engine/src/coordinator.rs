// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coverage coordinator
//!
//! Owns the wall set, outline, transmitter and lattice, and drives the
//! pipeline `geometry -> lattice -> attenuation -> classification`.
//!
//! ```text
//! Idle --load--> GeometryLoaded --recompute--> LatticeReady --> Computed
//!                      ^                                           |
//!                      +------ place (anchor moved) / load --------+
//! ```
//!
//! Every input change bumps a generation counter. Hosts that run the
//! attenuation pass off the calling thread take a [`RecomputeJob`] with
//! [`Coordinator::snapshot`], run it anywhere and hand the output back to
//! [`Coordinator::apply`], which drops it if newer inputs arrived meanwhile.

use crate::attenuation::{compute, compute_parallel};
use crate::config::EngineConfig;
use crate::error::{Error, PlacementViolation, Result};
use crate::propagation::FrequencyBand;
use crate::summary::CoverageSummary;
use crate::transmitter::Transmitter;
use std::sync::Arc;
use std::time::Instant;
use wifi_coverage_core::{BuildingPlan, PlanUnits, Point2D, Point3D, SamplePoint, WallSegment};
use wifi_coverage_geometry::{
    build_walls, count_degenerate, extract_outline, generate_lattice, lattice_anchor,
    BuildingOutline, WallRectangle,
};

/// Pipeline stage reached with the current inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No geometry loaded
    Idle,
    /// Walls and outline built; lattice absent or stale
    GeometryLoaded,
    /// Lattice matches the transmitter anchor; readings may be stale
    LatticeReady,
    /// Every point carries a reading for the current inputs
    Computed,
}

/// Outcome of a geometry load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryReport {
    pub wall_count: usize,
    pub degenerate_count: usize,
    pub floor_count: u32,
    pub outline: BuildingOutline,
}

/// Owned inputs of one attenuation pass
#[derive(Debug, Clone)]
pub struct RecomputeJob {
    generation: u64,
    transmitter: Transmitter,
    walls: Arc<[WallRectangle]>,
    outline: BuildingOutline,
    floor_count: u32,
    config: EngineConfig,
    anchor: Option<Point2D>,
    points: Vec<SamplePoint>,
}

/// Result of [`RecomputeJob::run`]
#[derive(Debug, Clone)]
pub struct RecomputeOutput {
    pub generation: u64,
    anchor: Option<Point2D>,
    pub points: Vec<SamplePoint>,
}

impl RecomputeJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the pass. Touches nothing outside the job.
    pub fn run(mut self) -> Result<RecomputeOutput> {
        let anchor = refresh(
            &self.transmitter,
            &self.walls,
            &self.outline,
            self.floor_count,
            &self.config,
            self.anchor,
            &mut self.points,
        )?;
        Ok(RecomputeOutput {
            generation: self.generation,
            anchor,
            points: self.points,
        })
    }
}

/// Regenerate the lattice if its anchor moved, then classify every point.
/// Returns the anchor the lattice now sits on, `None` for an empty outline.
fn refresh(
    transmitter: &Transmitter,
    walls: &[WallRectangle],
    outline: &BuildingOutline,
    floor_count: u32,
    config: &EngineConfig,
    current_anchor: Option<Point2D>,
    points: &mut Vec<SamplePoint>,
) -> Result<Option<Point2D>> {
    if outline.is_empty() {
        points.clear();
        return Ok(None);
    }

    let anchor = lattice_anchor(transmitter.position.x, transmitter.position.z);
    if current_anchor != Some(anchor) {
        *points = generate_lattice(outline, floor_count, anchor, &config.lattice)?;
        tracing::debug!(
            points = points.len(),
            anchor_x = anchor.x,
            anchor_z = anchor.y,
            "Generated sample lattice"
        );
    }

    if config.parallel {
        compute_parallel(transmitter, walls, points, &config.propagation);
    } else {
        compute(transmitter, walls, points, &config.propagation);
    }
    Ok(Some(anchor))
}

/// Single owner of all coverage state
#[derive(Debug)]
pub struct Coordinator {
    config: EngineConfig,
    state: CoordinatorState,
    walls: Arc<[WallRectangle]>,
    outline: BuildingOutline,
    floor_count: u32,
    position: Option<Point3D>,
    band: FrequencyBand,
    anchor: Option<Point2D>,
    points: Vec<SamplePoint>,
    generation: u64,
}

impl Coordinator {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: CoordinatorState::Idle,
            walls: Arc::from(Vec::new()),
            outline: BuildingOutline::new(),
            floor_count: 0,
            position: None,
            band: FrequencyBand::default(),
            anchor: None,
            points: Vec::new(),
            generation: 0,
        })
    }

    /// Replace the building geometry.
    ///
    /// Degenerate segments are dropped. An existing transmitter placement
    /// survives when it is still valid for the new outline; otherwise the
    /// transmitter moves to the outline centroid. The lattice is discarded.
    pub fn load_geometry(
        &mut self,
        segments: &[WallSegment],
        floor_count: u32,
    ) -> Result<GeometryReport> {
        let walls = build_walls(segments, self.config.lattice.ceiling_height)?;
        let degenerate_count = count_degenerate(segments);
        let outline = extract_outline(segments);

        self.walls = Arc::from(walls);
        self.outline = outline;
        self.floor_count = floor_count;
        self.state = CoordinatorState::GeometryLoaded;
        self.anchor = None;
        self.points.clear();
        self.generation += 1;

        let keep = self
            .position
            .is_some_and(|p| self.check_placement(&p).is_ok());
        if !keep {
            self.position = Some(Transmitter::at_centroid(&outline, self.band).position);
        }

        tracing::info!(
            walls = self.walls.len(),
            degenerate = degenerate_count,
            floors = floor_count,
            width = outline.width(),
            depth = outline.depth(),
            empty = outline.is_empty(),
            "Loaded building geometry"
        );

        Ok(GeometryReport {
            wall_count: self.walls.len(),
            degenerate_count,
            floor_count,
            outline,
        })
    }

    /// Load a converted editor plan.
    pub fn load_plan(&mut self, plan: &BuildingPlan) -> Result<GeometryReport> {
        self.load_geometry(&plan.segments, plan.floor_count)
    }

    /// Parse an editor export and load it.
    pub fn load_editor_json(&mut self, json: &str, units: &PlanUnits) -> Result<GeometryReport> {
        let plan = BuildingPlan::from_editor_json(json, units)?;
        self.load_plan(&plan)
    }

    fn check_placement(&self, position: &Point3D) -> std::result::Result<(), PlacementViolation> {
        if self.state == CoordinatorState::Idle {
            return Err(PlacementViolation::NoGeometry);
        }
        let ground = self.config.ground_offset;
        if position.y.is_nan() || position.y < ground {
            return Err(PlacementViolation::BelowGround {
                y: position.y,
                ground,
            });
        }
        let outside = if self.outline.is_empty() {
            !position.x.is_finite() || !position.z.is_finite()
        } else {
            !self.outline.contains(position.x, position.z)
        };
        if outside {
            return Err(PlacementViolation::OutsideOutline {
                x: position.x,
                z: position.z,
            });
        }
        Ok(())
    }

    /// Move the transmitter and set its band.
    ///
    /// The position must lie inside the outline (edges included) and at or
    /// above the ground offset. A rejected placement leaves the transmitter
    /// and every other piece of state untouched.
    pub fn place_transmitter(&mut self, position: Point3D, band: FrequencyBand) -> Result<()> {
        if let Err(violation) = self.check_placement(&position) {
            tracing::debug!(%violation, "Rejected transmitter placement");
            return Err(Error::InvalidPlacement(violation));
        }

        self.position = Some(position);
        self.band = band;
        self.generation += 1;

        if self.state != CoordinatorState::GeometryLoaded {
            if self.anchor == Some(lattice_anchor(position.x, position.z)) {
                self.state = CoordinatorState::LatticeReady;
            } else {
                self.state = CoordinatorState::GeometryLoaded;
                self.anchor = None;
                self.points.clear();
            }
        }
        Ok(())
    }

    /// Switch band and recompute. Before any geometry is loaded the band is
    /// remembered for the first transmitter and nothing is computed.
    pub fn change_frequency(&mut self, band: FrequencyBand) -> Result<&[SamplePoint]> {
        self.band = band;
        self.generation += 1;
        if self.state == CoordinatorState::Computed {
            self.state = CoordinatorState::LatticeReady;
        }
        self.recompute()
    }

    /// Bring the lattice and every reading up to date.
    ///
    /// A no-op returning no points while idle or when the outline is empty.
    /// Calling it again with unchanged inputs yields identical readings.
    pub fn recompute(&mut self) -> Result<&[SamplePoint]> {
        let Some(transmitter) = self.transmitter() else {
            return Ok(&[]);
        };
        if self.state == CoordinatorState::Idle {
            return Ok(&[]);
        }

        let started = Instant::now();
        let anchor = refresh(
            &transmitter,
            &self.walls,
            &self.outline,
            self.floor_count,
            &self.config,
            self.anchor,
            &mut self.points,
        )?;
        self.install(anchor);

        tracing::debug!(
            points = self.points.len(),
            walls = self.walls.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Recomputed coverage"
        );
        Ok(&self.points)
    }

    fn install(&mut self, anchor: Option<Point2D>) {
        self.anchor = anchor;
        self.state = if anchor.is_some() {
            CoordinatorState::Computed
        } else {
            CoordinatorState::GeometryLoaded
        };
    }

    /// Capture the current inputs for an off-thread pass; `None` while idle.
    pub fn snapshot(&self) -> Option<RecomputeJob> {
        if self.state == CoordinatorState::Idle {
            return None;
        }
        let transmitter = self.transmitter()?;
        Some(RecomputeJob {
            generation: self.generation,
            transmitter,
            walls: Arc::clone(&self.walls),
            outline: self.outline,
            floor_count: self.floor_count,
            config: self.config,
            anchor: self.anchor,
            points: if self.anchor.is_some() {
                self.points.clone()
            } else {
                Vec::new()
            },
        })
    }

    /// Install a finished pass. Returns `false` and keeps the current state
    /// when the output was computed from outdated inputs.
    pub fn apply(&mut self, output: RecomputeOutput) -> bool {
        if output.generation != self.generation {
            tracing::debug!(
                stale = output.generation,
                current = self.generation,
                "Discarded stale recompute"
            );
            return false;
        }
        self.points = output.points;
        self.install(output.anchor);
        true
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Wall rectangles for rendering
    pub fn walls(&self) -> &[WallRectangle] {
        &self.walls
    }

    /// Current lattice with its latest readings
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn outline(&self) -> &BuildingOutline {
        &self.outline
    }

    pub fn transmitter(&self) -> Option<Transmitter> {
        self.position.map(|p| Transmitter::new(p, self.band))
    }

    pub fn band(&self) -> FrequencyBand {
        self.band
    }

    pub fn floor_count(&self) -> u32 {
        self.floor_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::from_points(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifi_coverage_core::Material;

    fn box_segments(width: f64, depth: f64, floor: u32) -> Vec<WallSegment> {
        let corners = [
            (0.0, 0.0, width, 0.0),
            (width, 0.0, width, depth),
            (width, depth, 0.0, depth),
            (0.0, depth, 0.0, 0.0),
        ];
        corners
            .iter()
            .map(|&(x1, y1, x2, y2)| {
                WallSegment::new(
                    Point2D::new(x1, y1),
                    Point2D::new(x2, y2),
                    floor,
                    Material::Drywall,
                )
                .unwrap()
            })
            .collect()
    }

    fn loaded() -> Coordinator {
        let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
        coordinator.load_geometry(&box_segments(10.0, 8.0, 1), 1).unwrap();
        coordinator
    }

    #[test]
    fn test_idle_is_inert() {
        let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert!(coordinator.recompute().unwrap().is_empty());
        assert!(coordinator.snapshot().is_none());
        assert!(coordinator.transmitter().is_none());

        let rejected = coordinator.place_transmitter(Point3D::new(0.0, 1.0, 0.0), FrequencyBand::Ghz5);
        assert!(matches!(
            rejected,
            Err(Error::InvalidPlacement(PlacementViolation::NoGeometry))
        ));

        // Band is remembered for the first transmitter
        coordinator.change_frequency(FrequencyBand::Ghz5).unwrap();
        coordinator.load_geometry(&box_segments(4.0, 4.0, 1), 1).unwrap();
        assert_eq!(coordinator.transmitter().unwrap().band, FrequencyBand::Ghz5);
    }

    #[test]
    fn test_load_places_default_transmitter() {
        let coordinator = loaded();
        assert_eq!(coordinator.state(), CoordinatorState::GeometryLoaded);
        assert_eq!(coordinator.walls().len(), 4);
        let tx = coordinator.transmitter().unwrap();
        assert_eq!(tx.position, Point3D::new(5.0, 1.2, 4.0));
        assert_eq!(tx.band, FrequencyBand::Ghz2_4);
    }

    #[test]
    fn test_state_progression() {
        let mut coordinator = loaded();
        let count = coordinator.recompute().unwrap().len();
        assert!(count > 0);
        assert_eq!(coordinator.state(), CoordinatorState::Computed);

        // Same anchor: lattice kept
        coordinator
            .place_transmitter(Point3D::new(5.2, 1.0, 4.1), FrequencyBand::Ghz2_4)
            .unwrap();
        assert_eq!(coordinator.state(), CoordinatorState::LatticeReady);
        assert_eq!(coordinator.points().len(), count);

        // Anchor moved: lattice dropped until the next recompute
        coordinator
            .place_transmitter(Point3D::new(1.0, 1.0, 1.0), FrequencyBand::Ghz2_4)
            .unwrap();
        assert_eq!(coordinator.state(), CoordinatorState::GeometryLoaded);
        assert!(coordinator.points().is_empty());
        assert!(!coordinator.recompute().unwrap().is_empty());
        assert_eq!(coordinator.state(), CoordinatorState::Computed);
    }

    #[test]
    fn test_rejected_placement_keeps_state() {
        let mut coordinator = loaded();
        coordinator.recompute().unwrap();
        let before = coordinator.transmitter();
        let generation = coordinator.generation();

        let below = coordinator.place_transmitter(Point3D::new(5.0, -0.5, 4.0), FrequencyBand::Ghz5);
        assert!(matches!(
            below,
            Err(Error::InvalidPlacement(PlacementViolation::BelowGround { .. }))
        ));
        let nan = coordinator.place_transmitter(Point3D::new(f64::NAN, 1.0, 4.0), FrequencyBand::Ghz5);
        assert!(nan.is_err());

        assert_eq!(coordinator.transmitter(), before);
        assert_eq!(coordinator.generation(), generation);
        assert_eq!(coordinator.state(), CoordinatorState::Computed);
    }

    #[test]
    fn test_placement_on_outline_edge_is_accepted() {
        let mut coordinator = loaded();
        coordinator
            .place_transmitter(Point3D::new(10.0, 0.0, 8.0), FrequencyBand::Ghz2_4)
            .unwrap();
        assert_eq!(
            coordinator.transmitter().unwrap().position,
            Point3D::new(10.0, 0.0, 8.0)
        );
    }

    #[test]
    fn test_reload_keeps_valid_placement() {
        let mut coordinator = loaded();
        coordinator
            .place_transmitter(Point3D::new(2.0, 1.0, 2.0), FrequencyBand::Ghz5)
            .unwrap();

        coordinator.load_geometry(&box_segments(20.0, 20.0, 1), 1).unwrap();
        assert_eq!(
            coordinator.transmitter().unwrap().position,
            Point3D::new(2.0, 1.0, 2.0)
        );

        // No longer inside: back to the centroid
        let shifted: Vec<_> = box_segments(4.0, 4.0, 1)
            .into_iter()
            .map(|s| {
                WallSegment::new(
                    Point2D::new(s.start.x + 50.0, s.start.y),
                    Point2D::new(s.end.x + 50.0, s.end.y),
                    1,
                    s.material,
                )
                .unwrap()
            })
            .collect();
        coordinator.load_geometry(&shifted, 1).unwrap();
        assert_eq!(
            coordinator.transmitter().unwrap().position,
            Point3D::new(52.0, 1.2, 2.0)
        );
    }

    #[test]
    fn test_change_frequency_recomputes() {
        let mut coordinator = loaded();
        let low: Vec<f64> = coordinator
            .recompute()
            .unwrap()
            .iter()
            .filter_map(|p| p.dbm())
            .collect();
        let high: Vec<f64> = coordinator
            .change_frequency(FrequencyBand::Ghz5)
            .unwrap()
            .iter()
            .filter_map(|p| p.dbm())
            .collect();

        assert_eq!(low.len(), high.len());
        assert_eq!(coordinator.state(), CoordinatorState::Computed);
        assert_eq!(coordinator.band(), FrequencyBand::Ghz5);
        // +3 dB of power, +6.4 dB of path loss
        assert!(low.iter().zip(&high).all(|(l, h)| h < l));
    }

    #[test]
    fn test_stale_job_is_discarded() {
        let mut coordinator = loaded();
        let job = coordinator.snapshot().unwrap();
        coordinator
            .place_transmitter(Point3D::new(3.0, 1.0, 3.0), FrequencyBand::Ghz2_4)
            .unwrap();

        let output = job.run().unwrap();
        assert!(!coordinator.apply(output));
        assert!(coordinator.points().is_empty());

        let fresh = coordinator.snapshot().unwrap().run().unwrap();
        assert!(coordinator.apply(fresh));
        assert_eq!(coordinator.state(), CoordinatorState::Computed);
        assert!(coordinator.points().iter().all(|p| p.reading.is_some()));
    }

    #[test]
    fn test_job_matches_synchronous_recompute() {
        let mut coordinator = loaded();
        let output = coordinator.snapshot().unwrap().run().unwrap();
        let synchronous = coordinator.recompute().unwrap().to_vec();
        assert_eq!(output.points, synchronous);
    }

    #[test]
    fn test_summary_covers_lattice() {
        let mut coordinator = loaded();
        coordinator.recompute().unwrap();
        let summary = coordinator.summary();
        assert_eq!(summary.total, coordinator.points().len());
        assert_eq!(summary.classified, summary.total);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.lattice.radius = f64::INFINITY;
        assert!(Coordinator::new(config).is_err());
    }
}
