// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end coverage scenarios

use approx::assert_relative_eq;
use wifi_coverage_core::{
    BuildingPlan, Material, PlanUnits, Point2D, Point3D, SamplePoint, WallRecord, WallSegment,
};
use wifi_coverage_engine::{
    compute, Coordinator, CoordinatorState, EngineConfig, Error, FrequencyBand,
    PlacementViolation, PropagationConfig, Transmitter,
};
use wifi_coverage_geometry::build_walls;

fn segment(x1: f64, y1: f64, x2: f64, y2: f64, floor: u32) -> WallSegment {
    WallSegment::new(
        Point2D::new(x1, y1),
        Point2D::new(x2, y2),
        floor,
        Material::Drywall,
    )
    .unwrap()
}

fn rectangle(width: f64, depth: f64, floor: u32) -> Vec<WallSegment> {
    vec![
        segment(0.0, 0.0, width, 0.0, floor),
        segment(width, 0.0, width, depth, floor),
        segment(width, depth, 0.0, depth, floor),
        segment(0.0, depth, 0.0, 0.0, floor),
    ]
}

#[test]
fn concrete_wall_costs_exactly_twelve_db() {
    // Editor record in pixels: (0, 0) to (500, 0) is 10 m at 50 px/m
    let record: WallRecord = serde_json::from_str(
        r#"{"type": "line", "x1": 0, "y1": 0, "x2": 500, "y2": 0,
            "left": 0, "top": 0, "width": 500, "height": 0,
            "floorNumber": 1, "material": "concrete"}"#,
    )
    .unwrap();
    let wall = record.to_segment(1, &PlanUnits::default()).unwrap();
    assert_eq!(wall.end, Point2D::new(10.0, 0.0));

    let walls = build_walls(&[wall], 2.4).unwrap();
    let transmitter = Transmitter::new(Point3D::new(2.5, 1.2, 2.5), FrequencyBand::Ghz2_4);

    // Same distance from the transmitter, one on each side of the wall
    let mut points = vec![
        SamplePoint::new(2.5, 1.2, -2.5, 0),
        SamplePoint::new(2.5, 1.2, 7.5, 0),
    ];
    compute(&transmitter, &walls, &mut points, &PropagationConfig::default());

    let behind = points[0].dbm().unwrap();
    let clear = points[1].dbm().unwrap();
    assert_relative_eq!(clear - behind, 12.0, epsilon = 1e-9);
}

#[test]
fn empty_geometry_yields_no_points() {
    let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
    let report = coordinator.load_geometry(&[], 1).unwrap();

    assert_eq!(report.wall_count, 0);
    assert!(report.outline.is_empty());
    assert!(coordinator.recompute().unwrap().is_empty());
    assert_eq!(coordinator.state(), CoordinatorState::GeometryLoaded);

    // The transmitter is still there to draw
    assert!(coordinator.transmitter().is_some());
    assert_eq!(coordinator.summary().total, 0);
}

#[test]
fn placement_beyond_outline_is_rejected() {
    let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
    coordinator.load_geometry(&rectangle(10.0, 8.0, 1), 1).unwrap();
    coordinator
        .place_transmitter(Point3D::new(3.0, 1.2, 3.0), FrequencyBand::Ghz2_4)
        .unwrap();
    let before = coordinator.transmitter();

    let max_x = coordinator.outline().corners()[3].x;
    let result =
        coordinator.place_transmitter(Point3D::new(max_x + 0.5, 1.2, 3.0), FrequencyBand::Ghz5);

    assert!(matches!(
        result,
        Err(Error::InvalidPlacement(PlacementViolation::OutsideOutline { .. }))
    ));
    assert_eq!(coordinator.transmitter(), before);
}

#[test]
fn upper_layer_sits_one_ceiling_above_ground() {
    let mut segments = rectangle(10.0, 8.0, 1);
    segments.extend(rectangle(10.0, 8.0, 2));

    let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
    let report = coordinator.load_geometry(&segments, 2).unwrap();
    assert_eq!(report.wall_count, 8);

    coordinator
        .place_transmitter(Point3D::new(4.0, 1.2, 4.0), FrequencyBand::Ghz2_4)
        .unwrap();
    let points = coordinator.recompute().unwrap();

    let upper: Vec<_> = points.iter().filter(|p| p.layer == 1).collect();
    let lower: Vec<_> = points.iter().filter(|p| p.layer == 0).collect();
    assert!(!upper.is_empty());
    assert_eq!(upper.len(), lower.len());
    for p in upper {
        assert_relative_eq!(p.y, 2.40, epsilon = 1e-12);
    }
    for p in lower {
        assert_eq!(p.y, 0.0);
    }
}

#[test]
fn recompute_is_idempotent() {
    let mut segments = rectangle(12.0, 9.0, 1);
    segments.push(segment(6.0, 0.0, 6.0, 9.0, 1));
    segments.push(segment(0.0, 4.0, 12.0, 4.0, 2));

    for parallel in [false, true] {
        let config = EngineConfig {
            parallel,
            ..Default::default()
        };
        let mut coordinator = Coordinator::new(config).unwrap();
        coordinator.load_geometry(&segments, 2).unwrap();

        let first = coordinator.recompute().unwrap().to_vec();
        let second = coordinator.recompute().unwrap().to_vec();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

#[test]
fn parallel_and_sequential_coordinators_agree() {
    let mut segments = rectangle(12.0, 9.0, 1);
    segments.push(segment(6.0, 0.0, 6.0, 9.0, 1));

    let mut sequential = Coordinator::new(EngineConfig::default()).unwrap();
    let mut parallel = Coordinator::new(EngineConfig {
        parallel: true,
        ..Default::default()
    })
    .unwrap();
    sequential.load_geometry(&segments, 1).unwrap();
    parallel.load_geometry(&segments, 1).unwrap();

    assert_eq!(sequential.recompute().unwrap(), parallel.recompute().unwrap());
}

#[test]
fn degenerate_segments_do_not_become_walls() {
    let mut segments = rectangle(10.0, 10.0, 1);
    segments.push(segment(3.0, 3.0, 3.0, 3.0, 1));
    segments.push(segment(7.0, 7.0, 7.0, 7.0, 1));

    let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
    let report = coordinator.load_geometry(&segments, 1).unwrap();
    assert_eq!(report.wall_count, 4);
    assert_eq!(report.degenerate_count, 2);
    assert!(report.wall_count <= segments.len());
}

#[test]
fn editor_export_loads_end_to_end() {
    let floor = r#"{"objects": [
        {"type": "line", "x1": 0, "y1": 0, "x2": 500, "y2": 0,
         "left": 0, "top": 0, "width": 500, "height": 0, "material": "concrete"},
        {"type": "line", "x1": 500, "y1": 0, "x2": 500, "y2": 400,
         "left": 500, "top": 0, "width": 0, "height": 400, "material": "wood"},
        {"type": "rect", "left": 10, "top": 10, "width": 5, "height": 5}
    ]}"#;
    let store = serde_json::json!({
        "currentFloors": "1",
        "myFloor1": floor,
    })
    .to_string();

    let mut coordinator = Coordinator::new(EngineConfig::default()).unwrap();
    let report = coordinator
        .load_editor_json(&store, &PlanUnits::default())
        .unwrap();
    assert_eq!(report.wall_count, 2);
    assert_relative_eq!(report.outline.width(), 10.0);
    assert_relative_eq!(report.outline.depth(), 8.0);

    let points = coordinator.recompute().unwrap();
    assert!(points.iter().all(|p| p.reading.is_some()));

    let plan = BuildingPlan::from_editor_json(&store, &PlanUnits::default()).unwrap();
    assert_eq!(plan.segments.len(), 2);
}
