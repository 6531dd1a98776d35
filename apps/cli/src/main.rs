// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: estimate WiFi coverage for a floor-plan editor export
//!
//! Usage:
//!   coverage-map <store.json> [options]

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wifi_coverage_core::{BuildingPlan, CoverageBand, PlanUnits, Point3D, SamplePoint};
use wifi_coverage_engine::{Coordinator, CoverageSummary, FrequencyBand, Transmitter};
use wifi_coverage_geometry::{walls_to_mesh, Mesh};

mod config;

use config::Config;

/// Parsed command line
#[derive(Debug)]
struct Args {
    store_path: PathBuf,
    transmitter: Option<Point3D>,
    band: FrequencyBand,
    json_path: Option<PathBuf>,
    obj_path: Option<PathBuf>,
}

/// Document written by `--json`
#[derive(Serialize)]
struct CoverageReport<'a> {
    transmitter: Option<Transmitter>,
    floor_count: u32,
    wall_count: usize,
    summary: &'a CoverageSummary,
    points: &'a [SamplePoint],
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wifi_coverage_engine=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let raw: Vec<String> = env::args().collect();
    if raw.len() < 2 || raw[1] == "--help" || raw[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let mut config = Config::from_env();
    let args = parse_args(&raw, &mut config)?;

    let units = PlanUnits::new(config.pixels_per_meter)
        .context("COVERAGE_PIXELS_PER_METER must be a positive number")?;
    let export = fs::read_to_string(&args.store_path)
        .with_context(|| format!("cannot read '{}'", args.store_path.display()))?;
    let plan = BuildingPlan::from_editor_json(&export, &units)
        .with_context(|| format!("cannot import '{}'", args.store_path.display()))?;

    let mut coordinator =
        Coordinator::new(config.engine_config()).context("invalid engine configuration")?;
    let report = coordinator.load_plan(&plan)?;

    println!("=== WiFi Coverage Map ===");
    println!();
    println!("  Floors:          {}", report.floor_count);
    println!(
        "  Walls:           {} ({} degenerate dropped, {} records skipped)",
        report.wall_count, report.degenerate_count, plan.skipped_records
    );
    if report.outline.is_empty() {
        println!("  Outline:         empty");
    } else {
        println!(
            "  Outline:         {:.2} m x {:.2} m",
            report.outline.width(),
            report.outline.depth()
        );
    }

    let default_position = coordinator.transmitter().map(|tx| tx.position);
    let position = args.transmitter.or(default_position);
    if let Some(position) = position {
        if let Err(e) = coordinator.place_transmitter(position, args.band) {
            eprintln!("Warning: {}; keeping the default transmitter", e);
            coordinator.change_frequency(args.band)?;
        }
    }

    coordinator.recompute()?;
    let summary = coordinator.summary();

    if let Some(tx) = coordinator.transmitter() {
        println!(
            "  Transmitter:     ({:.2}, {:.2}, {:.2}) at {}",
            tx.position.x, tx.position.y, tx.position.z, tx.band
        );
    }
    print_histogram(&summary);

    if let Some(path) = &args.json_path {
        let document = CoverageReport {
            transmitter: coordinator.transmitter(),
            floor_count: coordinator.floor_count(),
            wall_count: coordinator.walls().len(),
            summary: &summary,
            points: coordinator.points(),
        };
        let file = fs::File::create(path)
            .with_context(|| format!("cannot create '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &document)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        println!("  Lattice written: {}", path.display());
    }

    if let Some(path) = &args.obj_path {
        let mesh = walls_to_mesh(coordinator.walls());
        write_obj(path, &mesh, coordinator.floor_count())?;
        println!(
            "  Walls written:   {} ({} triangles)",
            path.display(),
            mesh.triangle_count()
        );
    }

    Ok(())
}

fn parse_args(raw: &[String], config: &mut Config) -> Result<Args> {
    let mut args = Args {
        store_path: PathBuf::from(&raw[1]),
        transmitter: None,
        band: FrequencyBand::default(),
        json_path: None,
        obj_path: None,
    };

    let mut i = 2;
    while i < raw.len() {
        let flag = raw[i].as_str();
        let mut value = || next_value(raw, &mut i, flag);

        match flag {
            "--tx" => args.transmitter = Some(parse_position(value()?)?),
            "--band" => {
                args.band = value()?.parse().map_err(anyhow::Error::msg)?;
            }
            "--spacing" => config.spacing = parse_number(flag, value()?)?,
            "--radius" => config.radius = parse_number(flag, value()?)?,
            "--noise-margin" => config.noise_margin_db = parse_number(flag, value()?)?,
            "--json" => args.json_path = Some(PathBuf::from(value()?)),
            "--obj" => args.obj_path = Some(PathBuf::from(value()?)),
            "--parallel" => config.parallel = true,
            other => bail!("unknown option '{}', see --help", other),
        }
        i += 1;
    }

    Ok(args)
}

fn next_value<'a>(raw: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    raw.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} expects a value", flag))
}

fn parse_number(flag: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

/// `x,y,z` in meters
fn parse_position(value: &str) -> Result<Point3D> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|part| parse_number("--tx", part))
        .collect::<Result<_>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Point3D::new(*x, *y, *z)),
        _ => bail!("--tx expects x,y,z, got '{}'", value),
    }
}

fn print_histogram(summary: &CoverageSummary) {
    println!();
    println!("  Sample points:   {}", summary.total);
    if summary.classified == 0 {
        return;
    }
    for band in CoverageBand::ALL {
        let count = summary.count(band);
        let fraction = summary.fraction(band);
        let bar = "#".repeat((fraction * 40.0).round() as usize);
        println!(
            "    {:<10} {:>6} {:>5.1}%  {}",
            band.label(),
            count,
            fraction * 100.0,
            bar
        );
    }
    if let (Some(min), Some(max), Some(mean)) = (summary.min_dbm, summary.max_dbm, summary.mean_dbm)
    {
        println!(
            "  Signal:          min {:.1} dBm, mean {:.1} dBm, max {:.1} dBm",
            min, mean, max
        );
    }
}

/// Walls as a Wavefront OBJ (meters, Y-up)
fn write_obj(path: &Path, mesh: &Mesh, floor_count: u32) -> Result<()> {
    let file =
        fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# Generated by coverage-map")?;
    writeln!(
        out,
        "# {} floors, {} wall triangles",
        floor_count,
        mesh.triangle_count()
    )?;
    writeln!(out, "o walls")?;

    for v in mesh.positions.chunks_exact(3) {
        writeln!(out, "v {:.6} {:.6} {:.6}", v[0], v[1], v[2])?;
    }
    for n in mesh.normals.chunks_exact(3) {
        writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
    }
    for t in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (t[0] + 1, t[1] + 1, t[2] + 1);
        writeln!(out, "f {}//{} {}//{} {}//{}", a, a, b, b, c, c)?;
    }

    out.flush()?;
    Ok(())
}

fn print_usage() {
    println!(
        r#"WiFi Coverage Map
=================

Estimates access-point coverage for a floor-plan editor export and prints a
band histogram.

USAGE:
  coverage-map <store.json> [OPTIONS]

ARGUMENTS:
  <store.json>              Editor export (currentFloors + myFloorN documents)

OPTIONS:
  --tx <x,y,z>              Transmitter position in meters (default: outline center, 1.2 m)
  --band <2.4|5>            Frequency band in GHz (default: 2.4)
  --spacing <meters>        Lattice spacing (default: 2.0)
  --radius <meters>         Lattice half-width around the transmitter (default: 20.5)
  --noise-margin <dB>       Margin subtracted from every reading (default: 10)
  --parallel                Spread the computation over all cores
  --json <path>             Write the classified lattice as JSON
  --obj <path>              Write the wall mesh as OBJ
  -h, --help                Show this help message

ENVIRONMENT:
  COVERAGE_SPACING, COVERAGE_RADIUS, COVERAGE_NOISE_MARGIN_DB,
  COVERAGE_PIXELS_PER_METER, COVERAGE_PARALLEL, RUST_LOG"#
    );
}
