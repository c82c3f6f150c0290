use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use orbitscope::orbits::Vector3;
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render orbit paths and current positions of a scenario to PNG"
)]
struct Cli {
    #[arg(long, default_value = "configs/scenarios/leo.yaml")]
    scenario: PathBuf,

    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,

    #[arg(long, default_value = "artifacts/orbits.png")]
    output: PathBuf,

    /// Simulation-clock seconds at which satellite markers are drawn
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Projection plane
    #[arg(long, value_enum, default_value_t = Projection::Xy)]
    projection: Projection,

    #[arg(long, default_value_t = 900)]
    width: u32,

    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Projection {
    Xy,
    Xz,
    Yz,
}

impl Projection {
    fn project(self, p: &Vector3) -> (f64, f64) {
        match self {
            Projection::Xy => (p[0], p[1]),
            Projection::Xz => (p[0], p[2]),
            Projection::Yz => (p[1], p[2]),
        }
    }
}

fn main() -> anyhow::Result<()> {
    orbitscope::init_logging();
    let cli = Cli::parse();

    let (scene, mut clock) = orbitscope::load_scene(&cli.scenario, &cli.bodies, None)?;
    clock.advance(cli.time);

    let body_radius = scene.display_radius();
    let extent = scene
        .satellites()
        .iter()
        .flat_map(|s| s.path().points().iter())
        .map(|p| {
            let (u, v) = cli.projection.project(p);
            u.abs().max(v.abs())
        })
        .fold(body_radius, f64::max)
        * 1.1;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(&cli.output, (cli.width, cli.height)).into_drawing_area();
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    let disc: Vec<(f64, f64)> = (0..=90)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / 90.0;
            (body_radius * theta.cos(), body_radius * theta.sin())
        })
        .collect();
    chart.draw_series(std::iter::once(Polygon::new(
        disc,
        RGBColor(40, 90, 160).filled(),
    )))?;

    for satellite in scene.satellites() {
        let color = named_color(satellite.color());
        let points: Vec<(f64, f64)> = satellite
            .path()
            .points()
            .iter()
            .map(|p| cli.projection.project(p))
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(
            points,
            ShapeStyle::from(&color).stroke_width(1),
        )))?;

        let marker = cli.projection.project(&satellite.position(&clock));
        chart.draw_series(std::iter::once(Circle::new(marker, 4, color.filled())))?;
    }

    root.present()?;
    tracing::info!(output = %cli.output.display(), "rendered orbit plot");
    Ok(())
}

fn named_color(name: &str) -> RGBColor {
    match name.to_ascii_lowercase().as_str() {
        "red" => RGBColor(230, 60, 60),
        "blue" => RGBColor(70, 130, 240),
        "orange" => RGBColor(255, 165, 0),
        "green" => RGBColor(80, 200, 120),
        "purple" => RGBColor(160, 90, 220),
        "cyan" => RGBColor(0, 220, 220),
        _ => RGBColor(200, 200, 200),
    }
}
