use std::path::PathBuf;

use clap::Parser;
use orbitscope::export::{track, writer_for_path};

const MAX_STEPS: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sample satellite positions from a scenario over a window of simulation time"
)]
struct Cli {
    /// Scenario manifest (YAML or TOML)
    #[arg(long, default_value = "configs/scenarios/leo.yaml")]
    scenario: PathBuf,

    /// Body catalog: directory of TOML files, or a YAML/TOML file
    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,

    /// Simulation-clock seconds to cover
    #[arg(long, default_value_t = 5_400.0)]
    duration: f64,

    /// Simulation-clock seconds between samples
    #[arg(long, default_value_t = 60.0)]
    step: f64,

    /// Override the scenario's time scale
    #[arg(long)]
    time_scale: Option<f64>,

    /// Emit kilometres instead of scene units
    #[arg(long, default_value_t = false)]
    km: bool,

    /// Output CSV path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    orbitscope::init_logging();
    let cli = Cli::parse();

    if !(cli.step.is_finite() && cli.step > 0.0) {
        anyhow::bail!("--step must be positive, got {}", cli.step);
    }
    if !(cli.duration.is_finite() && cli.duration >= 0.0) {
        anyhow::bail!("--duration must be non-negative, got {}", cli.duration);
    }

    let ratio = (cli.duration / cli.step).floor();
    if ratio > MAX_STEPS as f64 {
        anyhow::bail!(
            "--duration / --step gives {ratio} steps, more than the limit of {MAX_STEPS}"
        );
    }
    let steps = ratio as usize;

    let (scene, mut clock) = orbitscope::load_scene(&cli.scenario, &cli.bodies, None)?;
    if let Some(scale) = cli.time_scale {
        clock.set_time_scale(scale)?;
    }
    tracing::info!(
        body = scene.body_name(),
        satellites = scene.satellites().len(),
        time_scale = clock.time_scale(),
        "tracking scenario"
    );

    let mut writer = track::TrackWriter::new(writer_for_path(&cli.output)?);
    for k in 0..=steps {
        // Offset from the start each time so sample times do not drift.
        let mut at = clock;
        at.advance(k as f64 * cli.step);
        let t = at.propagation_time();
        for satellite in scene.satellites() {
            let position = if cli.km {
                satellite.orbit().physical_position_at_time(t)
            } else {
                satellite.position(&at)
            };
            writer.write(&track::Record::new(t, satellite.name(), position))?;
        }
    }
    writer.finish()?;
    Ok(())
}
