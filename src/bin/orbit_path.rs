use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use orbitscope::export::path::{OrbitPathDocument, write_paths};
use orbitscope::export::writer_for_path;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export each satellite's closed orbit path as JSON"
)]
struct Cli {
    #[arg(long, default_value = "configs/scenarios/leo.yaml")]
    scenario: PathBuf,

    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,

    /// True-anomaly steps per revolution (overrides the scenario)
    #[arg(long)]
    samples: Option<usize>,

    /// Output JSON path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    orbitscope::init_logging();
    let cli = Cli::parse();

    let (scene, _) = orbitscope::load_scene(&cli.scenario, &cli.bodies, cli.samples)?;
    let docs: Vec<OrbitPathDocument<'_>> = scene
        .satellites()
        .iter()
        .map(|s| OrbitPathDocument::new(s.name(), scene.body_name(), s.path()))
        .collect();

    let mut writer = writer_for_path(&cli.output)?;
    write_paths(&mut *writer, &docs)?;
    writer.flush()?;
    tracing::info!(paths = docs.len(), output = %cli.output.display(), "wrote orbit paths");
    Ok(())
}
