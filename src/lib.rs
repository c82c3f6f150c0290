//! Orbit propagation and display-path generation for bodies orbiting a
//! configurable central mass.
//!
//! The library crates are re-exported here so front-ends (the bundled CLIs,
//! a renderer, a web build) share one entry point.

use std::path::Path;

pub use orbitscope_config as config;
pub use orbitscope_core as primitives;
pub use orbitscope_export as export;
pub use orbitscope_orbits as orbits;
pub use orbitscope_scene as scene;

use orbitscope_scene::{Scene, SceneError, SimulationClock};

/// Load a scenario manifest and body catalog and build the scene they describe.
///
/// `sample_count` overrides the manifest's path resolution when given.
pub fn load_scene(
    scenario_path: &Path,
    bodies_path: &Path,
    sample_count: Option<usize>,
) -> Result<(Scene, SimulationClock), SceneError> {
    let mut scenario = config::load_scenario(scenario_path)?;
    if let Some(samples) = sample_count {
        scenario.sample_count = samples;
    }
    let bodies = config::load_bodies(bodies_path)?;
    Scene::from_config(&scenario, &bodies)
}

/// Install the `tracing` subscriber used by the bundled binaries.
///
/// Verbosity follows `RUST_LOG`.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
