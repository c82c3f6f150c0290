//! Configuration models and loaders for Orbitscope.

use std::fs::File;
use std::path::{Path, PathBuf};

use orbitscope_core::constants::DEFAULT_DISPLAY_RADIUS;
use orbitscope_orbits::{CentralBody, DEFAULT_SAMPLE_COUNT, OrbitalElements};
use serde::Deserialize;
use thiserror::Error;

/// Central body entry from the catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub id: String,
    pub name: String,
    pub mu_km3_s2: f64,
    pub radius_km: f64,
    #[serde(default)]
    pub texture: Option<String>,
}

impl BodyConfig {
    pub fn central_body(&self) -> CentralBody {
        CentralBody::new(self.mu_km3_s2, self.radius_km)
    }
}

/// One orbiting object in a scenario file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SatelliteConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub elements: OrbitalElements,
}

/// Scenario manifest: which body sits at the focus and what orbits it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub central_body: String,
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    #[serde(default = "default_display_radius")]
    pub display_radius: f64,
    #[serde(default)]
    pub satellites: Vec<SatelliteConfig>,
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_display_radius() -> f64 {
    DEFAULT_DISPLAY_RADIUS
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
}

/// Load the body catalog from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    let bodies: Vec<BodyConfig> = load_records(path.as_ref())?;
    tracing::debug!(count = bodies.len(), path = %path.as_ref().display(), "loaded body catalog");
    Ok(bodies)
}

/// Load a scenario manifest from YAML or TOML.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let scenario: ScenarioConfig = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    tracing::debug!(
        body = %scenario.central_body,
        satellites = scenario.satellites.len(),
        "loaded scenario"
    );
    Ok(scenario)
}

/// Look a body up by id or display name, ignoring case.
pub fn find_body<'a>(bodies: &'a [BodyConfig], key: &str) -> Result<&'a BodyConfig, ConfigError> {
    bodies
        .iter()
        .find(|b| b.id.eq_ignore_ascii_case(key) || b.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| ConfigError::UnknownBody(key.to_string()))
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
