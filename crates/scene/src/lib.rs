//! Tracked objects around a swappable central body.
//!
//! The scene is the boundary where elements and bodies enter the system:
//! every add, edit, and body swap is validated here, and a rejected change
//! leaves the previous state untouched. Positions are never stored; they are
//! derived from `(elements, body, clock)` on every query, while the closed
//! orbit paths are cached and rebuilt only when their inputs change.

pub mod clock;

use std::fmt;

use orbitscope_config::{BodyConfig, ConfigError, SatelliteConfig, ScenarioConfig, find_body};
use orbitscope_orbits::{
    CentralBody, DisplayScale, Orbit, OrbitError, OrbitPath, OrbitalElements, Vector3,
};
use thiserror::Error;

pub use clock::SimulationClock;

/// Colors handed out to satellites added without one, cycled by id.
pub const PALETTE: [&str; 5] = ["red", "blue", "orange", "green", "purple"];

/// Stable handle of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SatelliteId(pub u32);

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("satellite {0} is not tracked")]
    UnknownSatellite(SatelliteId),
    #[error("time scale must be finite and non-negative, got {0}")]
    InvalidTimeScale(f64),
}

/// Request to add an object; missing name and color are filled in on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteDraft {
    pub name: Option<String>,
    pub color: Option<String>,
    pub elements: OrbitalElements,
}

impl SatelliteDraft {
    pub fn new(elements: OrbitalElements) -> Self {
        Self {
            name: None,
            color: None,
            elements,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl From<SatelliteConfig> for SatelliteDraft {
    fn from(config: SatelliteConfig) -> Self {
        Self {
            name: config.name,
            color: config.color,
            elements: config.elements,
        }
    }
}

/// A tracked object with its validated orbit and cached display path.
#[derive(Debug, Clone)]
pub struct Satellite {
    id: SatelliteId,
    name: String,
    color: String,
    elements: OrbitalElements,
    orbit: Orbit,
    path: OrbitPath,
}

impl Satellite {
    pub fn id(&self) -> SatelliteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn path(&self) -> &OrbitPath {
        &self.path
    }

    /// Scene-unit position at the clock's propagation time.
    pub fn position(&self, clock: &SimulationClock) -> Vector3 {
        self.orbit.position_at_time(clock.propagation_time())
    }
}

/// Central body plus the objects orbiting it.
#[derive(Debug, Clone)]
pub struct Scene {
    body_name: String,
    body: CentralBody,
    display_radius: f64,
    scale: DisplayScale,
    sample_count: usize,
    satellites: Vec<Satellite>,
}

impl Scene {
    pub fn new(
        body_name: impl Into<String>,
        body: CentralBody,
        display_radius: f64,
        sample_count: usize,
    ) -> Result<Self, SceneError> {
        let scale = DisplayScale::fit(&body, display_radius)?;
        if sample_count == 0 {
            return Err(OrbitError::InvalidSampleCount.into());
        }
        Ok(Self {
            body_name: body_name.into(),
            body,
            display_radius,
            scale,
            sample_count,
            satellites: Vec::new(),
        })
    }

    /// Build a scene and its clock from a scenario manifest and body catalog.
    pub fn from_config(
        scenario: &ScenarioConfig,
        bodies: &[BodyConfig],
    ) -> Result<(Self, SimulationClock), SceneError> {
        let body = find_body(bodies, &scenario.central_body)?;
        let mut scene = Self::new(
            body.name.clone(),
            body.central_body(),
            scenario.display_radius,
            scenario.sample_count,
        )?;
        for satellite in &scenario.satellites {
            scene.add_satellite(satellite.clone().into())?;
        }
        let clock = SimulationClock::new(scenario.time_scale)?;
        Ok((scene, clock))
    }

    pub fn body_name(&self) -> &str {
        &self.body_name
    }

    pub fn body(&self) -> &CentralBody {
        &self.body
    }

    pub fn display_radius(&self) -> f64 {
        self.display_radius
    }

    pub fn scale(&self) -> DisplayScale {
        self.scale
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn satellite(&self, id: SatelliteId) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.id == id)
    }

    /// Validate and insert an object, returning its freshly assigned id.
    pub fn add_satellite(&mut self, draft: SatelliteDraft) -> Result<SatelliteId, SceneError> {
        let (orbit, path) = self.derive(&draft.elements)?;
        let id = SatelliteId(self.satellites.last().map_or(1, |s| s.id.0 + 1));
        let name = draft
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("NewSat-{}", id.0));
        let color = draft
            .color
            .unwrap_or_else(|| PALETTE[(id.0 as usize - 1) % PALETTE.len()].to_string());

        tracing::info!(%id, %name, period_s = orbit.period(), "tracking satellite");
        self.satellites.push(Satellite {
            id,
            name,
            color,
            elements: draft.elements,
            orbit,
            path,
        });
        Ok(id)
    }

    /// Replace an object's elements wholesale and rebuild its path.
    pub fn update_elements(
        &mut self,
        id: SatelliteId,
        elements: OrbitalElements,
    ) -> Result<(), SceneError> {
        let index = self.index_of(id)?;
        let (orbit, path) = self.derive(&elements)?;
        let satellite = &mut self.satellites[index];
        satellite.elements = elements;
        satellite.orbit = orbit;
        satellite.path = path;
        tracing::debug!(%id, "updated orbital elements");
        Ok(())
    }

    pub fn remove_satellite(&mut self, id: SatelliteId) -> Result<Satellite, SceneError> {
        let index = self.index_of(id)?;
        let removed = self.satellites.remove(index);
        tracing::info!(%id, name = %removed.name, "stopped tracking satellite");
        Ok(removed)
    }

    /// Swap the central body, re-deriving every orbit. All or nothing.
    pub fn set_central_body(
        &mut self,
        body_name: impl Into<String>,
        body: CentralBody,
    ) -> Result<(), SceneError> {
        let scale = DisplayScale::fit(&body, self.display_radius)?;
        let derived = self
            .satellites
            .iter()
            .map(|s| derive_orbit(&s.elements, &body, scale, self.sample_count))
            .collect::<Result<Vec<_>, _>>()?;

        for (satellite, (orbit, path)) in self.satellites.iter_mut().zip(derived) {
            satellite.orbit = orbit;
            satellite.path = path;
        }
        self.body_name = body_name.into();
        self.body = body;
        self.scale = scale;
        tracing::info!(body = %self.body_name, "central body changed");
        Ok(())
    }

    /// Current scene-unit position of every tracked object.
    pub fn positions(&self, clock: &SimulationClock) -> Vec<(SatelliteId, Vector3)> {
        self.satellites
            .iter()
            .map(|s| (s.id, s.position(clock)))
            .collect()
    }

    pub fn position_of(
        &self,
        id: SatelliteId,
        clock: &SimulationClock,
    ) -> Result<Vector3, SceneError> {
        self.satellite(id)
            .map(|s| s.position(clock))
            .ok_or(SceneError::UnknownSatellite(id))
    }

    fn index_of(&self, id: SatelliteId) -> Result<usize, SceneError> {
        self.satellites
            .iter()
            .position(|s| s.id == id)
            .ok_or(SceneError::UnknownSatellite(id))
    }

    fn derive(&self, elements: &OrbitalElements) -> Result<(Orbit, OrbitPath), SceneError> {
        Ok(derive_orbit(
            elements,
            &self.body,
            self.scale,
            self.sample_count,
        )?)
    }
}

fn derive_orbit(
    elements: &OrbitalElements,
    body: &CentralBody,
    scale: DisplayScale,
    sample_count: usize,
) -> Result<(Orbit, OrbitPath), OrbitError> {
    let orbit = Orbit::new(elements, body, scale)?;
    let path = orbit.build_path(sample_count)?;
    Ok((orbit, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use orbitscope_orbits::vector::norm;

    fn earth_scene() -> Scene {
        Scene::new("Earth", CentralBody::earth(), 2.0, 64).expect("scene")
    }

    fn hubble() -> OrbitalElements {
        OrbitalElements::new(6871.0, 0.001, 28.5, 0.0, 0.0, 0.0)
    }

    #[test]
    fn ids_follow_the_last_entry() {
        let mut scene = earth_scene();
        let a = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        let b = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        assert_eq!((a, b), (SatelliteId(1), SatelliteId(2)));
        scene.remove_satellite(a).unwrap();
        let c = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        assert_eq!(c, SatelliteId(3));
    }

    #[test]
    fn defaults_name_and_color() {
        let mut scene = earth_scene();
        let id = scene
            .add_satellite(SatelliteDraft::new(hubble()).named("  "))
            .unwrap();
        let sat = scene.satellite(id).unwrap();
        assert_eq!(sat.name(), "NewSat-1");
        assert_eq!(sat.color(), "red");
        assert_eq!(sat.path().len(), 65);
    }

    #[test]
    fn rejected_add_leaves_scene_unchanged() {
        let mut scene = earth_scene();
        let bad = OrbitalElements {
            eccentricity: 1.0,
            ..hubble()
        };
        let err = scene.add_satellite(SatelliteDraft::new(bad)).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Orbit(OrbitError::InvalidElements { .. })
        ));
        assert!(scene.satellites().is_empty());
    }

    #[test]
    fn rejected_edit_keeps_previous_elements() {
        let mut scene = earth_scene();
        let id = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        let bad = OrbitalElements {
            semi_major_axis_km: -100.0,
            ..hubble()
        };
        assert!(scene.update_elements(id, bad).is_err());
        assert_eq!(scene.satellite(id).unwrap().elements(), &hubble());
    }

    #[test]
    fn edit_rebuilds_path() {
        let mut scene = earth_scene();
        let id = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        let before = scene.satellite(id).unwrap().path().clone();
        let raised = OrbitalElements {
            semi_major_axis_km: 26_560.0,
            ..hubble()
        };
        scene.update_elements(id, raised).unwrap();
        let after = scene.satellite(id).unwrap().path();
        assert_ne!(&before, after);
        assert_abs_diff_eq!(
            norm(&after.points()[0]),
            26_560.0 * 0.999 * 2.0 / 6371.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut scene = earth_scene();
        assert!(matches!(
            scene.remove_satellite(SatelliteId(9)),
            Err(SceneError::UnknownSatellite(SatelliteId(9)))
        ));
        assert!(scene.update_elements(SatelliteId(9), hubble()).is_err());
        assert!(
            scene
                .position_of(SatelliteId(9), &SimulationClock::default())
                .is_err()
        );
    }

    #[test]
    fn body_swap_rescales_and_repropagates() {
        let mut scene = earth_scene();
        let id = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        let earth_period = scene.satellite(id).unwrap().orbit().period();

        let mars = CentralBody::new(42_828.375_214, 3_389.5);
        scene.set_central_body("Mars", mars).unwrap();
        let sat = scene.satellite(id).unwrap();
        assert!(sat.orbit().period() > earth_period);
        assert_eq!(scene.body_name(), "Mars");
        assert_abs_diff_eq!(
            norm(&sat.path().points()[0]),
            6871.0 * 0.999 * 2.0 / 3389.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn invalid_body_swap_is_rejected_atomically() {
        let mut scene = earth_scene();
        scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        let err = scene
            .set_central_body("Nothing", CentralBody::new(0.0, 100.0))
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::Orbit(OrbitError::InvalidBody { .. })
        ));
        assert_eq!(scene.body_name(), "Earth");
        assert_eq!(scene.body(), &CentralBody::earth());
    }

    #[test]
    fn positions_follow_the_clock() {
        let mut scene = earth_scene();
        let id = scene.add_satellite(SatelliteDraft::new(hubble())).unwrap();
        let mut clock = SimulationClock::new(100.0).unwrap();
        let start = scene.position_of(id, &clock).unwrap();
        clock.advance(1.0);
        let later = scene.positions(&clock);
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].0, id);
        assert_ne!(later[0].1, start);

        let period = scene.satellite(id).unwrap().orbit().period();
        let mut lapped = SimulationClock::new(period).unwrap();
        lapped.advance(1.0);
        let back = scene.position_of(id, &lapped).unwrap();
        for axis in 0..3 {
            assert_abs_diff_eq!(back[axis], start[axis], epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_sample_count_is_rejected() {
        assert!(Scene::new("Earth", CentralBody::earth(), 2.0, 0).is_err());
        assert!(Scene::new("Earth", CentralBody::earth(), -2.0, 16).is_err());
    }
}
