use std::path::Path;

use approx::assert_abs_diff_eq;
use orbitscope::config::{self, ConfigError};
use orbitscope::orbits::vector::norm;
use orbitscope::scene::{SatelliteDraft, SatelliteId, SceneError};

const BODIES: &str = "configs/bodies";

#[test]
fn shipped_body_catalog_loads() {
    let bodies = config::load_bodies(BODIES).expect("body catalog");
    assert_eq!(bodies.len(), 10);
    assert_eq!(bodies[0].id, "sun");

    let earth = config::find_body(&bodies, "EARTH").expect("earth");
    assert_eq!(earth.name, "Earth");
    assert_abs_diff_eq!(earth.mu_km3_s2, 398_600.441_8, epsilon = 1e-9);
    assert_abs_diff_eq!(earth.radius_km, 6371.0, epsilon = 1e-9);

    for body in &bodies {
        assert!(body.central_body().validate().is_ok(), "{} is invalid", body.id);
    }
}

#[test]
fn leo_scenario_builds_a_scene() {
    let (scene, clock) = orbitscope::load_scene(
        Path::new("configs/scenarios/leo.yaml"),
        Path::new(BODIES),
        None,
    )
    .expect("scene");

    assert_eq!(scene.body_name(), "Earth");
    assert_eq!(scene.sample_count(), 256);
    assert_abs_diff_eq!(scene.display_radius(), 2.0);
    assert_abs_diff_eq!(clock.time_scale(), 1.0);

    let names: Vec<&str> = scene.satellites().iter().map(|s| s.name()).collect();
    assert_eq!(names, ["Hubble", "Starlink"]);
    assert_eq!(scene.satellites()[0].id(), SatelliteId(1));
    assert_eq!(scene.satellites()[1].id(), SatelliteId(2));
    assert_eq!(scene.satellites()[0].color(), "red");

    for satellite in scene.satellites() {
        assert_eq!(satellite.path().len(), 257);
    }

    // Starlink starts at apoapsis.
    let starlink = scene.satellites()[1].orbit().physical_position_at_time(0.0);
    assert_abs_diff_eq!(norm(&starlink), 6921.0 * 1.0001, epsilon = 1e-6);
}

#[test]
fn sample_count_override_applies_to_every_path() {
    let (scene, _) = orbitscope::load_scene(
        Path::new("configs/scenarios/leo.yaml"),
        Path::new(BODIES),
        Some(32),
    )
    .expect("scene");
    for satellite in scene.satellites() {
        assert_eq!(satellite.path().len(), 33);
    }
}

#[test]
fn toml_scenario_fills_defaults() {
    let (scene, clock) = orbitscope::load_scene(
        Path::new("configs/scenarios/molniya.toml"),
        Path::new(BODIES),
        None,
    )
    .expect("scene");

    assert_abs_diff_eq!(clock.time_scale(), 60.0);
    assert_abs_diff_eq!(scene.display_radius(), 2.0);
    let unnamed = &scene.satellites()[1];
    assert_eq!(unnamed.name(), "NewSat-2");
    assert_abs_diff_eq!(unnamed.elements().raan_deg, 0.0);
}

#[test]
fn scenario_changes_rebuild_paths() {
    let (mut scene, _) = orbitscope::load_scene(
        Path::new("configs/scenarios/leo.yaml"),
        Path::new(BODIES),
        None,
    )
    .expect("scene");
    let bodies = config::load_bodies(BODIES).expect("bodies");
    let mars = config::find_body(&bodies, "mars").expect("mars");

    let before = scene.satellites()[0].path().points()[0];
    scene
        .set_central_body(mars.name.clone(), mars.central_body())
        .expect("switch to mars");
    let after = scene.satellites()[0].path().points()[0];
    assert_eq!(scene.body_name(), "Mars");
    // Same orbit, smaller body: the display scale grows.
    assert!(norm(&after) > norm(&before));

    let elements = *scene.satellites()[0].elements();
    let id = scene
        .add_satellite(SatelliteDraft::new(elements).named("Probe"))
        .expect("add");
    assert_eq!(id, SatelliteId(3));
    scene.remove_satellite(id).expect("remove");
    assert!(matches!(
        scene.remove_satellite(id),
        Err(SceneError::UnknownSatellite(_))
    ));
}

#[test]
fn missing_body_is_reported() {
    let err = orbitscope::load_scene(
        Path::new("configs/scenarios/leo.yaml"),
        Path::new("configs/bodies/06_mars.toml"),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SceneError::Config(ConfigError::UnknownBody(ref key)) if key == "earth"
    ));
}
