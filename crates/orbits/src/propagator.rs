//! Two-body propagation from classical elements to inertial positions.
//!
//! An [`Orbit`] is built once from validated elements and a central body,
//! and then answers position queries with no further checks. Positions are
//! produced in scene units: the perifocal position is rotated through the
//! 3-1-3 sequence (ω about Z, i about X, Ω about Z) and multiplied by the
//! [`DisplayScale`] factor.

use std::f64::consts::TAU;

use orbitscope_core::constants::DEFAULT_DISPLAY_RADIUS;
use orbitscope_core::units::deg_to_rad;
use orbitscope_core::vector::{self, Vector3};
use serde::Serialize;

use crate::elements::{CentralBody, OrbitError, OrbitalElements};
use crate::kepler;

/// Number of true-anomaly steps used for a displayed orbit path.
pub const DEFAULT_SAMPLE_COUNT: usize = 256;

/// Conversion factor from kilometres to scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale(f64);

impl DisplayScale {
    /// Identity scale: positions stay in kilometres.
    pub const KILOMETRES: DisplayScale = DisplayScale(1.0);

    /// Scale so that the body's reference radius spans `display_radius` scene units.
    pub fn fit(body: &CentralBody, display_radius: f64) -> Result<Self, OrbitError> {
        body.validate()?;
        if !(display_radius.is_finite() && display_radius > 0.0) {
            return Err(OrbitError::InvalidDisplayScale(display_radius));
        }
        Ok(Self(display_radius / body.radius_km))
    }

    pub fn factor(&self) -> f64 {
        self.0
    }
}

/// Pre-validated orbit with angles in radians and per-orbit constants cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    semi_major_axis_km: f64,
    eccentricity: f64,
    inclination: f64,
    raan: f64,
    arg_perigee: f64,
    mean_motion: f64,
    mean_anomaly_at_epoch: f64,
    scale: f64,
}

impl Orbit {
    /// Validate `elements` and `body` and precompute everything the hot path needs.
    pub fn new(
        elements: &OrbitalElements,
        body: &CentralBody,
        scale: DisplayScale,
    ) -> Result<Self, OrbitError> {
        elements.validate()?;
        body.validate()?;

        let a = elements.semi_major_axis_km;
        let e = elements.eccentricity;
        let mean_motion = (body.mu_km3_s2 / (a * a * a)).sqrt();
        if !(mean_motion.is_finite() && mean_motion > 0.0) {
            return Err(OrbitError::InvalidElements {
                field: "semi_major_axis_km",
                value: a,
                constraint: "mean motion must be positive and finite",
            });
        }
        let e0 = kepler::eccentric_from_true(deg_to_rad(elements.true_anomaly_deg), e);

        Ok(Self {
            semi_major_axis_km: a,
            eccentricity: e,
            inclination: deg_to_rad(elements.inclination_deg),
            raan: deg_to_rad(elements.raan_deg),
            arg_perigee: deg_to_rad(elements.arg_perigee_deg),
            mean_motion,
            mean_anomaly_at_epoch: kepler::mean_from_eccentric(e0, e),
            scale: scale.factor(),
        })
    }

    /// Validate and fit the body to the default on-screen radius.
    pub fn for_display(elements: &OrbitalElements, body: &CentralBody) -> Result<Self, OrbitError> {
        Self::new(elements, body, DisplayScale::fit(body, DEFAULT_DISPLAY_RADIUS)?)
    }

    pub fn semi_major_axis_km(&self) -> f64 {
        self.semi_major_axis_km
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn scale(&self) -> DisplayScale {
        DisplayScale(self.scale)
    }

    /// Mean motion `n = sqrt(μ/a³)` in rad/s.
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    /// Orbital period `2π·sqrt(a³/μ)` in seconds.
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion
    }

    pub fn periapsis_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity)
    }

    pub fn apoapsis_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 + self.eccentricity)
    }

    /// Mean anomaly (radians, unwrapped) `t` seconds after epoch.
    #[inline]
    pub fn mean_anomaly_at(&self, t: f64) -> f64 {
        self.mean_anomaly_at_epoch + self.mean_motion * t
    }

    #[inline]
    fn eccentric_anomaly_at(&self, t: f64) -> f64 {
        kepler::solve_eccentric_anomaly(self.mean_anomaly_at(t), self.eccentricity)
    }

    /// True anomaly in `(−π, π]` at time `t`.
    pub fn true_anomaly_at(&self, t: f64) -> f64 {
        kepler::true_from_eccentric(self.eccentric_anomaly_at(t), self.eccentricity)
    }

    /// Distance from the focus in kilometres at time `t`.
    pub fn radius_at(&self, t: f64) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity * self.eccentric_anomaly_at(t).cos())
    }

    /// Position in scene units `t` seconds after epoch.
    pub fn position_at_time(&self, t: f64) -> Vector3 {
        vector::scale(&self.physical_position_at_time(t), self.scale)
    }

    /// Position in kilometres in the body-centred inertial frame.
    pub fn physical_position_at_time(&self, t: f64) -> Vector3 {
        let e_anomaly = self.eccentric_anomaly_at(t);
        let nu = kepler::true_from_eccentric(e_anomaly, self.eccentricity);
        let r = self.semi_major_axis_km * (1.0 - self.eccentricity * e_anomaly.cos());
        self.perifocal_to_inertial(r, nu)
    }

    /// Position in scene units at a given true anomaly (radians), independent of time.
    pub fn position_at_true_anomaly(&self, true_anomaly: f64) -> Vector3 {
        let e_anomaly = kepler::eccentric_from_true(true_anomaly, self.eccentricity);
        let r = self.semi_major_axis_km * (1.0 - self.eccentricity * e_anomaly.cos());
        vector::scale(&self.perifocal_to_inertial(r, true_anomaly), self.scale)
    }

    /// Unit normal of the orbital plane (direction of angular momentum).
    pub fn plane_normal(&self) -> Vector3 {
        self.rotate_to_inertial(&[0.0, 0.0, 1.0])
    }

    /// Sample one revolution of true anomaly into `sample_count + 1` points.
    pub fn build_path(&self, sample_count: usize) -> Result<OrbitPath, OrbitError> {
        if sample_count == 0 {
            return Err(OrbitError::InvalidSampleCount);
        }
        let mut points = Vec::with_capacity(sample_count + 1);
        for j in 0..sample_count {
            let nu = TAU * j as f64 / sample_count as f64;
            points.push(self.position_at_true_anomaly(nu));
        }
        // ν = 2π lands on ν = 0; reuse it so the loop closes exactly.
        points.push(points[0]);
        Ok(OrbitPath {
            sample_count,
            points,
        })
    }

    fn perifocal_to_inertial(&self, r: f64, nu: f64) -> Vector3 {
        let (sin_nu, cos_nu) = nu.sin_cos();
        self.rotate_to_inertial(&[r * cos_nu, r * sin_nu, 0.0])
    }

    fn rotate_to_inertial(&self, perifocal: &Vector3) -> Vector3 {
        let v = vector::rotate_z(perifocal, self.arg_perigee);
        let v = vector::rotate_x(&v, self.inclination);
        vector::rotate_z(&v, self.raan)
    }
}

/// Closed polyline through one revolution, first and last points equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    sample_count: usize,
    points: Vec<Vector3>,
}

impl OrbitPath {
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Validate inputs and return the scene-unit position `t` seconds after epoch.
pub fn position_at_time(
    elements: &OrbitalElements,
    body: &CentralBody,
    t: f64,
) -> Result<Vector3, OrbitError> {
    Ok(Orbit::for_display(elements, body)?.position_at_time(t))
}

/// Validate inputs and sample a closed path of `sample_count + 1` scene-unit points.
pub fn build_orbit_path(
    elements: &OrbitalElements,
    body: &CentralBody,
    sample_count: usize,
) -> Result<OrbitPath, OrbitError> {
    Orbit::for_display(elements, body)?.build_path(sample_count)
}
