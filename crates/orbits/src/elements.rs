//! Classical orbital elements, central bodies, and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classical Keplerian elements as entered by a user or read from a scenario.
///
/// Angles are in degrees and may take any finite value; they are wrapped
/// through trigonometric functions rather than range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub raan_deg: f64,
    #[serde(default)]
    pub arg_perigee_deg: f64,
    #[serde(default)]
    pub true_anomaly_deg: f64,
}

/// Gravitating body at the focus of every orbit in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralBody {
    pub mu_km3_s2: f64,
    /// Reference radius; only used to scale kilometres into scene units.
    pub radius_km: f64,
}

/// Errors raised when elements or bodies are accepted into the system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("invalid orbital elements: {field} = {value} ({constraint})")]
    InvalidElements {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },
    #[error("invalid central body: {field} = {value} ({constraint})")]
    InvalidBody {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },
    #[error("orbit path needs at least one sample")]
    InvalidSampleCount,
    #[error("display radius must be positive and finite, got {0}")]
    InvalidDisplayScale(f64),
}

impl OrbitalElements {
    /// Build elements from degrees, matching the field order of the classical set.
    pub fn new(
        semi_major_axis_km: f64,
        eccentricity: f64,
        inclination_deg: f64,
        raan_deg: f64,
        arg_perigee_deg: f64,
        true_anomaly_deg: f64,
    ) -> Self {
        Self {
            semi_major_axis_km,
            eccentricity,
            inclination_deg,
            raan_deg,
            arg_perigee_deg,
            true_anomaly_deg,
        }
    }

    /// Reject elliptical-orbit violations: `a > 0`, `0 ≤ e < 1`, finite angles.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let invalid = |field, value, constraint| OrbitError::InvalidElements {
            field,
            value,
            constraint,
        };

        if !(self.semi_major_axis_km.is_finite() && self.semi_major_axis_km > 0.0) {
            return Err(invalid(
                "semi_major_axis_km",
                self.semi_major_axis_km,
                "must be positive and finite",
            ));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(invalid(
                "eccentricity",
                self.eccentricity,
                "must lie in [0, 1)",
            ));
        }
        for (field, value) in [
            ("inclination_deg", self.inclination_deg),
            ("raan_deg", self.raan_deg),
            ("arg_perigee_deg", self.arg_perigee_deg),
            ("true_anomaly_deg", self.true_anomaly_deg),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, value, "must be finite"));
            }
        }
        Ok(())
    }

    /// Periapsis distance `a(1 − e)` in kilometres.
    pub fn periapsis_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity)
    }

    /// Apoapsis distance `a(1 + e)` in kilometres.
    pub fn apoapsis_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 + self.eccentricity)
    }
}

impl CentralBody {
    pub fn new(mu_km3_s2: f64, radius_km: f64) -> Self {
        Self {
            mu_km3_s2,
            radius_km,
        }
    }

    /// Earth with the WGS-84 gravitational parameter and mean radius.
    pub fn earth() -> Self {
        use orbitscope_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2};
        Self::new(MU_EARTH_KM3_S2, EARTH_RADIUS_KM)
    }

    pub fn validate(&self) -> Result<(), OrbitError> {
        let invalid = |field, value, constraint| OrbitError::InvalidBody {
            field,
            value,
            constraint,
        };

        if !(self.mu_km3_s2.is_finite() && self.mu_km3_s2 > 0.0) {
            return Err(invalid(
                "mu_km3_s2",
                self.mu_km3_s2,
                "must be positive and finite",
            ));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(invalid(
                "radius_km",
                self.radius_km,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}
