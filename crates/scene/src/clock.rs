//! Simulation clock driven by the presentation layer's frame loop.

use crate::SceneError;

/// Accumulated simulation time plus the speed multiplier applied on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    simulation_time_s: f64,
    time_scale: f64,
}

impl SimulationClock {
    pub fn new(time_scale: f64) -> Result<Self, SceneError> {
        check_time_scale(time_scale)?;
        Ok(Self {
            simulation_time_s: 0.0,
            time_scale,
        })
    }

    /// Add a real elapsed interval. Negative or non-finite steps are ignored so
    /// that simulation time never runs backwards.
    pub fn advance(&mut self, real_dt_s: f64) {
        if real_dt_s.is_finite() && real_dt_s > 0.0 {
            self.simulation_time_s += real_dt_s;
        } else if real_dt_s != 0.0 {
            tracing::debug!(real_dt_s, "ignoring non-forward clock step");
        }
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<(), SceneError> {
        check_time_scale(time_scale)?;
        self.time_scale = time_scale;
        Ok(())
    }

    pub fn simulation_time_s(&self) -> f64 {
        self.simulation_time_s
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Time since epoch handed to the propagator: `simulation_time_s * time_scale`.
    pub fn propagation_time(&self) -> f64 {
        self.simulation_time_s * self.time_scale
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            simulation_time_s: 0.0,
            time_scale: 1.0,
        }
    }
}

fn check_time_scale(time_scale: f64) -> Result<(), SceneError> {
    if time_scale.is_finite() && time_scale >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidTimeScale(time_scale))
    }
}
