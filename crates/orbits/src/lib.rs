//! Two-body orbit propagation: Kepler's equation plus the perifocal-to-inertial
//! frame chain, and closed orbit paths for display.

pub mod elements;
pub mod kepler;
pub mod propagator;

pub use elements::{CentralBody, OrbitError, OrbitalElements};
pub use kepler::{KeplerSolution, solve_eccentric_anomaly};
pub use propagator::{
    DEFAULT_SAMPLE_COUNT, DisplayScale, Orbit, OrbitPath, build_orbit_path, position_at_time,
};
pub use orbitscope_core::vector::{self, Vector3};
