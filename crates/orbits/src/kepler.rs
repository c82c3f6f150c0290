//! Newton–Raphson solver for Kepler's equation `M = E − e·sin(E)`.

use std::f64::consts::PI;

use orbitscope_core::units::wrap_two_pi;

/// Convergence threshold on the Newton step, in radians.
pub const TOLERANCE: f64 = 1e-8;
/// Iteration cap. Never expected to bind for `e < 1`.
pub const MAX_ITERATIONS: usize = 50;
/// Eccentricity at and above which iteration starts from `E = π`.
pub const HIGH_ECCENTRICITY: f64 = 0.8;

/// Outcome of a single Kepler solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians, on the same revolution as the input mean anomaly.
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    /// `false` when the iteration cap was hit; `eccentric_anomaly` is then the last iterate.
    pub converged: bool,
}

/// Solve Kepler's equation for the eccentric anomaly.
///
/// `mean_anomaly` may be any real number; `eccentricity` must lie in `[0, 1)`.
/// Non-convergence is logged and the best available iterate is returned.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    solve(mean_anomaly, eccentricity).eccentric_anomaly
}

/// Same as [`solve_eccentric_anomaly`] but reports iteration count and convergence.
pub fn solve(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    // Iterate inside a single revolution; Kepler's equation is invariant
    // under E → E + 2πk, M → M + 2πk.
    let m = wrap_two_pi(mean_anomaly);
    let revolutions = mean_anomaly - m;

    let mut e_anomaly = if eccentricity < HIGH_ECCENTRICITY {
        m
    } else {
        PI
    };

    let mut iterations = 0;
    let mut converged = false;
    while iterations < MAX_ITERATIONS {
        let (sin_e, cos_e) = e_anomaly.sin_cos();
        let f = e_anomaly - eccentricity * sin_e - m;
        let f_prime = 1.0 - eccentricity * cos_e;
        let delta = f / f_prime;
        e_anomaly -= delta;
        iterations += 1;

        if delta.abs() < TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            mean_anomaly,
            eccentricity,
            eccentric_anomaly = e_anomaly,
            "Kepler solver hit its iteration cap; using last iterate"
        );
    }

    KeplerSolution {
        eccentric_anomaly: e_anomaly + revolutions,
        iterations,
        converged,
    }
}

/// Closed-form inverse: eccentric anomaly from true anomaly (radians).
///
/// Evaluates `E = 2·atan(sqrt((1−e)/(1+e))·tan(ν/2))` in `atan2` form so that
/// `ν = ±π` maps to `E = ±π` instead of overflowing the tangent.
pub fn eccentric_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = true_anomaly / 2.0;
    let y = (1.0 - eccentricity).sqrt() * half.sin();
    let x = (1.0 + eccentricity).sqrt() * half.cos();
    2.0 * y.atan2(x)
}

/// True anomaly from eccentric anomaly, quadrant-correct over `(−π, π]`.
pub fn true_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    let y = (1.0 + eccentricity).sqrt() * half.sin();
    let x = (1.0 - eccentricity).sqrt() * half.cos();
    2.0 * y.atan2(x)
}

/// Mean anomaly from eccentric anomaly (Kepler's equation, forward direction).
#[inline]
pub fn mean_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}
