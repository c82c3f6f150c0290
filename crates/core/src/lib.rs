//! Core units, constants, and shared primitives for the Orbitscope workspace.

/// Physical and presentation constants.
pub mod constants {
    /// Earth's gravitational parameter (km³/s²).
    pub const MU_EARTH_KM3_S2: f64 = 398_600.441_8;
    /// Earth's mean radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Radius, in scene units, at which a central body is drawn.
    pub const DEFAULT_DISPLAY_RADIUS: f64 = 2.0;
}

/// Angle conversion helpers. Orbital elements cross the API boundary in
/// degrees and are carried in radians internally.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Wrap an angle into `[0, 2π)`.
    #[inline]
    pub fn wrap_two_pi(angle: f64) -> f64 {
        angle.rem_euclid(std::f64::consts::TAU)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or scene units depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Active right-handed rotation of `v` about the X axis by `angle` radians.
    #[inline]
    pub fn rotate_x(v: &Vector3, angle: f64) -> Vector3 {
        let (s, c) = angle.sin_cos();
        [v[0], c * v[1] - s * v[2], s * v[1] + c * v[2]]
    }

    /// Active right-handed rotation of `v` about the Z axis by `angle` radians.
    #[inline]
    pub fn rotate_z(v: &Vector3, angle: f64) -> Vector3 {
        let (s, c) = angle.sin_cos();
        [c * v[0] - s * v[1], s * v[0] + c * v[1], v[2]]
    }
}
