//! Angle arithmetic and nalgebra extensions for the qibla compass library

use nalgebra::Vector3;

/// Mathematical constants
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Normalize an angle in degrees to [0, 360)
///
/// Unlike a bare `(x + 360) % 360`, this never returns exactly 360.0 when a
/// tiny negative input rounds up. NaN and infinities propagate as NaN.
///
/// # Example
/// ```
/// use qibla_compass::wrap_degrees;
///
/// assert_eq!(wrap_degrees(-10.0), 350.0);
/// assert_eq!(wrap_degrees(720.0), 0.0);
/// ```
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed difference `to - from`, in (-180, 180]
///
/// # Example
/// ```
/// use qibla_compass::shortest_delta;
///
/// assert_eq!(shortest_delta(359.0, 1.0), 2.0);
/// assert_eq!(shortest_delta(1.0, 359.0), -2.0);
/// ```
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from + 540.0).rem_euclid(360.0) - 180.0;
    // rem_euclid lands on -180 for an exact half turn; report it as +180
    if delta <= -180.0 { 180.0 } else { delta }
}

/// Unsigned angular distance between two headings, in [0, 180]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    shortest_delta(a, b).abs()
}

/// Extension trait for sensor vectors
pub trait Vector3Ext {
    /// Normalize the vector, returning zero vector if magnitude is zero
    fn safe_normalize(&self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn safe_normalize(&self) -> Vector3<f32> {
        let magnitude_squared = self.magnitude_squared();
        if magnitude_squared > 0.0 {
            *self / magnitude_squared.sqrt()
        } else {
            Vector3::zeros()
        }
    }
}
