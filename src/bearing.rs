//! Great-circle qibla bearing

use crate::math::{DEG_TO_RAD, RAD_TO_DEG, wrap_degrees};
use crate::types::GeoCoordinate;

/// Location of the Kaaba in Mecca
pub const KAABA: GeoCoordinate = GeoCoordinate {
    latitude: 21.4225,
    longitude: 39.8262,
};

/// Initial great-circle bearing from `from` toward `to`
///
/// Uses the `cos φ1 · tan φ2 − sin φ1 · cos Δλ` form, so `to` must not be a
/// pole. Returns degrees clockwise from true north in [0, 360). When `from`
/// is a pole or equal to `to` the direction is undefined; the result is
/// whatever IEEE-754 arithmetic yields (0 for identical points, possibly NaN
/// for non-finite input) and never panics.
pub fn initial_bearing(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let phi1 = from.latitude * DEG_TO_RAD;
    let phi2 = to.latitude * DEG_TO_RAD;
    let delta_lambda = (to.longitude - from.longitude) * DEG_TO_RAD;

    let y = delta_lambda.sin();
    let x = phi1.cos() * phi2.tan() - phi1.sin() * delta_lambda.cos();

    wrap_degrees(y.atan2(x) * RAD_TO_DEG)
}

/// Qibla bearing from the given latitude/longitude, in degrees [0, 360)
///
/// # Example
/// ```
/// use qibla_compass::qibla_bearing;
///
/// let jakarta = qibla_bearing(-6.2000, 106.8166);
/// assert!((jakarta - 295.16).abs() < 0.01);
/// ```
pub fn qibla_bearing(latitude: f64, longitude: f64) -> f64 {
    initial_bearing(
        GeoCoordinate {
            latitude,
            longitude,
        },
        KAABA,
    )
}

impl GeoCoordinate {
    /// Qibla bearing from this coordinate
    pub fn qibla_bearing(&self) -> f64 {
        initial_bearing(*self, KAABA)
    }
}
