//! Tilt-compensated compass azimuth from accelerometer and magnetometer readings

use crate::error::OrientationError;
use crate::math::{RAD_TO_DEG, Vector3Ext, wrap_degrees};
use nalgebra::Vector3;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Accelerometer readings below this fraction of gravity (squared) are free fall
const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * STANDARD_GRAVITY * STANDARD_GRAVITY;

/// Minimum magnitude of `magnetometer × accelerometer` (µT·m/s²)
const MIN_HORIZONTAL_FIELD: f32 = 0.1;

/// Calculate tilt-compensated azimuth
///
/// Both vectors are in the device frame: X to the right of the screen, Y
/// toward the top edge, Z out of the screen. The accelerometer reads the
/// reaction to gravity (about +9.81 m/s² on Z when lying flat) and the
/// magnetometer is in µT, ideally already calibrated.
///
/// The east vector is the cross product of the magnetic field and gravity,
/// north is gravity crossed with east, and the azimuth is the angle of the
/// device's Y axis in that horizontal frame.
///
/// # Returns
/// Azimuth in degrees [0, 360), 0° = magnetic north, increasing clockwise,
/// or an [`OrientationError`] when the inputs cannot define a frame.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use qibla_compass::compass::calculate_azimuth;
///
/// let accel = Vector3::new(0.0, 0.0, 9.81);  // Lying flat
/// let mag = Vector3::new(0.0, 22.0, -40.0);  // Top edge pointing north
/// let azimuth = calculate_azimuth(accel, mag).unwrap();
/// assert!(azimuth < 1.0 || azimuth > 359.0);
/// ```
pub fn calculate_azimuth(
    accelerometer: Vector3<f32>,
    magnetometer: Vector3<f32>,
) -> Result<f64, OrientationError> {
    if accelerometer.magnitude_squared() < FREE_FALL_GRAVITY_SQUARED {
        return Err(OrientationError::FreeFall);
    }

    // East: magnetic field × gravity
    let east = magnetometer.cross(&accelerometer);
    if east.magnitude() < MIN_HORIZONTAL_FIELD {
        return Err(OrientationError::MagneticAlignment);
    }
    let east = east.safe_normalize();

    // North: gravity × east
    let north = accelerometer.safe_normalize().cross(&east);

    let azimuth_rad = east.y.atan2(north.y);

    Ok(wrap_degrees(f64::from(azimuth_rad) * RAD_TO_DEG))
}
