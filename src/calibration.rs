//! Magnetometer calibration for the qibla compass library

use nalgebra::{Matrix3, Vector3};

/// Applies magnetometer calibration (hard and soft iron correction)
///
/// # Arguments
/// * `uncalibrated` - Raw magnetometer reading in µT
/// * `soft_iron_matrix` - 3x3 soft iron correction matrix
/// * `hard_iron_offset` - Hard iron offset vector in µT
///
/// # Returns
/// Calibrated magnetometer reading
///
/// # Example
/// ```
/// use nalgebra::{Matrix3, Vector3};
/// use qibla_compass::calibration::calibrate_magnetic;
///
/// let raw = Vector3::new(30.0, 12.0, -45.0);
/// let soft_iron = Matrix3::identity();
/// let hard_iron = Vector3::new(8.0, -10.0, -5.0);
///
/// let calibrated = calibrate_magnetic(raw, soft_iron, hard_iron);
/// assert_eq!(calibrated, Vector3::new(22.0, 22.0, -40.0));
/// ```
pub fn calibrate_magnetic(
    uncalibrated: Vector3<f32>,
    soft_iron_matrix: Matrix3<f32>,
    hard_iron_offset: Vector3<f32>,
) -> Vector3<f32> {
    soft_iron_matrix * (uncalibrated - hard_iron_offset)
}

/// Hard and soft iron correction applied to every magnetometer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticCalibration {
    pub soft_iron: Matrix3<f32>,
    pub hard_iron: Vector3<f32>,
}

impl MagneticCalibration {
    /// Calibration that subtracts a hard iron offset only
    pub fn with_hard_iron(hard_iron: Vector3<f32>) -> Self {
        Self {
            hard_iron,
            ..Default::default()
        }
    }

    pub fn apply(&self, uncalibrated: Vector3<f32>) -> Vector3<f32> {
        calibrate_magnetic(uncalibrated, self.soft_iron, self.hard_iron)
    }
}

impl Default for MagneticCalibration {
    fn default() -> Self {
        Self {
            soft_iron: Matrix3::identity(),
            hard_iron: Vector3::zeros(),
        }
    }
}
