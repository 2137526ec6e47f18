//! Error types for the qibla compass library

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the public API
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude or longitude outside its valid range, or NaN
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Smoothing factor must lie in (0, 1]
    #[error("smoothing factor {0} is outside (0, 1]")]
    InvalidSmoothingFactor(f64),

    /// Settings could not be read or written as JSON
    #[error("settings store: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Reasons a sensor sample cannot be resolved into an azimuth
///
/// These are expected and frequent (device face down, in free fall, or next
/// to a strong magnet). Callers skip the sample and keep their last heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrientationError {
    /// Accelerometer magnitude is too small to define "down"
    #[error("accelerometer magnitude too small (free fall)")]
    FreeFall,

    /// Magnetic field is (nearly) parallel to gravity, or missing
    #[error("magnetic field has no usable horizontal component")]
    MagneticAlignment,
}
