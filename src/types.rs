//! Core value types for the qibla compass library

use crate::error::{Error, Result};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Default smoothing factor for the heading filter
///
/// 0.05 is smoother but slower, 0.2 is faster but noisier.
pub const SMOOTHING_FACTOR: f64 = 0.1;

/// A point on the Earth's surface in decimal degrees
///
/// # Example
/// ```
/// use qibla_compass::GeoCoordinate;
///
/// let jakarta = GeoCoordinate::new(-6.2000, 106.8166).unwrap();
/// assert!(GeoCoordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees, positive north, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, positive east, within [-180, 180]
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting out-of-range or NaN components
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Whether this is the "no fix" sentinel
    ///
    /// Location providers and stored preferences report a missing position
    /// as zero, so a coordinate with either component exactly 0.0 is treated
    /// as absent.
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Magnetometer reliability reported alongside heading samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum AccuracyTier {
    #[default]
    Unreliable,
    Low,
    Medium,
    High,
}

impl AccuracyTier {
    /// Map a platform accuracy ordinal (0..=3) to a tier
    ///
    /// Anything outside the known range is treated as unreliable.
    pub fn from_ordinal(ordinal: i32) -> Self {
        match ordinal {
            3 => Self::High,
            2 => Self::Medium,
            1 => Self::Low,
            _ => Self::Unreliable,
        }
    }

    pub fn ordinal(self) -> i32 {
        match self {
            Self::Unreliable => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Short label for an accuracy indicator
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Very good",
            Self::Medium => "Good",
            Self::Low => "Fair",
            Self::Unreliable => "Poor",
        }
    }
}

impl fmt::Display for AccuracyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compass session settings
///
/// # Example
/// ```
/// use qibla_compass::CompassSettings;
///
/// let settings = CompassSettings {
///     smoothing_factor: 0.05, // smoother, slower
///     ..Default::default()
/// };
/// assert!(settings.smooth);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassSettings {
    /// Low-pass filter weight given to each new sample, in (0, 1]
    pub smoothing_factor: f64,
    /// Apply the low-pass filter; when false raw azimuths are reported as-is
    pub smooth: bool,
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            smoothing_factor: SMOOTHING_FACTOR,
            smooth: true,
        }
    }
}
