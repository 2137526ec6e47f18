//! Wrap-aware low-pass filter for compass headings

use crate::error::{Error, Result};
use crate::math::{shortest_delta, wrap_degrees};
use crate::types::SMOOTHING_FACTOR;

/// Exponential low-pass filter over compass azimuths
///
/// Each update moves the filtered value a fraction `α` of the way toward the
/// new sample along the shorter arc, so crossing the 0°/360° seam never
/// produces a near-full-turn jump.
///
/// The filter starts at 0° and converges from there.
///
/// # Example
/// ```
/// use qibla_compass::HeadingFilter;
///
/// let mut filter = HeadingFilter::new();
/// let heading = filter.update(350.0);
///
/// // Moved 10% of the 10° short arc, not 10% of 350°
/// assert!((heading - 359.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeadingFilter {
    /// Weight given to each new sample
    smoothing_factor: f64,
    /// Current filtered azimuth in [0, 360)
    filtered_azimuth: f64,
}

impl HeadingFilter {
    /// Create a filter with the default smoothing factor
    pub fn new() -> Self {
        Self {
            smoothing_factor: SMOOTHING_FACTOR,
            filtered_azimuth: 0.0,
        }
    }

    /// Create a filter with a custom smoothing factor in (0, 1]
    ///
    /// A factor of 1 disables smoothing entirely.
    pub fn with_smoothing_factor(smoothing_factor: f64) -> Result<Self> {
        if !(smoothing_factor > 0.0 && smoothing_factor <= 1.0) {
            return Err(Error::InvalidSmoothingFactor(smoothing_factor));
        }
        Ok(Self {
            smoothing_factor,
            filtered_azimuth: 0.0,
        })
    }

    /// Blend a raw azimuth sample into the filtered value and return it
    ///
    /// # Arguments
    /// * `raw` - Raw azimuth in degrees [0, 360)
    pub fn update(&mut self, raw: f64) -> f64 {
        let delta = shortest_delta(self.filtered_azimuth, raw);
        self.filtered_azimuth = wrap_degrees(self.filtered_azimuth + self.smoothing_factor * delta);
        self.filtered_azimuth
    }

    /// Current filtered azimuth
    pub fn value(&self) -> f64 {
        self.filtered_azimuth
    }

    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    /// Return the filter to its initial 0° state
    pub fn reset(&mut self) {
        self.filtered_azimuth = 0.0;
    }
}

impl Default for HeadingFilter {
    fn default() -> Self {
        Self::new()
    }
}
