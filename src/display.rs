//! Projection of bearing and heading into display values

use crate::math::wrap_degrees;
use core::fmt;

/// Arrow snaps to straight ahead when strictly within this many degrees
pub const ARROW_SNAP_TOLERANCE_DEG: f64 = 1.0;

/// Device counts as facing the qibla when within this many degrees (inclusive)
///
/// Drives the "aligned" status and the alignment feedback events.
pub const QIBLA_ALIGNMENT_TOLERANCE_DEG: f64 = 1.5;

/// Rotation to apply to a qibla arrow drawn relative to the facing direction
///
/// # Returns
/// `(bearing - heading)` normalized to [0, 360)
///
/// # Example
/// ```
/// use qibla_compass::relative_arrow_angle;
///
/// assert_eq!(relative_arrow_angle(350.0, 10.0), 340.0);
/// assert_eq!(relative_arrow_angle(10.0, 350.0), 20.0);
/// ```
pub fn relative_arrow_angle(bearing: f64, heading: f64) -> f64 {
    wrap_degrees(bearing - heading)
}

/// Relative arrow angle snapped to 0 when nearly aligned
pub fn snapped_arrow_angle(bearing: f64, heading: f64) -> f64 {
    let relative = relative_arrow_angle(bearing, heading);
    if relative < ARROW_SNAP_TOLERANCE_DEG || relative > 360.0 - ARROW_SNAP_TOLERANCE_DEG {
        0.0
    } else {
        relative
    }
}

/// Whether the device heading is within the alignment tolerance of the bearing
pub fn is_facing_qibla(bearing: f64, heading: f64) -> bool {
    let relative = relative_arrow_angle(bearing, heading);
    relative <= QIBLA_ALIGNMENT_TOLERANCE_DEG || relative >= 360.0 - QIBLA_ALIGNMENT_TOLERANCE_DEG
}

/// The 16 points of the compass rose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Cardinal {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl Cardinal {
    /// All points in clockwise order starting at north
    pub const ALL: [Cardinal; 16] = [
        Cardinal::N,
        Cardinal::NNE,
        Cardinal::NE,
        Cardinal::ENE,
        Cardinal::E,
        Cardinal::ESE,
        Cardinal::SE,
        Cardinal::SSE,
        Cardinal::S,
        Cardinal::SSW,
        Cardinal::SW,
        Cardinal::WSW,
        Cardinal::W,
        Cardinal::WNW,
        Cardinal::NW,
        Cardinal::NNW,
    ];

    /// Width of each sector in degrees
    pub const SECTOR_WIDTH: f64 = 22.5;

    /// Compass point containing the heading
    ///
    /// Sectors are centred on each point, so N covers [348.75, 360) and
    /// [0, 11.25). Boundaries belong to the clockwise sector. Non-finite
    /// headings map to N.
    pub fn from_heading(heading: f64) -> Self {
        let heading = wrap_degrees(heading);
        if !heading.is_finite() {
            return Cardinal::N;
        }
        let sector = ((heading + Self::SECTOR_WIDTH / 2.0) / Self::SECTOR_WIDTH) as usize;
        Self::ALL[sector % Self::ALL.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cardinal::N => "N",
            Cardinal::NNE => "NNE",
            Cardinal::NE => "NE",
            Cardinal::ENE => "ENE",
            Cardinal::E => "E",
            Cardinal::ESE => "ESE",
            Cardinal::SE => "SE",
            Cardinal::SSE => "SSE",
            Cardinal::S => "S",
            Cardinal::SSW => "SSW",
            Cardinal::SW => "SW",
            Cardinal::WSW => "WSW",
            Cardinal::W => "W",
            Cardinal::WNW => "WNW",
            Cardinal::NW => "NW",
            Cardinal::NNW => "NNW",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass point label for a heading
///
/// # Example
/// ```
/// use qibla_compass::{Cardinal, cardinal_direction};
///
/// assert_eq!(cardinal_direction(0.0), Cardinal::N);
/// assert_eq!(cardinal_direction(359.9), Cardinal::N);
/// assert_eq!(cardinal_direction(45.0).as_str(), "NE");
/// ```
pub fn cardinal_direction(heading: f64) -> Cardinal {
    Cardinal::from_heading(heading)
}
