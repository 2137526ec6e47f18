//! Qibla Compass - direction to the Kaaba from device sensors and location
//!
//! This library computes the great-circle bearing from any point on Earth to
//! the Kaaba in Mecca, turns accelerometer and magnetometer readings into a
//! tilt-compensated, smoothed compass heading, and projects the two into the
//! values a compass screen draws: the rotation of the qibla arrow, whether the
//! device is aligned, and a 16-point cardinal label.
//!
//! Platform concerns (sensor registration, location permissions, haptics,
//! rendering) stay with the host application. It feeds samples in and polls
//! results out.
//!
//! # Features
//!
//! - Great-circle initial bearing to the Kaaba
//! - Tilt-compensated azimuth with free-fall and magnetic-alignment rejection
//! - Wrap-aware exponential low-pass filter that never jumps across 0°/360°
//! - Hard and soft iron magnetometer calibration
//! - Typed user preferences over an injected key-value store
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use qibla_compass::QiblaCompass;
//!
//! let mut compass = QiblaCompass::new();
//!
//! // Location fix from the platform
//! compass.update_location(51.5074, -0.1278);
//!
//! // Sensor readings
//! let accelerometer = Vector3::new(0.0, 0.0, 9.81); // m/s²
//! let magnetometer = Vector3::new(0.0, 22.0, -40.0); // µT
//! compass.update_accelerometer(accelerometer);
//! compass.update_magnetometer(magnetometer);
//!
//! if let Some(reading) = compass.reading() {
//!     println!(
//!         "qibla {:.1}°, heading {:.1}° {}, rotate arrow {:.1}°",
//!         reading.bearing, reading.heading, reading.cardinal, reading.arrow_angle
//!     );
//! }
//! ```

mod bearing;
pub mod calibration;
pub mod compass;
mod display;
mod error;
mod filter;
pub mod location;
mod math;
mod session;
pub mod settings;
mod types;

// Re-export all public types and functions
pub use bearing::{KAABA, initial_bearing, qibla_bearing};
pub use calibration::MagneticCalibration;
pub use compass::calculate_azimuth;
pub use display::{
    ARROW_SNAP_TOLERANCE_DEG, Cardinal, QIBLA_ALIGNMENT_TOLERANCE_DEG, cardinal_direction,
    is_facing_qibla, relative_arrow_angle, snapped_arrow_angle,
};
pub use error::{Error, OrientationError, Result};
pub use filter::HeadingFilter;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext, angular_distance, shortest_delta, wrap_degrees};
pub use session::{AlignmentEvent, QiblaCompass, QiblaReading};
pub use types::*;
