//! Qibla compass session tying sensors, location and display together

use crate::calibration::MagneticCalibration;
use crate::compass::calculate_azimuth;
use crate::display::{Cardinal, is_facing_qibla, relative_arrow_angle, snapped_arrow_angle};
use crate::error::Result;
use crate::filter::HeadingFilter;
use crate::location::{LocationSource, usable_fix};
use crate::math::wrap_degrees;
use crate::types::{AccuracyTier, CompassSettings, GeoCoordinate};
use log::{debug, info};
use nalgebra::Vector3;

/// Everything a compass screen needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaReading {
    /// Qibla bearing from the current location, degrees [0, 360)
    pub bearing: f64,
    /// Current (filtered) device heading, degrees [0, 360)
    pub heading: f64,
    /// Rotation of the qibla arrow relative to the facing direction
    pub relative_angle: f64,
    /// `relative_angle`, snapped to 0 when nearly aligned
    pub arrow_angle: f64,
    /// Whether the device is within the alignment tolerance
    pub facing_qibla: bool,
    /// Compass point of the current heading
    pub cardinal: Cardinal,
    /// Magnetometer reliability
    pub accuracy: AccuracyTier,
}

/// Transition of the "facing qibla" state, for haptic or sound feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentEvent {
    Entered,
    Left,
}

/// Single-writer compass session
///
/// Sensor callbacks feed accelerometer and magnetometer vectors (or an
/// already-resolved azimuth), location callbacks feed fixes, and the
/// presentation layer polls [`QiblaCompass::reading`].
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use qibla_compass::QiblaCompass;
///
/// let mut compass = QiblaCompass::new();
/// assert!(compass.reading().is_none()); // no location yet
///
/// compass.update_location(-6.2000, 106.8166);
/// compass.update_accelerometer(Vector3::new(0.0, 0.0, 9.81));
/// compass.update_magnetometer(Vector3::new(0.0, 22.0, -40.0));
///
/// let reading = compass.reading().unwrap();
/// assert!((reading.bearing - 295.16).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct QiblaCompass {
    settings: CompassSettings,
    filter: HeadingFilter,
    calibration: MagneticCalibration,
    /// Last accelerometer reading, if any
    accelerometer: Option<Vector3<f32>>,
    /// Last calibrated magnetometer reading, if any
    magnetometer: Option<Vector3<f32>>,
    /// Heading reported to the display
    heading: f64,
    accuracy: AccuracyTier,
    location: Option<GeoCoordinate>,
    bearing: Option<f64>,
    /// Facing state last reported through `poll_alignment`
    reported_facing: bool,
}

impl QiblaCompass {
    /// Create a session with default settings
    pub fn new() -> Self {
        Self::from_parts(CompassSettings::default(), HeadingFilter::new())
    }

    /// Create a session with the given settings
    pub fn with_settings(settings: CompassSettings) -> Result<Self> {
        let filter = HeadingFilter::with_smoothing_factor(settings.smoothing_factor)?;
        Ok(Self::from_parts(settings, filter))
    }

    fn from_parts(settings: CompassSettings, filter: HeadingFilter) -> Self {
        Self {
            settings,
            filter,
            calibration: MagneticCalibration::default(),
            accelerometer: None,
            magnetometer: None,
            heading: 0.0,
            accuracy: AccuracyTier::Unreliable,
            location: None,
            bearing: None,
            reported_facing: false,
        }
    }

    pub fn settings(&self) -> CompassSettings {
        self.settings
    }

    /// Turn smoothing on or off
    ///
    /// Re-enabling smoothing restarts the filter from 0°.
    pub fn set_smooth(&mut self, smooth: bool) {
        if smooth && !self.settings.smooth {
            self.filter.reset();
        }
        self.settings.smooth = smooth;
    }

    pub fn set_magnetic_calibration(&mut self, calibration: MagneticCalibration) {
        self.calibration = calibration;
    }

    /// New accelerometer sample in m/s², device frame
    pub fn update_accelerometer(&mut self, accelerometer: Vector3<f32>) {
        self.accelerometer = Some(accelerometer);
        self.resolve_orientation();
    }

    /// New raw magnetometer sample in µT, device frame
    pub fn update_magnetometer(&mut self, magnetometer: Vector3<f32>) {
        self.magnetometer = Some(self.calibration.apply(magnetometer));
        self.resolve_orientation();
    }

    fn resolve_orientation(&mut self) {
        let (Some(accelerometer), Some(magnetometer)) = (self.accelerometer, self.magnetometer)
        else {
            return;
        };

        match calculate_azimuth(accelerometer, magnetometer) {
            Ok(azimuth) => {
                self.update_heading(azimuth);
            }
            Err(err) => debug!("skipping orientation sample: {}", err),
        }
    }

    /// Feed an already-resolved azimuth in degrees
    ///
    /// Non-finite samples are skipped.
    pub fn update_heading(&mut self, raw: f64) -> f64 {
        if !raw.is_finite() {
            debug!("skipping non-finite heading sample");
            return self.heading;
        }
        let raw = wrap_degrees(raw);
        self.heading = if self.settings.smooth {
            self.filter.update(raw)
        } else {
            raw
        };
        self.heading
    }

    /// Platform accuracy ordinal for the magnetometer
    pub fn set_accuracy(&mut self, ordinal: i32) {
        self.accuracy = AccuracyTier::from_ordinal(ordinal);
    }

    /// New location fix
    ///
    /// Returns whether the fix was usable. The zero sentinel and invalid
    /// coordinates are ignored and keep any previous bearing.
    pub fn update_location(&mut self, latitude: f64, longitude: f64) -> bool {
        match usable_fix(latitude, longitude) {
            Some(fix) => {
                self.set_location(fix);
                true
            }
            None => false,
        }
    }

    /// Pull the latest fix from a location source
    pub fn use_location_source<L: LocationSource + ?Sized>(&mut self, source: &mut L) -> bool {
        match source.latest_fix() {
            Some(fix) => self.update_location(fix.latitude, fix.longitude),
            None => false,
        }
    }

    fn set_location(&mut self, fix: GeoCoordinate) {
        let bearing = fix.qibla_bearing();
        if self.location != Some(fix) {
            info!("location {} gives qibla bearing {:.2}°", fix, bearing);
        }
        self.location = Some(fix);
        self.bearing = Some(bearing);
    }

    /// Qibla bearing, absent until a usable location is known
    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    pub fn location(&self) -> Option<GeoCoordinate> {
        self.location
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn accuracy(&self) -> AccuracyTier {
        self.accuracy
    }

    /// Whether the device currently faces the qibla
    pub fn is_facing_qibla(&self) -> bool {
        self.bearing
            .is_some_and(|bearing| is_facing_qibla(bearing, self.heading))
    }

    /// Snapshot for display, absent until a bearing is known
    pub fn reading(&self) -> Option<QiblaReading> {
        let bearing = self.bearing?;
        let heading = self.heading;
        Some(QiblaReading {
            bearing,
            heading,
            relative_angle: relative_arrow_angle(bearing, heading),
            arrow_angle: snapped_arrow_angle(bearing, heading),
            facing_qibla: is_facing_qibla(bearing, heading),
            cardinal: Cardinal::from_heading(heading),
            accuracy: self.accuracy,
        })
    }

    /// Report a change in the facing state since the last poll
    pub fn poll_alignment(&mut self) -> Option<AlignmentEvent> {
        let facing = self.is_facing_qibla();
        if facing == self.reported_facing {
            return None;
        }
        self.reported_facing = facing;
        Some(if facing {
            AlignmentEvent::Entered
        } else {
            AlignmentEvent::Left
        })
    }

    /// Stop the sensor session
    ///
    /// Clears sensor vectors and returns the heading filter to its initial
    /// state. Location and bearing are kept.
    pub fn stop(&mut self) {
        self.accelerometer = None;
        self.magnetometer = None;
        self.filter.reset();
        self.heading = 0.0;
        self.accuracy = AccuracyTier::Unreliable;
        self.reported_facing = false;
    }
}

impl Default for QiblaCompass {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn level() -> Vector3<f32> {
        Vector3::new(0.0, 0.0, 9.81)
    }

    fn north_field() -> Vector3<f32> {
        Vector3::new(0.0, 22.0, -40.0)
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = CompassSettings {
            smoothing_factor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            QiblaCompass::with_settings(settings),
            Err(Error::InvalidSmoothingFactor(_))
        ));
    }

    #[test]
    fn test_waits_for_both_sensors() {
        let mut compass = QiblaCompass::with_settings(CompassSettings {
            smooth: false,
            ..Default::default()
        })
        .unwrap();

        compass.update_accelerometer(level());
        assert_eq!(compass.heading(), 0.0);

        // East: field's horizontal part along -X
        compass.update_magnetometer(Vector3::new(-22.0, 0.0, -40.0));
        assert!((compass.heading() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_degenerate_sample_keeps_heading() {
        let mut compass = QiblaCompass::with_settings(CompassSettings {
            smooth: false,
            ..Default::default()
        })
        .unwrap();
        compass.update_accelerometer(level());
        compass.update_magnetometer(Vector3::new(-22.0, 0.0, -40.0));
        let before = compass.heading();

        // Free fall, then a vertical field: both skipped
        compass.update_accelerometer(Vector3::new(0.0, 0.0, 0.1));
        assert_eq!(compass.heading(), before);
        compass.update_accelerometer(level());
        compass.update_magnetometer(Vector3::new(0.0, 0.0, -50.0));
        assert_eq!(compass.heading(), before);
    }

    #[test]
    fn test_smoothing_applied_by_default() {
        let mut compass = QiblaCompass::new();
        let heading = compass.update_heading(90.0);
        assert!((heading - 9.0).abs() < 1e-9);

        compass.set_smooth(false);
        assert_eq!(compass.update_heading(90.0), 90.0);

        // Re-enabling restarts the filter from 0
        compass.set_smooth(true);
        assert!((compass.update_heading(90.0) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_heading_skipped() {
        let mut compass = QiblaCompass::new();
        compass.set_smooth(false);
        compass.update_heading(45.0);
        assert_eq!(compass.update_heading(f64::NAN), 45.0);
        assert_eq!(compass.update_heading(f64::INFINITY), 45.0);
    }

    #[test]
    fn test_bearing_absent_without_location() {
        let mut compass = QiblaCompass::new();
        assert!(compass.bearing().is_none());
        assert!(!compass.update_location(0.0, 0.0));
        assert!(compass.bearing().is_none());
        assert!(compass.reading().is_none());
        assert!(!compass.is_facing_qibla());
    }

    #[test]
    fn test_bad_fix_keeps_bearing() {
        let mut compass = QiblaCompass::new();
        assert!(compass.update_location(51.5074, -0.1278));
        let bearing = compass.bearing().unwrap();

        assert!(!compass.update_location(0.0, 0.0));
        assert!(!compass.update_location(-91.0, 0.0));
        assert_eq!(compass.bearing(), Some(bearing));
    }

    #[test]
    fn test_location_source() {
        let mut compass = QiblaCompass::new();
        let mut source = Some(GeoCoordinate::new(40.7128, -74.006).unwrap());
        assert!(compass.use_location_source(&mut source));
        assert!((compass.bearing().unwrap() - 58.4817).abs() < 1e-3);

        let mut nothing: Option<GeoCoordinate> = None;
        assert!(!compass.use_location_source(&mut nothing));
    }

    #[test]
    fn test_reading_projection() {
        let mut compass = QiblaCompass::new();
        compass.set_smooth(false);
        compass.update_location(-6.2, 106.8166);
        compass.update_heading(300.0);
        compass.set_accuracy(3);

        let reading = compass.reading().unwrap();
        assert_eq!(reading.heading, 300.0);
        assert!((reading.relative_angle - 355.1563).abs() < 1e-3);
        assert_eq!(reading.arrow_angle, reading.relative_angle);
        assert!(!reading.facing_qibla);
        assert_eq!(reading.cardinal, Cardinal::WNW);
        assert_eq!(reading.accuracy, AccuracyTier::High);

        compass.update_heading(295.5);
        let reading = compass.reading().unwrap();
        assert!(reading.facing_qibla);
        assert_eq!(reading.arrow_angle, 0.0);
    }

    #[test]
    fn test_alignment_events() {
        let mut compass = QiblaCompass::new();
        compass.set_smooth(false);
        compass.update_location(-6.2, 106.8166);

        compass.update_heading(200.0);
        assert_eq!(compass.poll_alignment(), None);

        compass.update_heading(295.0);
        assert_eq!(compass.poll_alignment(), Some(AlignmentEvent::Entered));
        assert_eq!(compass.poll_alignment(), None);

        compass.update_heading(296.0);
        assert_eq!(compass.poll_alignment(), None);

        compass.update_heading(310.0);
        assert_eq!(compass.poll_alignment(), Some(AlignmentEvent::Left));
        assert_eq!(compass.poll_alignment(), None);
    }

    #[test]
    fn test_magnetic_calibration_applied() {
        let mut compass = QiblaCompass::with_settings(CompassSettings {
            smooth: false,
            ..Default::default()
        })
        .unwrap();
        let hard_iron = Vector3::new(30.0, -10.0, 5.0);
        compass.set_magnetic_calibration(MagneticCalibration::with_hard_iron(hard_iron));

        compass.update_accelerometer(level());
        compass.update_magnetometer(north_field() + hard_iron);
        assert!(compass.heading() < 0.01 || compass.heading() > 359.99);
    }

    #[test]
    fn test_stop_resets_sensor_state() {
        let mut compass = QiblaCompass::new();
        compass.update_location(-6.2, 106.8166);
        compass.set_accuracy(2);
        compass.update_heading(120.0);

        compass.stop();
        assert_eq!(compass.heading(), 0.0);
        assert_eq!(compass.accuracy(), AccuracyTier::Unreliable);
        assert!(compass.bearing().is_some());

        // A magnetometer sample alone is not enough after stop
        compass.update_magnetometer(north_field());
        assert_eq!(compass.heading(), 0.0);
    }
}
