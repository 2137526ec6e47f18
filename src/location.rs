//! Location sources feeding the bearing calculation

use crate::settings::{Preferences, SettingsStore};
use crate::types::GeoCoordinate;
use core::time::Duration;
use log::debug;

/// Starting point offered by a map picker when nothing has been chosen yet
pub const DEFAULT_MAP_CENTER: GeoCoordinate = GeoCoordinate {
    latitude: -6.2000,
    longitude: 106.8166,
};

/// Cadence at which high-accuracy location updates are requested
pub const LOCATION_UPDATE_INTERVAL: Duration = Duration::from_secs(5);

/// Anything that can report the latest known position
pub trait LocationSource {
    /// Latest usable fix, or `None` if no position is known
    fn latest_fix(&mut self) -> Option<GeoCoordinate>;
}

/// Validate a raw fix, treating the zero sentinel and invalid ranges as absent
pub fn usable_fix(latitude: f64, longitude: f64) -> Option<GeoCoordinate> {
    match GeoCoordinate::new(latitude, longitude) {
        Ok(fix) if !fix.is_unset() => Some(fix),
        Ok(_) => None,
        Err(err) => {
            debug!("ignoring location fix: {}", err);
            None
        }
    }
}

/// Manually chosen location stored in the preferences (no-GPS mode)
///
/// # Example
/// ```
/// use qibla_compass::location::{LocationSource, ManualLocation};
/// use qibla_compass::settings::{MemoryStore, Preferences};
/// use qibla_compass::GeoCoordinate;
///
/// let mut prefs = Preferences::new(MemoryStore::new());
/// assert!(ManualLocation::new(&prefs).latest_fix().is_none());
///
/// prefs.set_manual_coordinate(GeoCoordinate::new(-6.2, 106.8166).unwrap());
/// assert!(ManualLocation::new(&prefs).latest_fix().is_some());
/// ```
#[derive(Debug)]
pub struct ManualLocation<'a, S: SettingsStore> {
    preferences: &'a Preferences<S>,
}

impl<'a, S: SettingsStore> ManualLocation<'a, S> {
    pub fn new(preferences: &'a Preferences<S>) -> Self {
        Self { preferences }
    }
}

impl<S: SettingsStore> LocationSource for ManualLocation<'_, S> {
    fn latest_fix(&mut self) -> Option<GeoCoordinate> {
        let (latitude, longitude) = self.preferences.manual_coordinate();
        usable_fix(latitude, longitude)
    }
}

/// Last fix delivered by a streaming location provider
#[derive(Debug, Clone, Copy, Default)]
pub struct LastKnownLocation {
    fix: Option<GeoCoordinate>,
}

impl LastKnownLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new fix from the provider
    ///
    /// Returns whether the fix was usable. Unusable fixes leave the previous
    /// one in place.
    pub fn update(&mut self, latitude: f64, longitude: f64) -> bool {
        match usable_fix(latitude, longitude) {
            Some(fix) => {
                self.fix = Some(fix);
                true
            }
            None => false,
        }
    }

    pub fn get(&self) -> Option<GeoCoordinate> {
        self.fix
    }

    pub fn clear(&mut self) {
        self.fix = None;
    }
}

impl LocationSource for LastKnownLocation {
    fn latest_fix(&mut self) -> Option<GeoCoordinate> {
        self.fix
    }
}

impl LocationSource for Option<GeoCoordinate> {
    fn latest_fix(&mut self) -> Option<GeoCoordinate> {
        self.filter(|fix| !fix.is_unset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    #[test]
    fn test_usable_fix() {
        assert!(usable_fix(-6.2, 106.8166).is_some());
        assert!(usable_fix(0.0, 0.0).is_none());
        assert!(usable_fix(0.0, 106.8166).is_none());
        assert!(usable_fix(95.0, 10.0).is_none());
        assert!(usable_fix(f64::NAN, 10.0).is_none());
    }

    #[test]
    fn test_last_known_keeps_previous_on_bad_fix() {
        let mut location = LastKnownLocation::new();
        assert!(location.get().is_none());

        assert!(location.update(51.5074, -0.1278));
        assert!(!location.update(0.0, 0.0));
        assert!(!location.update(200.0, 0.5));

        let fix = location.latest_fix().unwrap();
        assert_eq!(fix.latitude, 51.5074);

        location.clear();
        assert!(location.latest_fix().is_none());
    }

    #[test]
    fn test_manual_location_reads_preferences() {
        let mut prefs = Preferences::new(MemoryStore::new());
        prefs.set_manual_coordinate(DEFAULT_MAP_CENTER);

        let fix = ManualLocation::new(&prefs).latest_fix().unwrap();
        assert_eq!(fix, DEFAULT_MAP_CENTER);
    }

    #[test]
    fn test_option_source() {
        let mut none: Option<GeoCoordinate> = None;
        assert!(none.latest_fix().is_none());

        let mut unset = Some(GeoCoordinate {
            latitude: 0.0,
            longitude: 0.0,
        });
        assert!(unset.latest_fix().is_none());

        let mut fixed = Some(DEFAULT_MAP_CENTER);
        assert_eq!(fixed.latest_fix(), Some(DEFAULT_MAP_CENTER));
    }

    #[test]
    fn test_update_interval() {
        assert_eq!(LOCATION_UPDATE_INTERVAL.as_millis(), 5_000);
    }
}
