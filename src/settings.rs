//! User preferences over an injected key-value store

use crate::error::Result;
use crate::types::{CompassSettings, GeoCoordinate, SMOOTHING_FACTOR};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Preference keys
pub mod keys {
    pub const NO_GPS_MODE: &str = "no_gps_mode";
    pub const DARK_MODE: &str = "dark_mode";
    pub const LATITUDE: &str = "lat";
    pub const LONGITUDE: &str = "lon";
    pub const LOCATION_NAME: &str = "location_name";
    pub const COMPASS_TYPE: &str = "compass_type";
    pub const TEXT_SIZE: &str = "text_size";
    pub const SMOOTH_ANIMATION: &str = "is_smooth";
    pub const SOUND_ENABLED: &str = "sound_enabled";
    pub const VIBRATION_ENABLED: &str = "vibration_enabled";
    pub const ACCURACY_STYLE: &str = "accuracy_style";
}

/// A single stored preference value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Float(f64),
    Text(String),
}

/// Flat key-value persistence capability
///
/// Implemented by whatever the host platform offers; [`MemoryStore`] is the
/// in-process implementation.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<SettingValue>;
    fn set(&mut self, key: &str, value: SettingValue);
    fn remove(&mut self, key: &str);
}

/// In-memory settings store, persistable as a flat JSON object
///
/// # Example
/// ```
/// use qibla_compass::settings::{MemoryStore, SettingValue, SettingsStore};
///
/// let mut store = MemoryStore::from_json(r#"{"lat": -6.2, "no_gps_mode": true}"#).unwrap();
/// assert_eq!(store.get("lat"), Some(SettingValue::Float(-6.2)));
///
/// store.set("location_name", SettingValue::Text("Jakarta".into()));
/// let json = store.to_json().unwrap();
/// assert!(json.contains("Jakarta"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: HashMap<String, SettingValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a flat JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let values = serde_json::from_str(json)?;
        Ok(Self { values })
    }

    /// Serialize to a flat JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DarkMode {
    /// Follow the system theme
    #[default]
    Auto,
    On,
    Off,
}

impl DarkMode {
    /// Whether to render dark, given the system preference
    pub fn resolve(self, system_dark: bool) -> bool {
        match self {
            DarkMode::On => true,
            DarkMode::Off => false,
            DarkMode::Auto => system_dark,
        }
    }
}

/// Compass dial style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompassStyle {
    #[default]
    Analog,
    Digital,
}

/// Text size preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Normal,
    Large,
    VeryLarge,
}

/// Font sizes (sp) for title and subtitle text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScale {
    pub title: f32,
    pub subtitle: f32,
}

impl TextSize {
    pub fn scale(self) -> TextScale {
        let (title, subtitle) = match self {
            TextSize::Small => (14.0, 11.0),
            TextSize::Normal => (16.0, 12.0),
            TextSize::Large => (18.0, 14.0),
            TextSize::VeryLarge => (20.0, 16.0),
        };
        TextScale { title, subtitle }
    }
}

/// How compass accuracy is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccuracyStyle {
    Numbers,
    #[default]
    ColorCode,
}

/// Stored labels for the textual enums
trait Label: Sized + Copy + Default + PartialEq + 'static {
    const LABELS: &'static [(Self, &'static str)];

    fn label(self) -> &'static str {
        Self::LABELS
            .iter()
            .find(|(value, _)| *value == self)
            .map(|(_, label)| *label)
            .unwrap_or_default()
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(value, _)| *value)
    }
}

impl Label for DarkMode {
    const LABELS: &'static [(Self, &'static str)] =
        &[(DarkMode::Auto, "Auto"), (DarkMode::On, "On"), (DarkMode::Off, "Off")];
}

impl Label for CompassStyle {
    const LABELS: &'static [(Self, &'static str)] = &[
        (CompassStyle::Analog, "Analog"),
        (CompassStyle::Digital, "Digital Style"),
    ];
}

impl Label for TextSize {
    const LABELS: &'static [(Self, &'static str)] = &[
        (TextSize::Small, "Small"),
        (TextSize::Normal, "Normal"),
        (TextSize::Large, "Large"),
        (TextSize::VeryLarge, "Very Large"),
    ];
}

impl Label for AccuracyStyle {
    const LABELS: &'static [(Self, &'static str)] = &[
        (AccuracyStyle::Numbers, "Numbers"),
        (AccuracyStyle::ColorCode, "Color Code"),
    ];
}

/// Typed view over a [`SettingsStore`]
///
/// Missing keys read as their defaults. Values of the wrong type, or text
/// that names no known option, also read as the default and log a warning.
///
/// # Example
/// ```
/// use qibla_compass::settings::{MemoryStore, Preferences, TextSize};
///
/// let mut prefs = Preferences::new(MemoryStore::new());
/// assert_eq!(prefs.text_size(), TextSize::Normal);
///
/// prefs.set_text_size(TextSize::Large);
/// assert_eq!(prefs.text_size().scale().title, 18.0);
/// ```
#[derive(Debug)]
pub struct Preferences<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.store.get(key) {
            Some(SettingValue::Bool(value)) => value,
            None => default,
            Some(other) => {
                warn!("setting {} has unexpected value {:?}, using {}", key, other, default);
                default
            }
        }
    }

    fn float_or(&self, key: &str, default: f64) -> f64 {
        match self.store.get(key) {
            Some(SettingValue::Float(value)) => value,
            None => default,
            Some(other) => {
                warn!("setting {} has unexpected value {:?}, using {}", key, other, default);
                default
            }
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Some(SettingValue::Text(value)) => Some(value),
            None => None,
            Some(other) => {
                warn!("setting {} has unexpected value {:?}", key, other);
                None
            }
        }
    }

    fn option<T: Label>(&self, key: &str) -> T {
        let Some(label) = self.text(key) else {
            return T::default();
        };
        T::from_label(&label).unwrap_or_else(|| {
            warn!("setting {} has unknown option {:?}", key, label);
            T::default()
        })
    }

    fn set_option<T: Label>(&mut self, key: &str, value: T) {
        self.store
            .set(key, SettingValue::Text(value.label().to_owned()));
    }

    pub fn no_gps_mode(&self) -> bool {
        self.bool_or(keys::NO_GPS_MODE, false)
    }

    pub fn set_no_gps_mode(&mut self, enabled: bool) {
        self.store.set(keys::NO_GPS_MODE, SettingValue::Bool(enabled));
    }

    pub fn dark_mode(&self) -> DarkMode {
        self.option(keys::DARK_MODE)
    }

    pub fn set_dark_mode(&mut self, mode: DarkMode) {
        self.set_option(keys::DARK_MODE, mode);
    }

    /// Manually entered coordinate, stored as separate latitude/longitude
    ///
    /// Returns the raw pair; it may be the unset (0, 0) sentinel.
    pub fn manual_coordinate(&self) -> (f64, f64) {
        (
            self.float_or(keys::LATITUDE, 0.0),
            self.float_or(keys::LONGITUDE, 0.0),
        )
    }

    pub fn set_manual_coordinate(&mut self, coordinate: GeoCoordinate) {
        self.store
            .set(keys::LATITUDE, SettingValue::Float(coordinate.latitude));
        self.store
            .set(keys::LONGITUDE, SettingValue::Float(coordinate.longitude));
    }

    pub fn location_name(&self) -> String {
        self.text(keys::LOCATION_NAME).unwrap_or_default()
    }

    pub fn set_location_name(&mut self, name: &str) {
        self.store
            .set(keys::LOCATION_NAME, SettingValue::Text(name.to_owned()));
    }

    pub fn compass_style(&self) -> CompassStyle {
        self.option(keys::COMPASS_TYPE)
    }

    pub fn set_compass_style(&mut self, style: CompassStyle) {
        self.set_option(keys::COMPASS_TYPE, style);
    }

    pub fn text_size(&self) -> TextSize {
        self.option(keys::TEXT_SIZE)
    }

    pub fn set_text_size(&mut self, size: TextSize) {
        self.set_option(keys::TEXT_SIZE, size);
    }

    pub fn smooth_animation(&self) -> bool {
        self.bool_or(keys::SMOOTH_ANIMATION, true)
    }

    pub fn set_smooth_animation(&mut self, enabled: bool) {
        self.store
            .set(keys::SMOOTH_ANIMATION, SettingValue::Bool(enabled));
    }

    pub fn sound_enabled(&self) -> bool {
        self.bool_or(keys::SOUND_ENABLED, true)
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.store.set(keys::SOUND_ENABLED, SettingValue::Bool(enabled));
    }

    pub fn vibration_enabled(&self) -> bool {
        self.bool_or(keys::VIBRATION_ENABLED, true)
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) {
        self.store
            .set(keys::VIBRATION_ENABLED, SettingValue::Bool(enabled));
    }

    pub fn accuracy_style(&self) -> AccuracyStyle {
        self.option(keys::ACCURACY_STYLE)
    }

    pub fn set_accuracy_style(&mut self, style: AccuracyStyle) {
        self.set_option(keys::ACCURACY_STYLE, style);
    }

    /// Compass session settings implied by the stored preferences
    pub fn compass_settings(&self) -> CompassSettings {
        CompassSettings {
            smoothing_factor: SMOOTHING_FACTOR,
            smooth: self.smooth_animation(),
        }
    }
}
