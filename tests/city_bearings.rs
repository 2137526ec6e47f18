//! Pinned qibla bearings for well-known cities
//!
//! Reference values come from the great-circle initial bearing formula
//! evaluated in double precision and rounded to four decimals.

use qibla_compass::{GeoCoordinate, cardinal_direction, qibla_bearing};
use serde::Deserialize;

const TOLERANCE: f64 = 1e-3;

#[derive(Debug, Deserialize)]
struct CityFixture {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Bearing (deg)")]
    bearing: f64,
    #[serde(rename = "Cardinal")]
    cardinal: String,
}

fn load_fixtures() -> Vec<CityFixture> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/cities.csv");
    let mut reader = csv::Reader::from_path(path).expect("fixture file should open");
    reader
        .deserialize()
        .map(|record| record.expect("fixture row should parse"))
        .collect()
}

#[test]
fn test_fixture_table_loaded() {
    let fixtures = load_fixtures();
    assert_eq!(fixtures.len(), 12);
    assert!(fixtures.iter().any(|f| f.city == "Jakarta"));
}

#[test]
fn test_city_bearings() {
    for fixture in load_fixtures() {
        let bearing = qibla_bearing(fixture.latitude, fixture.longitude);
        assert!(
            (bearing - fixture.bearing).abs() < TOLERANCE,
            "{}: expected {:.4}°, got {:.4}°",
            fixture.city,
            fixture.bearing,
            bearing
        );
    }
}

#[test]
fn test_city_cardinals() {
    for fixture in load_fixtures() {
        let bearing = qibla_bearing(fixture.latitude, fixture.longitude);
        assert_eq!(
            cardinal_direction(bearing).as_str(),
            fixture.cardinal,
            "{} cardinal mismatch for {:.2}°",
            fixture.city,
            bearing
        );
    }
}

#[test]
fn test_city_coordinates_are_usable() {
    for fixture in load_fixtures() {
        let coordinate = GeoCoordinate::new(fixture.latitude, fixture.longitude)
            .unwrap_or_else(|err| panic!("{}: {}", fixture.city, err));
        assert!(!coordinate.is_unset(), "{} looks unset", fixture.city);
        assert_eq!(
            coordinate.qibla_bearing(),
            qibla_bearing(fixture.latitude, fixture.longitude)
        );
    }
}
