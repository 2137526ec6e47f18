//! Advanced qibla compass demonstration
//!
//! This example walks through a full session the way a host application
//! would drive it:
//! - Preferences loaded from flat JSON, manual location in no-GPS mode
//! - Hard iron magnetometer calibration
//! - A simulated device slowly turning toward the qibla, with sensor noise
//!   and occasional free-fall samples that are skipped
//! - Alignment events for haptic and sound feedback
//!
//! Run with: `RUST_LOG=debug cargo run --example advanced`

use log::info;
use nalgebra::Vector3;
use qibla_compass::location::{LocationSource, ManualLocation};
use qibla_compass::settings::{MemoryStore, Preferences};
use qibla_compass::{AlignmentEvent, MagneticCalibration, QiblaCompass};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::error::Error;

const SAMPLE_RATE: f64 = 50.0; // 50 Hz
const TURN_RATE: f64 = 20.0; // deg/s

const STORED_PREFERENCES: &str = r#"{
    "no_gps_mode": true,
    "lat": 51.5074,
    "lon": -0.1278,
    "location_name": "United Kingdom, London",
    "is_smooth": true,
    "vibration_enabled": true,
    "sound_enabled": false,
    "text_size": "Large"
}"#;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let prefs = Preferences::new(MemoryStore::from_json(STORED_PREFERENCES)?);
    println!(
        "Location: {} (no-GPS mode: {})",
        prefs.location_name(),
        prefs.no_gps_mode()
    );

    let mut compass = QiblaCompass::with_settings(prefs.compass_settings())?;

    let hard_iron = Vector3::new(12.0, -7.5, 3.0);
    compass.set_magnetic_calibration(MagneticCalibration::with_hard_iron(hard_iron));
    compass.set_accuracy(3);

    let mut source = ManualLocation::new(&prefs);
    if let Some(fix) = source.latest_fix() {
        info!("manual fix {}", fix);
    }
    if !compass.use_location_source(&mut source) {
        println!("No location available; open the map picker to choose one.");
        return Ok(());
    }
    let bearing = compass.bearing().unwrap_or_default();
    println!("Qibla bearing: {:.2}°", bearing);

    let mut rng = Pcg64::seed_from_u64(5);
    let mut azimuth = 0.0f64;
    let step = TURN_RATE / SAMPLE_RATE;

    for i in 0..(SAMPLE_RATE as usize * 15) {
        // Turn toward the qibla, then hold
        if azimuth < bearing {
            azimuth = (azimuth + step).min(bearing);
        }

        if i % 40 == 0 {
            // Momentary free fall; skipped by the session
            compass.update_accelerometer(Vector3::new(0.0, 0.0, 0.05));
            continue;
        }

        let angle = (-(azimuth + rng.random_range(-1.0..1.0)) as f32).to_radians();
        let accelerometer = Vector3::new(
            rng.random_range(-0.05..0.05),
            rng.random_range(-0.05..0.05),
            9.81,
        );
        let magnetometer = Vector3::new(22.0 * angle.sin(), 22.0 * angle.cos(), -40.0) + hard_iron;

        compass.update_accelerometer(accelerometer);
        compass.update_magnetometer(magnetometer);

        match compass.poll_alignment() {
            Some(AlignmentEvent::Entered) => {
                if prefs.vibration_enabled() {
                    println!("  [vibrate] facing qibla");
                }
                if prefs.sound_enabled() {
                    println!("  [sound] facing qibla");
                }
            }
            Some(AlignmentEvent::Left) => println!("  left qibla alignment"),
            None => {}
        }

        if i % SAMPLE_RATE as usize == 0 {
            if let Some(reading) = compass.reading() {
                println!(
                    "t={:>4.1}s heading {:>6.2}° {:<3} arrow {:>6.2}° accuracy {} {}",
                    i as f64 / SAMPLE_RATE,
                    reading.heading,
                    reading.cardinal,
                    reading.arrow_angle,
                    reading.accuracy,
                    if reading.facing_qibla { "aligned" } else { "" }
                );
            }
        }
    }

    let scale = prefs.text_size().scale();
    println!(
        "Text scale: title {}sp, subtitle {}sp",
        scale.title, scale.subtitle
    );

    Ok(())
}
