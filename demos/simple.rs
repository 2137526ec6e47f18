use nalgebra::Vector3;
use qibla_compass::QiblaCompass;

fn main() {
    let mut compass = QiblaCompass::new();

    // replace this with the fix from the platform location provider
    compass.update_location(-6.2000, 106.8166);

    for _ in 0..10 {
        // this loop should repeat each time new sensor data is available
        let accelerometer = Vector3::new(0.0, 0.0, 9.81); // replace this with actual accelerometer data in m/s²
        let magnetometer = Vector3::new(0.0, 22.0, -40.0); // replace this with actual magnetometer data in µT

        compass.update_accelerometer(accelerometer);
        compass.update_magnetometer(magnetometer);

        if let Some(reading) = compass.reading() {
            println!(
                "Qibla: {:.2}, Heading: {:.2} ({}), Arrow: {:.2}",
                reading.bearing, reading.heading, reading.cardinal, reading.arrow_angle
            );
        }
    }
}
