//! Sensor driver traits and implementations

pub mod bno055;
pub mod mock;
pub mod rplidar;

use crate::config::HardwareConfig;
use crate::error::{Error, Result};
use crate::transport::SerialTransport;
use crate::types::{Orientation, SweepScan};

pub use bno055::Bno055Driver;
pub use rplidar::RplidarDriver;

/// Rotating range scanner producing one sweep per revolution.
///
/// The driver owns the device connection lifecycle; consumers only pull
/// sweeps. `get_scan` returns `Ok(None)` while a revolution is still in
/// progress, which is distinct from a malformed sample inside a sweep.
pub trait RangeScanner: Send {
    /// Begin scanning (spins up the motor where applicable)
    fn start(&mut self) -> Result<()>;

    /// Try to fetch the next complete sweep, non-blocking
    fn get_scan(&mut self) -> Result<Option<SweepScan>>;

    /// Stop scanning
    fn stop(&mut self) -> Result<()>;

    /// Check if the scanner is actively sweeping
    fn is_scanning(&self) -> bool;
}

/// Inertial orientation sensor.
///
/// `read` returns the latest yaw/pitch/roll estimate, or `Ok(None)` when
/// the sensor has no reading available (fusion not converged, bus busy).
/// I/O failures are errors, never a silent absent reading.
pub trait OrientationSensor: Send {
    /// Read the latest orientation estimate
    fn read(&mut self) -> Result<Option<Orientation>>;
}

/// Single-beam time-of-flight rangefinder.
pub trait RangeFinder: Send {
    /// Read a calibrated distance in centimeters, `Ok(None)` if no sample
    /// is ready yet
    fn read_distance_cm(&mut self) -> Result<Option<f32>>;
}

/// The full set of rig sensors created from configuration.
///
/// A rangefinder is optional; not every rig carries the ToF sensor.
pub struct DeviceSet {
    pub scanner: Box<dyn RangeScanner>,
    pub orientation: Box<dyn OrientationSensor>,
    pub rangefinder: Option<Box<dyn RangeFinder>>,
}

/// Create rig devices based on configuration
pub fn create_devices(config: &HardwareConfig) -> Result<DeviceSet> {
    match config.driver.as_str() {
        "rplidar" => {
            let scanner_transport =
                SerialTransport::open(&config.scanner_port, config.scanner_baud)?;
            let imu_transport = SerialTransport::open(&config.imu_port, config.imu_baud)?;
            Ok(DeviceSet {
                scanner: Box::new(RplidarDriver::new(scanner_transport)?),
                orientation: Box::new(Bno055Driver::new(imu_transport)?),
                // The ToF rangefinder sits on the I2C bus, outside the
                // serial device set; see mock driver for the trait shape.
                rangefinder: None,
            })
        }
        "mock" => {
            let seed = config.mock_seed;
            Ok(DeviceSet {
                scanner: Box::new(mock::MockScanner::synthetic(seed)),
                orientation: Box::new(mock::MockOrientationSensor::fixed(Orientation::identity())),
                rangefinder: Some(Box::new(mock::MockRangeFinder::new(120.0, seed))),
            })
        }
        other => Err(Error::UnknownDevice(other.to_string())),
    }
}
