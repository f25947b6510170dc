//! Configuration for the RigScan-IO application
//!
//! Loads configuration from a TOML file: sensor ports, collection window
//! parameters, height-log settings, and logging.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub hardware: HardwareConfig,
    pub capture: CaptureSettings,
    pub height_log: HeightLogSettings,
    pub logging: LoggingConfig,
}

/// Hardware configuration (device selection and serial ports)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// Device family: "rplidar" (real hardware) or "mock" (simulation)
    pub driver: String,
    /// Rotating scanner serial port
    pub scanner_port: String,
    /// Scanner baud rate
    pub scanner_baud: u32,
    /// Orientation sensor serial port
    pub imu_port: String,
    /// Orientation sensor baud rate
    pub imu_baud: u32,
    /// Noise seed for the mock devices (0 = OS entropy)
    #[serde(default)]
    pub mock_seed: u64,
}

/// Point-cloud collection window settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureSettings {
    /// Sweeps to accumulate per collection window
    pub max_sweeps: u32,
    /// Deadline for the next sweep in milliseconds
    pub sweep_timeout_ms: u64,
    /// Output CSV path for the captured cloud
    pub output: String,
}

/// Periodic height-log settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeightLogSettings {
    /// Run the height logger after the capture window
    pub enabled: bool,
    /// Seconds between height samples
    pub interval_secs: u64,
    /// Deadline for a single sensor reading in milliseconds
    pub sensor_timeout_ms: u64,
    /// Fixed offset subtracted from every reading, in centimeters
    /// (sensor mounting recess above the rig baseplate)
    #[serde(default)]
    pub calibration_offset_cm: f32,
    /// Output CSV path for the height log (appended across runs)
    pub output: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration for the field rig.
    ///
    /// Matches the usual wiring: scanner on the USB-serial adapter, IMU
    /// on the primary UART. Deployments should use a TOML file.
    pub fn field_defaults() -> Self {
        Self {
            hardware: HardwareConfig {
                driver: "rplidar".to_string(),
                scanner_port: "/dev/ttyUSB0".to_string(),
                scanner_baud: 115_200,
                imu_port: "/dev/ttyS0".to_string(),
                imu_baud: 115_200,
                mock_seed: 0,
            },
            capture: CaptureSettings {
                max_sweeps: 10,
                sweep_timeout_ms: 5000,
                output: "cloud.csv".to_string(),
            },
            height_log: HeightLogSettings {
                enabled: false,
                interval_secs: 5,
                sensor_timeout_ms: 500,
                calibration_offset_cm: 1.5,
                output: "heights.csv".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::field_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::field_defaults();
        assert_eq!(config.hardware.driver, "rplidar");
        assert_eq!(config.hardware.scanner_port, "/dev/ttyUSB0");
        assert_eq!(config.hardware.scanner_baud, 115_200);
        assert_eq!(config.capture.max_sweeps, 10);
        assert!(!config.height_log.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::field_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[hardware]"));
        assert!(toml_string.contains("[capture]"));
        assert!(toml_string.contains("[height_log]"));
        assert!(toml_string.contains("[logging]"));

        assert!(toml_string.contains("scanner_port = \"/dev/ttyUSB0\""));
        assert!(toml_string.contains("max_sweeps = 10"));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[hardware]
driver = "mock"
scanner_port = "/dev/ttyUSB1"
scanner_baud = 256000
imu_port = "/dev/ttyAMA0"
imu_baud = 115200
mock_seed = 42

[capture]
max_sweeps = 25
sweep_timeout_ms = 2000
output = "/data/cloud.csv"

[height_log]
enabled = true
interval_secs = 1
sensor_timeout_ms = 250
calibration_offset_cm = 2.25
output = "/data/heights.csv"

[logging]
level = "debug"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.hardware.driver, "mock");
        assert_eq!(config.hardware.mock_seed, 42);
        assert_eq!(config.capture.max_sweeps, 25);
        assert!(config.height_log.enabled);
        assert_eq!(config.height_log.calibration_offset_cm, 2.25);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_mock_seed_defaults_to_zero() {
        let toml_content = r#"
[hardware]
driver = "rplidar"
scanner_port = "/dev/ttyUSB0"
scanner_baud = 115200
imu_port = "/dev/ttyS0"
imu_baud = 115200

[capture]
max_sweeps = 5
sweep_timeout_ms = 1000
output = "cloud.csv"

[height_log]
enabled = false
interval_secs = 5
sensor_timeout_ms = 500
output = "heights.csv"

[logging]
level = "info"
"#;
        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.hardware.mock_seed, 0);
        // Offset is opt-in for configs written before it existed
        assert_eq!(config.height_log.calibration_offset_cm, 0.0);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rigscan.toml");

        let config = AppConfig::field_defaults();
        config.to_file(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.hardware.scanner_port, config.hardware.scanner_port);
        assert_eq!(loaded.capture.max_sweeps, config.capture.max_sweeps);
    }
}
