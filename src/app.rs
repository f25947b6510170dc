//! Application orchestration for the RigScan-IO daemon
//!
//! Opens the rig devices from configuration, runs one point-cloud
//! collection window, exports the result, and optionally runs the
//! periodic height logger — with graceful shutdown on SIGINT/SIGTERM.

use crate::config::AppConfig;
use crate::drivers::create_devices;
use crate::error::Result;
use crate::recorder::{export_cloud_csv, HeightLogger};
use crate::sampler::{CaptureConfig, CloudSampler};

use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Main application: owns the shutdown flag and the configured run plan
pub struct RigApp {
    config: AppConfig,
    shutdown: Arc<AtomicBool>,
}

impl RigApp {
    /// Create new RigApp instance
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run the configured acquisition plan.
    ///
    /// Devices are acquired here and stopped on every exit path: the
    /// sampler guarantees the scanner is stopped even when collection
    /// fails or is interrupted.
    pub fn run(&self) -> Result<()> {
        self.setup_signal_handler();

        info!(
            "Opening devices (driver: {})",
            self.config.hardware.driver
        );
        let mut devices = create_devices(&self.config.hardware)?;

        let capture_config = CaptureConfig {
            max_sweeps: self.config.capture.max_sweeps,
            sweep_timeout: Duration::from_millis(self.config.capture.sweep_timeout_ms),
            poll_interval: Duration::from_millis(10),
        };

        let sampler = CloudSampler::new(capture_config);
        let capture = sampler.collect(
            devices.scanner.as_mut(),
            devices.orientation.as_mut(),
            &self.shutdown,
        )?;

        if capture.stats.degraded_sweeps > 0 {
            warn!(
                "{} of {} sweeps collected without orientation",
                capture.stats.degraded_sweeps, capture.stats.sweeps
            );
        }
        export_cloud_csv(&capture.cloud, &self.config.capture.output)?;

        if self.config.height_log.enabled && !self.shutdown.load(Ordering::Relaxed) {
            match devices.rangefinder.as_mut() {
                Some(rangefinder) => {
                    let logger = HeightLogger::new(
                        Duration::from_secs(self.config.height_log.interval_secs),
                        Duration::from_millis(self.config.height_log.sensor_timeout_ms),
                        self.config.height_log.calibration_offset_cm,
                    );
                    logger.run(
                        rangefinder.as_mut(),
                        &self.config.height_log.output,
                        &self.shutdown,
                    )?;
                }
                None => warn!("Height log enabled but no rangefinder in this device set"),
            }
        }

        Ok(())
    }

    /// Setup signal handler for graceful shutdown
    fn setup_signal_handler(&self) {
        let shutdown = Arc::clone(&self.shutdown);

        std::thread::Builder::new()
            .name("signal-handler".to_string())
            .spawn(move || {
                let mut signals =
                    Signals::new([SIGINT, SIGTERM]).expect("Failed to register signal handlers");

                if let Some(sig) = signals.forever().next() {
                    info!("Received signal {:?}, finishing with partial results...", sig);
                    shutdown.store(true, Ordering::Relaxed);
                }
            })
            .expect("Failed to spawn signal handler thread");
    }
}
