//! Bounded point-cloud collection loop.
//!
//! Single-threaded, synchronous polling: the orientation sensor is read
//! once per sweep and that reading transforms every sample of the sweep.
//! The two devices are not hardware-synchronized, so a sweep and the
//! orientation used for it are only approximately time-aligned.

use crate::drivers::{OrientationSensor, RangeScanner};
use crate::error::{Error, Result};
use crate::poll::poll_deadline;
use crate::transform::polar_to_cartesian;
use crate::types::{Orientation, PointCloud};

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Collection window parameters
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Number of sweeps to accumulate before stopping
    pub max_sweeps: u32,
    /// How long to wait for the next sweep before giving up
    pub sweep_timeout: Duration,
    /// Sleep between scanner polls
    pub poll_interval: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_sweeps: 10,
            sweep_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Counters describing one collection window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Sweeps consumed
    pub sweeps: u32,
    /// Points that passed the range filter and entered the cloud
    pub points_kept: u64,
    /// Samples excluded for out-of-range / no-return distance
    pub points_rejected: u64,
    /// Sweeps transformed without an orientation reading
    pub degraded_sweeps: u32,
    /// True when the window was cut short by cancellation
    pub cancelled: bool,
}

/// A finished collection window: the cloud plus its acquisition counters
#[derive(Debug, Clone)]
pub struct CloudCapture {
    pub cloud: PointCloud,
    pub stats: CaptureStats,
}

enum SweepEvent {
    Scan(crate::types::SweepScan),
    Cancelled,
}

/// Accumulates polar sweeps into a rig-relative 3D point cloud.
///
/// Cancellation is cooperative: when the shared flag goes high the loop
/// stops and whatever points were accumulated so far are returned as a
/// valid (partial) capture.
pub struct CloudSampler {
    config: CaptureConfig,
}

impl CloudSampler {
    /// Create a sampler for the given window parameters
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Run one collection window.
    ///
    /// Starts the scanner, accumulates up to `max_sweeps` sweeps, and
    /// guarantees the scanner is stopped on every exit path, including
    /// errors and cancellation.
    pub fn collect(
        &self,
        scanner: &mut dyn RangeScanner,
        orientation: &mut dyn OrientationSensor,
        cancel: &AtomicBool,
    ) -> Result<CloudCapture> {
        scanner.start()?;
        let result = self.run(scanner, orientation, cancel);
        if let Err(e) = scanner.stop() {
            log::warn!("Scanner stop failed: {}", e);
        }
        result
    }

    fn run(
        &self,
        scanner: &mut dyn RangeScanner,
        orientation: &mut dyn OrientationSensor,
        cancel: &AtomicBool,
    ) -> Result<CloudCapture> {
        let mut cloud = PointCloud::new();
        let mut stats = CaptureStats::default();

        log::info!("Collecting {} sweeps...", self.config.max_sweeps);

        while stats.sweeps < self.config.max_sweeps {
            let event = poll_deadline(
                self.config.sweep_timeout,
                self.config.poll_interval,
                || {
                    if cancel.load(Ordering::Relaxed) {
                        return Ok(Some(SweepEvent::Cancelled));
                    }
                    Ok(scanner.get_scan()?.map(SweepEvent::Scan))
                },
            )?;

            let sweep = match event {
                Some(SweepEvent::Scan(sweep)) => sweep,
                Some(SweepEvent::Cancelled) => {
                    log::info!("Collection cancelled, keeping partial cloud");
                    stats.cancelled = true;
                    break;
                }
                // Scanner produced nothing for a whole deadline: that is a
                // device failure, not an empty sweep
                None => return Err(Error::Timeout),
            };

            // Latest available orientation, polled once per sweep
            let frame = match orientation.read()? {
                Some(o) => o,
                None => {
                    stats.degraded_sweeps += 1;
                    log::warn!(
                        "No orientation reading for sweep {}; using identity frame",
                        stats.sweeps
                    );
                    Orientation::identity()
                }
            };

            for sample in &sweep.samples {
                match polar_to_cartesian(sample, &frame) {
                    Some(point) => {
                        cloud.push(point);
                        stats.points_kept += 1;
                    }
                    None => stats.points_rejected += 1,
                }
            }

            stats.sweeps += 1;
            log::debug!(
                "Sweep {}/{}: {} samples, cloud at {} points",
                stats.sweeps,
                self.config.max_sweeps,
                sweep.len(),
                cloud.len()
            );
        }

        log::info!(
            "Capture done: {} sweeps, {} points kept, {} rejected, {} degraded sweeps",
            stats.sweeps,
            stats.points_kept,
            stats.points_rejected,
            stats.degraded_sweeps
        );

        Ok(CloudCapture { cloud, stats })
    }
}
