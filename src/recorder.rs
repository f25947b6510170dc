//! File consumers for captured data: point-cloud export and the
//! periodic height log.

use crate::drivers::RangeFinder;
use crate::error::Result;
use crate::poll::poll_deadline;
use crate::types::PointCloud;

use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// One row of the height log
#[derive(Debug, Serialize)]
struct HeightRecord {
    timestamp: u64,
    height_cm: f32,
}

/// Write a finished point cloud as CSV rows of `x,y,z` (centimeters).
///
/// The cloud is a finished sequence by the time it reaches this consumer;
/// how it was collected is not this module's concern.
pub fn export_cloud_csv<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for point in cloud.iter() {
        writer.serialize(point)?;
    }
    writer.flush()?;
    log::info!(
        "Exported {} points to {}",
        cloud.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Periodic single-beam height sampler.
///
/// Every `interval` the rangefinder is polled with a bounded deadline;
/// a reading is appended to the CSV log, a missed deadline is logged and
/// skipped. Cancellation mid-run leaves a valid partial log.
///
/// The calibration offset is subtracted from every reading before it is
/// written, correcting for the sensor sitting recessed above the rig
/// baseplate.
pub struct HeightLogger {
    /// Time between samples
    pub interval: Duration,
    /// How long to wait for the sensor each cycle
    pub sensor_timeout: Duration,
    /// Sleep between sensor polls
    pub poll_interval: Duration,
    /// Subtracted from every raw reading, in centimeters
    pub calibration_offset_cm: f32,
}

impl HeightLogger {
    /// Create a logger sampling every `interval`
    pub fn new(interval: Duration, sensor_timeout: Duration, calibration_offset_cm: f32) -> Self {
        Self {
            interval,
            sensor_timeout,
            poll_interval: Duration::from_millis(10),
            calibration_offset_cm,
        }
    }

    /// Run the sampling loop until cancelled, appending to `path`.
    ///
    /// The header row is written only when the file is empty, so repeated
    /// runs keep appending to one log. Returns the number of records
    /// written.
    pub fn run<P: AsRef<Path>>(
        &self,
        rangefinder: &mut dyn RangeFinder,
        path: P,
        cancel: &AtomicBool,
    ) -> Result<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer.write_record(["timestamp", "height_cm"])?;
        }

        log::info!(
            "Height log started: every {:?} to {}",
            self.interval,
            path.as_ref().display()
        );

        let mut records = 0;
        while !cancel.load(Ordering::Relaxed) {
            let cycle_start = Instant::now();

            match poll_deadline(self.sensor_timeout, self.poll_interval, || {
                rangefinder.read_distance_cm()
            })? {
                Some(raw_cm) => {
                    let record = HeightRecord {
                        timestamp: unix_seconds(),
                        height_cm: raw_cm - self.calibration_offset_cm,
                    };
                    writer.serialize(&record)?;
                    writer.flush()?;
                    records += 1;
                    log::debug!("Height: {:.1} cm at {}", record.height_cm, record.timestamp);
                }
                None => log::warn!("No rangefinder reading within deadline, skipping cycle"),
            }

            self.sleep_remaining(cycle_start, cancel);
        }

        log::info!("Height log stopped after {} records", records);
        Ok(records)
    }

    /// Sleep out the rest of the cycle in short slices so cancellation
    /// stays responsive
    fn sleep_remaining(&self, cycle_start: Instant, cancel: &AtomicBool) {
        loop {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let elapsed = cycle_start.elapsed();
            if elapsed >= self.interval {
                return;
            }
            let remaining = self.interval - elapsed;
            std::thread::sleep(remaining.min(Duration::from_millis(50)));
        }
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
