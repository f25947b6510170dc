//! Mock rig sensors for hardware-free operation and tests.
//!
//! The mock scanner either replays a scripted list of sweeps
//! (deterministic tests) or synthesizes a circular room with seeded
//! Gaussian range noise and a miss rate, so the acquisition path sees
//! the same mix of valid and no-return samples real hardware produces.

mod noise;

use crate::drivers::{OrientationSensor, RangeFinder, RangeScanner};
use crate::error::Result;
use crate::types::{Orientation, PolarSample, SweepScan};

pub use noise::NoiseSource;

/// Samples per synthetic revolution
const SYNTHETIC_SAMPLES: usize = 360;
/// Synthetic room radius in millimeters
const SYNTHETIC_RANGE_MM: f32 = 2500.0;
/// Range noise standard deviation in millimeters
const SYNTHETIC_RANGE_STDDEV_MM: f32 = 10.0;
/// Probability of a no-return reading per sample
const SYNTHETIC_MISS_RATE: f32 = 0.02;

enum ScanSource {
    /// Fixed list of sweeps, then exhausted
    Script(Vec<SweepScan>),
    /// Endless synthetic sweeps
    Synthetic(NoiseSource),
}

/// Mock rotating range scanner
pub struct MockScanner {
    source: ScanSource,
    cursor: usize,
    scanning: bool,
}

impl MockScanner {
    /// Replay the given sweeps in order, then return `None`
    pub fn scripted(sweeps: Vec<SweepScan>) -> Self {
        Self {
            source: ScanSource::Script(sweeps),
            cursor: 0,
            scanning: false,
        }
    }

    /// Endless synthetic circular-room sweeps with seeded noise
    pub fn synthetic(seed: u64) -> Self {
        Self {
            source: ScanSource::Synthetic(NoiseSource::new(seed)),
            cursor: 0,
            scanning: false,
        }
    }

    fn generate_sweep(noise: &mut NoiseSource) -> SweepScan {
        let mut sweep = SweepScan::with_capacity(SYNTHETIC_SAMPLES);
        let step = 360.0 / SYNTHETIC_SAMPLES as f32;
        for i in 0..SYNTHETIC_SAMPLES {
            let angle_deg = i as f32 * step;
            if noise.chance(SYNTHETIC_MISS_RATE) {
                // No-return reading, reported as distance zero
                sweep.push(PolarSample::new(angle_deg, 0.0, 0));
            } else {
                let distance = SYNTHETIC_RANGE_MM + noise.gaussian(SYNTHETIC_RANGE_STDDEV_MM);
                sweep.push(PolarSample::new(angle_deg, distance.max(1.0), 200));
            }
        }
        sweep
    }
}

impl RangeScanner for MockScanner {
    fn start(&mut self) -> Result<()> {
        self.scanning = true;
        Ok(())
    }

    fn get_scan(&mut self) -> Result<Option<SweepScan>> {
        if !self.scanning {
            return Ok(None);
        }
        match &mut self.source {
            ScanSource::Script(sweeps) => {
                if self.cursor < sweeps.len() {
                    let sweep = sweeps[self.cursor].clone();
                    self.cursor += 1;
                    Ok(Some(sweep))
                } else {
                    Ok(None)
                }
            }
            ScanSource::Synthetic(noise) => Ok(Some(Self::generate_sweep(noise))),
        }
    }

    fn stop(&mut self) -> Result<()> {
        self.scanning = false;
        Ok(())
    }

    fn is_scanning(&self) -> bool {
        self.scanning
    }
}

/// Mock orientation sensor
pub struct MockOrientationSensor {
    readings: Vec<Option<Orientation>>,
    cursor: usize,
}

impl MockOrientationSensor {
    /// Always report the same orientation
    pub fn fixed(orientation: Orientation) -> Self {
        Self {
            readings: vec![Some(orientation)],
            cursor: 0,
        }
    }

    /// Replay a script of readings (absent entries included); the last
    /// entry repeats once the script is exhausted
    pub fn scripted(readings: Vec<Option<Orientation>>) -> Self {
        Self {
            readings,
            cursor: 0,
        }
    }
}

impl OrientationSensor for MockOrientationSensor {
    fn read(&mut self) -> Result<Option<Orientation>> {
        if self.readings.is_empty() {
            return Ok(None);
        }
        let index = self.cursor.min(self.readings.len() - 1);
        self.cursor += 1;
        Ok(self.readings[index])
    }
}

/// Mock time-of-flight rangefinder reporting a noisy constant height
pub struct MockRangeFinder {
    height_cm: f32,
    noise: NoiseSource,
}

impl MockRangeFinder {
    /// Create a rangefinder centered on `height_cm`
    pub fn new(height_cm: f32, seed: u64) -> Self {
        Self {
            height_cm,
            noise: NoiseSource::new(seed),
        }
    }
}

impl RangeFinder for MockRangeFinder {
    fn read_distance_cm(&mut self) -> Result<Option<f32>> {
        Ok(Some(self.height_cm + self.noise.gaussian(0.2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_scanner_replays_then_ends() {
        let sweeps = vec![
            SweepScan::from_triples(&[(0.0, 1000.0, 10)]),
            SweepScan::from_triples(&[(180.0, 2000.0, 10)]),
        ];
        let mut scanner = MockScanner::scripted(sweeps);

        assert!(scanner.get_scan().unwrap().is_none()); // not started
        scanner.start().unwrap();

        assert_eq!(scanner.get_scan().unwrap().unwrap().len(), 1);
        let second = scanner.get_scan().unwrap().unwrap();
        assert_eq!(second.samples[0].angle_deg, 180.0);
        assert!(scanner.get_scan().unwrap().is_none());
    }

    #[test]
    fn test_synthetic_sweeps_have_misses() {
        let mut scanner = MockScanner::synthetic(42);
        scanner.start().unwrap();

        let sweep = scanner.get_scan().unwrap().unwrap();
        assert_eq!(sweep.len(), SYNTHETIC_SAMPLES);
        // 2% miss rate over 360 samples should leave some invalid readings
        assert!(sweep.valid_count() < sweep.len());
        assert!(sweep.valid_count() > SYNTHETIC_SAMPLES / 2);
    }

    #[test]
    fn test_scripted_orientation_repeats_last() {
        let mut sensor = MockOrientationSensor::scripted(vec![
            None,
            Some(Orientation::new(90.0, 0.0, 0.0)),
        ]);

        assert!(sensor.read().unwrap().is_none());
        assert_eq!(sensor.read().unwrap().unwrap().yaw_deg, 90.0);
        assert_eq!(sensor.read().unwrap().unwrap().yaw_deg, 90.0);
    }

    #[test]
    fn test_rangefinder_near_height() {
        let mut tof = MockRangeFinder::new(120.0, 7);
        for _ in 0..20 {
            let d = tof.read_distance_cm().unwrap().unwrap();
            assert!((d - 120.0).abs() < 2.0);
        }
    }
}
