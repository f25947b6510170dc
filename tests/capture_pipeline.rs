//! End-to-end capture tests: mock devices through the sampler to the
//! CSV consumer.

use rigscan_io::drivers::mock::{MockOrientationSensor, MockScanner};
use rigscan_io::recorder::export_cloud_csv;
use rigscan_io::sampler::{CaptureConfig, CloudSampler};
use rigscan_io::types::{Orientation, SweepScan};

use approx::assert_relative_eq;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

fn quick_config(max_sweeps: u32) -> CaptureConfig {
    CaptureConfig {
        max_sweeps,
        sweep_timeout: Duration::from_millis(100),
        poll_interval: Duration::from_millis(1),
    }
}

#[test]
fn test_cross_sweep_to_csv() {
    // Four beams at the compass points, 100mm each, rig level.
    let sweep = SweepScan::from_triples(&[
        (0.0, 100.0, 200),
        (90.0, 100.0, 200),
        (180.0, 100.0, 200),
        (270.0, 100.0, 200),
    ]);
    let mut scanner = MockScanner::scripted(vec![sweep]);
    let mut imu = MockOrientationSensor::fixed(Orientation::identity());
    let cancel = AtomicBool::new(false);

    let capture = CloudSampler::new(quick_config(1))
        .collect(&mut scanner, &mut imu, &cancel)
        .unwrap();

    assert_eq!(capture.cloud.len(), 4);
    for p in capture.cloud.iter() {
        assert_relative_eq!(p.norm(), 10.0, epsilon = 1e-3);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-4);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloud.csv");
    export_cloud_csv(&capture.cloud, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 5); // header + 4 points
    assert_eq!(lines[0], "x,y,z");
}

#[test]
fn test_pitched_rig_lifts_the_cloud() {
    let sweep = SweepScan::from_triples(&[(0.0, 1000.0, 200), (180.0, 1000.0, 200)]);
    let mut scanner = MockScanner::scripted(vec![sweep]);
    let mut imu = MockOrientationSensor::fixed(Orientation::new(0.0, 30.0, 0.0));
    let cancel = AtomicBool::new(false);

    let capture = CloudSampler::new(quick_config(1))
        .collect(&mut scanner, &mut imu, &cancel)
        .unwrap();

    // 100cm beams tilted 30 degrees out of the horizontal plane
    let expected_z = 100.0 * 30.0_f32.to_radians().sin();
    for p in capture.cloud.iter() {
        assert_relative_eq!(p.z, expected_z, epsilon = 1e-3);
        assert_relative_eq!(p.norm(), 100.0, epsilon = 1e-2);
    }
}

#[test]
fn test_synthetic_window_fills_cloud() {
    // The synthetic scanner emulates a circular room at 2.5m with a small
    // miss rate; a full window should keep most samples and reject the rest.
    let mut scanner = MockScanner::synthetic(42);
    let mut imu = MockOrientationSensor::fixed(Orientation::identity());
    let cancel = AtomicBool::new(false);

    let capture = CloudSampler::new(quick_config(5))
        .collect(&mut scanner, &mut imu, &cancel)
        .unwrap();

    assert_eq!(capture.stats.sweeps, 5);
    assert!(capture.stats.points_rejected > 0);
    assert!(capture.stats.points_kept > 1500);
    assert_eq!(
        capture.cloud.len() as u64,
        capture.stats.points_kept
    );

    // Every kept point sits near the synthetic room radius (250cm)
    for p in capture.cloud.iter() {
        assert!((p.norm() - 250.0).abs() < 10.0, "norm {}", p.norm());
    }
}

#[test]
fn test_orientation_dropouts_are_survivable() {
    let sweeps = vec![SweepScan::from_triples(&[(0.0, 500.0, 150)]); 4];
    let mut scanner = MockScanner::scripted(sweeps);
    let mut imu = MockOrientationSensor::scripted(vec![
        Some(Orientation::identity()),
        None,
        None,
        Some(Orientation::new(45.0, 0.0, 0.0)),
    ]);
    let cancel = AtomicBool::new(false);

    let capture = CloudSampler::new(quick_config(4))
        .collect(&mut scanner, &mut imu, &cancel)
        .unwrap();

    assert_eq!(capture.stats.sweeps, 4);
    assert_eq!(capture.stats.degraded_sweeps, 2);
    assert_eq!(capture.cloud.len(), 4);
}
