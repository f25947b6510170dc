//! RigScan-IO - Sensor acquisition library for a field scanning rig
//!
//! This library reads a rotating range scanner and an inertial
//! orientation sensor, fuses each polar sweep with the latest rig
//! attitude into rig-relative 3D points, and accumulates a bounded
//! point cloud for export. A secondary mode periodically logs
//! single-beam height readings to CSV.

pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod poll;
pub mod recorder;
pub mod sampler;
pub mod transform;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
pub use sampler::{CaptureConfig, CaptureStats, CloudCapture, CloudSampler};
pub use transform::polar_to_cartesian;
pub use types::{Orientation, Point3D, PointCloud, PolarSample, SweepScan};
