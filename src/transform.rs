//! Polar-to-Cartesian coordinate transform with orientation compensation.
//!
//! The scanner sweeps in its own horizontal plane and reports polar
//! samples; the inertial sensor reports the rig's attitude. The transform
//! places each sample in the rig-relative Cartesian frame using the
//! tilt-compensated model: the sweep plane is rotated by yaw, then tilted
//! uniformly by pitch. Roll is assumed negligible for the rig's mounting.

use crate::types::{Orientation, Point3D, PolarSample};

/// Convert one polar sample to a rig-relative 3D point, in centimeters.
///
/// Returns `None` for out-of-range or no-return readings
/// (`distance_mm <= 0`, NaN, infinite); those samples are excluded from
/// the cloud rather than zeroed or raised as errors.
///
/// ```
/// use rigscan_io::transform::polar_to_cartesian;
/// use rigscan_io::types::{Orientation, PolarSample};
///
/// let sample = PolarSample::new(0.0, 100.0, 255);
/// let p = polar_to_cartesian(&sample, &Orientation::identity()).unwrap();
/// assert!((p.x - 10.0).abs() < 1e-5);
/// assert!(p.y.abs() < 1e-5);
/// assert!(p.z.abs() < 1e-5);
/// ```
#[inline]
pub fn polar_to_cartesian(sample: &PolarSample, orientation: &Orientation) -> Option<Point3D> {
    if !sample.is_valid() {
        return None;
    }

    let distance_cm = sample.distance_mm * 0.1;
    let angle_rad = (sample.angle_deg + orientation.yaw_deg).to_radians();
    let pitch_rad = orientation.pitch_deg.to_radians();

    let (sin_a, cos_a) = angle_rad.sin_cos();
    let (sin_p, cos_p) = pitch_rad.sin_cos();

    Some(Point3D::new(
        distance_cm * cos_a * cos_p,
        distance_cm * sin_a * cos_p,
        distance_cm * sin_p,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const D_MM: f32 = 1500.0;
    const D_CM: f32 = 150.0;

    fn sample_at(angle_deg: f32) -> PolarSample {
        PolarSample::new(angle_deg, D_MM, 200)
    }

    #[test]
    fn test_invalid_distances_excluded() {
        let orientation = Orientation::identity();
        for d in [0.0, -1.0, -250.0, f32::NAN, f32::INFINITY] {
            let sample = PolarSample::new(45.0, d, 100);
            assert!(polar_to_cartesian(&sample, &orientation).is_none());
        }
    }

    #[test]
    fn test_identity_forward() {
        let p = polar_to_cartesian(&sample_at(0.0), &Orientation::identity()).unwrap();
        assert_relative_eq!(p.x, D_CM, epsilon = 1e-4);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_identity_left() {
        let p = polar_to_cartesian(&sample_at(90.0), &Orientation::identity()).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, D_CM, epsilon = 1e-3);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_yaw_rotates_sweep_plane() {
        let orientation = Orientation::new(90.0, 0.0, 0.0);
        let p = polar_to_cartesian(&sample_at(0.0), &orientation).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, D_CM, epsilon = 1e-3);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_full_pitch_points_up() {
        let orientation = Orientation::new(0.0, 90.0, 0.0);
        let p = polar_to_cartesian(&sample_at(0.0), &orientation).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(p.z, D_CM, epsilon = 1e-3);
    }

    #[test]
    fn test_norm_recovers_distance() {
        let cases = [
            (0.0, 0.0, 0.0),
            (33.0, 12.0, 0.0),
            (123.4, -45.0, 60.0),
            (359.9, 180.0, -30.0),
        ];
        for (angle, yaw, pitch) in cases {
            let orientation = Orientation::new(yaw, pitch, 0.0);
            let p = polar_to_cartesian(&sample_at(angle), &orientation).unwrap();
            assert_relative_eq!(p.norm(), D_CM, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_roll_does_not_affect_result() {
        // The tilt-compensated model ignores roll by construction.
        let level = Orientation::new(10.0, 20.0, 0.0);
        let rolled = Orientation::new(10.0, 20.0, 75.0);
        let a = polar_to_cartesian(&sample_at(40.0), &level).unwrap();
        let b = polar_to_cartesian(&sample_at(40.0), &rolled).unwrap();
        assert_eq!(a, b);
    }
}
