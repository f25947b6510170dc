//! Rig orientation types

/// Instantaneous yaw/pitch/roll estimate of the rig from the inertial sensor.
///
/// All angles in degrees, following the fusion sensor's Euler output
/// convention (heading/yaw, roll, pitch). An absent reading is expressed
/// as `Option<Orientation>` at the driver boundary; the zero orientation
/// here is the identity, not a "no data" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Heading/yaw in degrees
    pub yaw_deg: f32,
    /// Pitch in degrees
    pub pitch_deg: f32,
    /// Roll in degrees
    pub roll_deg: f32,
}

impl Orientation {
    /// Create new orientation
    pub fn new(yaw_deg: f32, pitch_deg: f32, roll_deg: f32) -> Self {
        Self {
            yaw_deg,
            pitch_deg,
            roll_deg,
        }
    }

    /// Identity orientation (rig level, facing forward)
    pub fn identity() -> Self {
        Self {
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}
