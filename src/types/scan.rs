//! Polar scan types

/// A single polar range measurement from the rotating scanner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarSample {
    /// Angle in degrees (0 to 360, scanner frame)
    pub angle_deg: f32,
    /// Distance in millimeters; zero or negative means no return
    pub distance_mm: f32,
    /// Signal quality/intensity (0-255)
    pub quality: u8,
}

impl PolarSample {
    /// Create new polar sample
    pub fn new(angle_deg: f32, distance_mm: f32, quality: u8) -> Self {
        Self {
            angle_deg,
            distance_mm,
            quality,
        }
    }

    /// A sample is usable only with a finite, strictly positive distance.
    ///
    /// Out-of-range and no-return readings are reported by the scanner
    /// as distance zero (or negative on some firmwares).
    pub fn is_valid(&self) -> bool {
        self.distance_mm.is_finite() && self.distance_mm > 0.0
    }
}

/// One revolution's worth of polar samples
#[derive(Debug, Clone, PartialEq)]
pub struct SweepScan {
    /// Measurement samples in sweep order
    pub samples: Vec<PolarSample>,
    /// Sweep timestamp in milliseconds (if available)
    pub timestamp_ms: Option<u64>,
}

impl SweepScan {
    /// Create a new empty sweep
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            timestamp_ms: None,
        }
    }

    /// Create sweep with capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            timestamp_ms: None,
        }
    }

    /// Build a sweep from raw (angle_deg, distance_mm, quality) triples
    pub fn from_triples(triples: &[(f32, f32, u8)]) -> Self {
        Self {
            samples: triples
                .iter()
                .map(|&(a, d, q)| PolarSample::new(a, d, q))
                .collect(),
            timestamp_ms: None,
        }
    }

    /// Add a sample to the sweep
    pub fn push(&mut self, sample: PolarSample) {
        self.samples.push(sample);
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if sweep is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over usable samples only
    pub fn iter_valid(&self) -> impl Iterator<Item = &PolarSample> {
        self.samples.iter().filter(|s| s.is_valid())
    }

    /// Count usable samples
    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_valid()).count()
    }
}

impl Default for SweepScan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_validity() {
        assert!(PolarSample::new(0.0, 100.0, 47).is_valid());
        assert!(!PolarSample::new(0.0, 0.0, 47).is_valid());
        assert!(!PolarSample::new(0.0, -5.0, 47).is_valid());
        assert!(!PolarSample::new(0.0, f32::NAN, 47).is_valid());
        assert!(!PolarSample::new(0.0, f32::INFINITY, 47).is_valid());
    }

    #[test]
    fn test_sweep_valid_count() {
        let sweep = SweepScan::from_triples(&[
            (0.0, 1000.0, 200),
            (90.0, 0.0, 0),
            (180.0, 2500.0, 180),
            (270.0, -1.0, 0),
        ]);

        assert_eq!(sweep.len(), 4);
        assert_eq!(sweep.valid_count(), 2);

        let valid: Vec<_> = sweep.iter_valid().collect();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].angle_deg, 0.0);
        assert_eq!(valid[1].angle_deg, 180.0);
    }

    #[test]
    fn test_empty_sweep() {
        let sweep = SweepScan::new();
        assert!(sweep.is_empty());
        assert_eq!(sweep.valid_count(), 0);
    }
}
