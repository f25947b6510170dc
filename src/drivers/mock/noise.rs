//! Seeded noise source for simulated sensors

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

/// Gaussian noise source with deterministic seeding.
///
/// Seed 0 draws entropy from the OS; any other seed is reproducible.
#[derive(Clone)]
pub struct NoiseSource {
    rng: SmallRng,
}

impl NoiseSource {
    /// Create a new noise source
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Gaussian sample with the given standard deviation
    #[inline]
    pub fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * stddev
    }

    /// Returns true with the given probability
    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_reproducibility() {
        let mut a = NoiseSource::new(7);
        let mut b = NoiseSource::new(7);
        for _ in 0..50 {
            assert_eq!(a.gaussian(2.0), b.gaussian(2.0));
        }
    }

    #[test]
    fn test_zero_stddev_is_silent() {
        let mut noise = NoiseSource::new(7);
        for _ in 0..10 {
            assert_eq!(noise.gaussian(0.0), 0.0);
        }
    }
}
