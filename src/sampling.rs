//! Normal-distribution sampling.
//!
//! `rand` 0.8 ships no normal distribution without `rand_distr`, so the
//! generator draws its Gaussian samples through a small Box-Muller helper.

use rand::distributions::Open01;
use rand::Rng;
use std::f32::consts::TAU;

/// Draw one sample from `N(mean, stddev²)`.
///
/// Uses the Box-Muller transform on two uniforms from the open interval
/// `(0, 1)`. Only the cosine branch is returned; the paired sine sample is
/// discarded.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use stardust::sampling::gaussian;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let x = gaussian(&mut rng, 0.0, 1.0);
/// assert!(x.is_finite());
/// ```
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f32, stddev: f32) -> f32 {
    // Open01 keeps u1 away from 0 so the log stays finite.
    let u1: f32 = rng.sample(Open01);
    let u2: f32 = rng.sample(Open01);
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    mean + z * stddev
}

/// [`gaussian`] using the thread-local RNG.
///
/// Not reproducible between runs. Prefer [`gaussian`] with a seeded RNG
/// anywhere determinism matters.
pub fn gaussian_random(mean: f32, stddev: f32) -> f32 {
    gaussian(&mut rand::thread_rng(), mean, stddev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn moments(samples: &[f32]) -> (f32, f32) {
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&x| x as f64).sum::<f64>() / n;
        let var = samples
            .iter()
            .map(|&x| (x as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        (mean as f32, var.sqrt() as f32)
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = SmallRng::seed_from_u64(42);
        let samples: Vec<f32> = (0..100_000).map(|_| gaussian(&mut rng, 0.0, 1.0)).collect();
        let (mean, stddev) = moments(&samples);
        assert!(mean.abs() < 0.02, "mean was {}", mean);
        assert!((stddev - 1.0).abs() < 0.02, "stddev was {}", stddev);
    }

    #[test]
    fn test_shifted_and_scaled() {
        let mut rng = SmallRng::seed_from_u64(3);
        let samples: Vec<f32> = (0..50_000).map(|_| gaussian(&mut rng, 5.0, 0.8)).collect();
        let (mean, stddev) = moments(&samples);
        assert!((mean - 5.0).abs() < 0.02, "mean was {}", mean);
        assert!((stddev - 0.8).abs() < 0.02, "stddev was {}", stddev);
    }

    #[test]
    fn test_samples_are_finite() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..10_000 {
            assert!(gaussian(&mut rng, 0.0, 1.0).is_finite());
        }
    }

    #[test]
    fn test_zero_stddev_returns_mean() {
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(gaussian(&mut rng, 2.5, 0.0), 2.5);
    }

    #[test]
    fn test_thread_rng_variant() {
        assert!(gaussian_random(0.0, 1.0).is_finite());
    }
}
