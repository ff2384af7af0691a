//! Target-duration sampling.
//!
//! Derives a simulated service time from a document's size by drawing
//! a per-byte work rate from a log-normal distribution. The rate's
//! mean and standard deviation are configured in linear space and
//! converted to log-space parameters with the standard moment-matching
//! identities.

use cls_common::WorkParams;
use rand::Rng;

/// Number of uniform draws averaged to approximate one standard-normal
/// sample. A deliberately simple central-limit approximation; see
/// [`standard_normal`].
const NORMAL_DRAWS: u32 = 50;

/// Samples a target duration, in milliseconds, for a given document
/// size. Log-space parameters are computed once at construction.
#[derive(Debug, Clone, Copy)]
pub struct DurationSampler {
    mu: f64,
    sigma: f64,
}

impl DurationSampler {
    /// Build a sampler from linear-space work-rate parameters.
    ///
    /// With mean `m` and standard deviation `s` (both ms per byte):
    /// `mu = ln(m^2 / sqrt(m^2 + s^2))`, `sigma = sqrt(ln(1 + s^2/m^2))`.
    pub fn new(params: &WorkParams) -> Self {
        let m = params.work_rate_ms;
        let s = params.work_sd_ms;
        let m2 = m * m;
        let s2 = s * s;
        Self {
            mu: (m2 / (m2 + s2).sqrt()).ln(),
            sigma: (1.0 + s2 / m2).ln().sqrt(),
        }
    }

    /// Draw one target duration for a document of `doc_len` bytes.
    ///
    /// Never negative; a zero-length document yields 0.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, doc_len: usize) -> u64 {
        let z = standard_normal(rng);
        let rate = (self.mu + z * self.sigma).exp();
        let target = (rate * doc_len as f64).round();
        if target.is_finite() && target > 0.0 {
            target as u64
        } else {
            0
        }
    }
}

/// Approximate standard-normal draw via the central limit theorem:
/// average [`NORMAL_DRAWS`] uniforms on [0,1) and rescale. The mean of
/// n uniforms has expectation 1/2 and variance 1/(12n), so
/// `(mean - 0.5) * sqrt(12n)` is approximately N(0, 1). Low fidelity
/// in the tails, which is acceptable for load generation.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut sum = 0.0;
    for _ in 0..NORMAL_DRAWS {
        sum += rng.gen::<f64>();
    }
    let mean = sum / f64::from(NORMAL_DRAWS);
    (mean - 0.5) * (12.0 * f64::from(NORMAL_DRAWS)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(rate: f64, sd: f64) -> WorkParams {
        WorkParams {
            work_rate_ms: rate,
            work_sd_ms: sd,
            ..WorkParams::default()
        }
    }

    #[test]
    fn zero_length_doc_yields_zero() {
        let sampler = DurationSampler::new(&params(5.0, 1.2));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sampler.sample(&mut rng, 0), 0);
    }

    #[test]
    fn zero_sd_degenerates_to_the_mean_rate() {
        let sampler = DurationSampler::new(&params(5.0, 0.0));
        let mut rng = StdRng::seed_from_u64(2);
        // sigma = 0, so every draw is exactly rate * len.
        for _ in 0..10 {
            assert_eq!(sampler.sample(&mut rng, 100), 500);
        }
    }

    #[test]
    fn mean_target_grows_with_doc_size() {
        let sampler = DurationSampler::new(&params(5.0, 1.2));
        let mut rng = StdRng::seed_from_u64(3);

        let mean_for = |rng: &mut StdRng, len: usize| -> f64 {
            let n = 2000;
            let total: u64 = (0..n).map(|_| sampler.sample(rng, len)).sum();
            total as f64 / n as f64
        };

        let small = mean_for(&mut rng, 100);
        let large = mean_for(&mut rng, 1000);
        assert!(
            large > small,
            "expected mean target to grow with size: {small} vs {large}"
        );
    }

    #[test]
    fn sampled_mean_approximates_configured_rate() {
        let sampler = DurationSampler::new(&params(5.0, 1.2));
        let mut rng = StdRng::seed_from_u64(4);

        let n = 5000;
        let total: u64 = (0..n).map(|_| sampler.sample(&mut rng, 100)).sum();
        let mean_rate = total as f64 / n as f64 / 100.0;

        // Log-normal with matched moments: the sample mean of the rate
        // should land near 5 ms/byte. Generous tolerance for the CLT
        // approximation and finite sample.
        assert!(
            (mean_rate - 5.0).abs() < 0.5,
            "mean rate {mean_rate} too far from 5.0"
        );
    }

    #[test]
    fn standard_normal_is_roughly_centered() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 10_000;
        let sum: f64 = (0..n).map(|_| standard_normal(&mut rng)).sum();
        let mean = sum / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean} not near zero");
    }
}
