#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]

//! Token sampling strategies: greedy (arg-max) and temperature.
//!
//! Randomness always comes from a caller-supplied `rand::Rng`, so a seeded
//! generator gives reproducible draws.

pub mod greedy;
pub mod temperature;

use rand::Rng;

/// Error type for sampling
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// No probabilities were supplied
    #[error("empty probability distribution")]
    EmptyDistribution,
    /// Temperature must be finite and strictly positive
    #[error("invalid temperature {0}")]
    InvalidTemperature(f64),
    /// Probabilities must be finite and non-negative
    #[error("invalid probability {value} at index {index}")]
    InvalidProbability {
        /// position of the offending entry
        index: usize,
        /// offending value
        value: f64,
    },
}

/// Pick an index from `probabilities`.
///
/// A temperature of exactly `1.0` returns the arg-max without drawing;
/// any other temperature reweights and draws through
/// [`temperature::sample`]. Callers relying on stochastic output at the
/// unscaled distribution should call `temperature::sample` directly.
pub fn sample<R: Rng + ?Sized>(
    probabilities: &[f64],
    temperature: f64,
    rng: &mut R,
) -> Result<usize, SampleError> {
    if temperature == 1.0 {
        validate(probabilities)?;
        return greedy::argmax(probabilities).ok_or(SampleError::EmptyDistribution);
    }
    temperature::sample(probabilities, temperature, rng)
}

pub(crate) fn validate(probabilities: &[f64]) -> Result<(), SampleError> {
    if probabilities.is_empty() {
        return Err(SampleError::EmptyDistribution);
    }
    match probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        Some((index, &value)) => Err(SampleError::InvalidProbability { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn unit_temperature_is_argmax() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sample(&[0.1, 0.7, 0.2], 1.0, &mut rng), Ok(1));
        }
    }

    #[test]
    fn rejects_bad_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(sample(&[], 1.0, &mut rng), Err(SampleError::EmptyDistribution));
        assert_eq!(sample(&[], 0.5, &mut rng), Err(SampleError::EmptyDistribution));
        assert_eq!(
            sample(&[0.5, -0.1], 1.0, &mut rng),
            Err(SampleError::InvalidProbability { index: 1, value: -0.1 })
        );
        assert_eq!(
            sample(&[0.5, 0.5], 0.0, &mut rng),
            Err(SampleError::InvalidTemperature(0.0))
        );
    }
}
