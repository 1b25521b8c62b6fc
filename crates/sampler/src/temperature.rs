//! Temperature-scaled categorical sampling.
//!
//! Each probability `p` is reweighted to `p^(1/t)` and renormalized. Low
//! temperatures sharpen the distribution toward its mode, high temperatures
//! flatten it toward uniform.

use rand::Rng;

use crate::{greedy, validate, SampleError};

/// Reweight `probabilities` by `1/temperature` and renormalize.
///
/// Returns `None` when every reweighted value is zero (or the sum is not
/// finite), in which case there is nothing to normalize.
pub fn reweight(probabilities: &[f64], temperature: f64) -> Option<Vec<f64>> {
    let exponent = 1.0 / temperature;
    let mut weights: Vec<f64> = probabilities.iter().map(|p| p.powf(exponent)).collect();
    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }
    for w in weights.iter_mut() {
        *w /= sum;
    }
    Some(weights)
}

/// Draw an index from the reweighted distribution.
///
/// Walks the cumulative sum in index order and returns the first index whose
/// cumulative probability reaches the uniform draw. Zero-weight entries are
/// skipped, so a draw of exactly `0.0` cannot select them. Rounding that
/// leaves the total short of the draw, or a degenerate distribution, falls
/// back to the arg-max of the input.
pub fn sample<R: Rng + ?Sized>(
    probabilities: &[f64],
    temperature: f64,
    rng: &mut R,
) -> Result<usize, SampleError> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(SampleError::InvalidTemperature(temperature));
    }
    validate(probabilities)?;
    let fallback = greedy::argmax(probabilities).ok_or(SampleError::EmptyDistribution)?;

    let weights = match reweight(probabilities, temperature) {
        Some(w) => w,
        None => return Ok(fallback),
    };

    let draw: f64 = rng.gen();
    let mut cumulative = 0.0_f64;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if *w > 0.0 && draw <= cumulative {
            return Ok(i);
        }
    }
    Ok(fallback)
}
