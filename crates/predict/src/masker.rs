#![forbid(unsafe_code)]

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::make_rng;
use crate::PredictError;

/// A training pair: context holding the mask marker, and the unit it hides.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    /// sentence with one unit replaced by the marker
    pub context: String,
    /// the replaced unit
    pub answer: String,
}

impl Sample {
    /// Pair a context with its answer.
    pub fn new(context: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { context: context.into(), answer: answer.into() }
    }
}

/// Replaces one space-separated unit per sentence with a mask marker.
///
/// The generator is seeded once; the same seed and the same sequence of
/// sentences always give the same masks.
pub struct SentenceMasker {
    rng: ChaCha8Rng,
    mask_token: String,
}

impl SentenceMasker {
    /// Masker drawing from a generator seeded with `seed`.
    pub fn new(seed: u64, mask_token: impl Into<String>) -> Self {
        Self { rng: make_rng(seed), mask_token: mask_token.into() }
    }

    /// The marker written into masked sentences.
    pub fn mask_token(&self) -> &str {
        &self.mask_token
    }

    /// Mask one uniformly chosen unit of `text`.
    ///
    /// Units are split on single spaces; trailing empty units are dropped.
    pub fn mask(&mut self, text: &str) -> Result<Sample, PredictError> {
        let mut units: Vec<&str> = text.split(' ').collect();
        while units.last().is_some_and(|u| u.is_empty()) {
            units.pop();
        }
        if units.is_empty() {
            return Err(PredictError::EmptySentence);
        }

        let index = self.rng.gen_range(0..units.len());
        let slot = units.get_mut(index).ok_or(PredictError::EmptySentence)?;
        let answer = std::mem::replace(slot, self.mask_token.as_str()).to_string();
        Ok(Sample { context: units.join(" "), answer })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_masks() {
        let sentences = ["a b c d", "the sun is shining", "a b c d"];
        let run = |seed| {
            let mut m = SentenceMasker::new(seed, "MASK");
            sentences.iter().map(|s| m.mask(s).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn exactly_one_unit_is_replaced() {
        let mut m = SentenceMasker::new(1, "MASK");
        for _ in 0..50 {
            let sample = m.mask("a b c d").unwrap();
            let units: Vec<&str> = sample.context.split(' ').collect();
            assert_eq!(units.len(), 4);
            assert_eq!(units.iter().filter(|u| **u == "MASK").count(), 1);
            let pos = units.iter().position(|u| *u == "MASK").unwrap();
            assert_eq!(["a", "b", "c", "d"][pos], sample.answer);
        }
    }

    #[test]
    fn single_unit_masks_everything() {
        let mut m = SentenceMasker::new(3, "MASK");
        assert_eq!(m.mask_token(), "MASK");
        assert_eq!(m.mask("hello").unwrap(), Sample::new("MASK", "hello"));
    }

    #[test]
    fn every_position_is_reachable() {
        let mut m = SentenceMasker::new(5, "MASK");
        let mut seen = [false; 4];
        for _ in 0..200 {
            let s = m.mask("a b c d").unwrap();
            let pos = ["a", "b", "c", "d"].iter().position(|u| *u == s.answer).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn trailing_spaces_are_ignored_and_empty_is_rejected() {
        let mut m = SentenceMasker::new(0, "MASK");
        let s = m.mask("x y ").unwrap();
        assert_eq!(s.context.split(' ').count(), 2);
        assert!(matches!(m.mask(""), Err(PredictError::EmptySentence)));
        assert!(matches!(m.mask("   "), Err(PredictError::EmptySentence)));
    }
}
