#![forbid(unsafe_code)]

use tokenize::Tokenizer;
use tracing::warn;

use crate::encoder::{Encoder, Encoding};

/// One-hot token identity plus a relative position feature per slot.
///
/// Layout: `max_positions` blocks of `vocab_size + 1` values. In block `i`
/// the token's index is set to `1.0` (nothing for unknown tokens) and the
/// last value is `i / token_count`. Missing slots are zero; slots past
/// `max_positions` are dropped and counted in `Encoding::truncated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionalEncoder {
    /// number of token slots
    pub max_positions: usize,
}

impl PositionalEncoder {
    /// Encoder with `max_positions` slots.
    pub fn new(max_positions: usize) -> Self {
        Self { max_positions }
    }
}

impl Encoder for PositionalEncoder {
    fn encode(&self, tokenizer: &Tokenizer, text: &str) -> Encoding {
        let tokens = tokenizer.segment(text);
        let feature_size = tokenizer.vocab_size() + 1;
        let count = tokens.len();

        let mut values = vec![0.0_f64; count * feature_size];
        let mut unknown = 0usize;
        for (i, (token, block)) in tokens.iter().zip(values.chunks_mut(feature_size)).enumerate() {
            match tokenizer.index_of(token).and_then(|idx| block.get_mut(idx)) {
                Some(bit) => *bit = 1.0,
                None => unknown += 1,
            }
            if let Some(position) = block.last_mut() {
                *position = i as f64 / count as f64;
            }
        }

        let truncated = count.saturating_sub(self.max_positions);
        if truncated > 0 {
            warn!(
                tokens = count,
                max_positions = self.max_positions,
                dropped = truncated,
                "sentence exceeds positional slots, trailing tokens dropped"
            );
        }
        values.resize(self.output_len(tokenizer), 0.0);

        Encoding { values, truncated, unknown }
    }

    fn output_len(&self, tokenizer: &Tokenizer) -> usize {
        self.max_positions * (tokenizer.vocab_size() + 1)
    }
}
