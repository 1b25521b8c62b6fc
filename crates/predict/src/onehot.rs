#![forbid(unsafe_code)]

use tokenize::Tokenizer;

use crate::encoder::{Encoder, Encoding};

/// Vocabulary-sized target vector.
///
/// The whole text is segmented and every known token sets its bit, so a
/// multi-token answer sets several bits. Unknown tokens are skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneHotEncoder;

impl Encoder for OneHotEncoder {
    fn encode(&self, tokenizer: &Tokenizer, text: &str) -> Encoding {
        let mut values = vec![0.0_f64; self.output_len(tokenizer)];
        let mut unknown = 0usize;
        for token in tokenizer.segment(text) {
            match tokenizer.index_of(&token).and_then(|idx| values.get_mut(idx)) {
                Some(bit) => *bit = 1.0,
                None => unknown += 1,
            }
        }
        Encoding { values, truncated: 0, unknown }
    }

    fn output_len(&self, tokenizer: &Tokenizer) -> usize {
        tokenizer.vocab_size()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use tokenize::TokenizerBuilder;

    fn tokenizer() -> Tokenizer {
        let mut t = TokenizerBuilder::new().build().unwrap();
        t.fit_all(["MASK", "are", "doing", "sun"]);
        t
    }

    #[test]
    fn single_known_token_sets_one_bit() {
        let t = tokenizer();
        let enc = OneHotEncoder.encode(&t, "doing");
        assert_eq!(enc.values.len(), 4);
        assert_eq!(enc.values.iter().filter(|v| **v == 1.0).count(), 1);
        assert_eq!(enc.values[t.index_of("doing").unwrap()], 1.0);
        assert_eq!(enc.values.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn unknown_answer_is_all_zero() {
        let t = tokenizer();
        let enc = OneHotEncoder.encode(&t, "moon");
        assert_eq!(enc.unknown, 1);
        assert!(enc.values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn multi_token_answer_sets_each_bit() {
        let t = tokenizer();
        let enc = OneHotEncoder.encode(&t, "are doing");
        assert_eq!(enc.values, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn fallback_split_contributes_known_prefix() {
        let t = tokenizer();
        // "sunny" -> ["sun", "ny"]; only "sun" is known
        let enc = OneHotEncoder.encode(&t, "sunny");
        assert_eq!(enc.values, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(enc.unknown, 1);
    }
}
