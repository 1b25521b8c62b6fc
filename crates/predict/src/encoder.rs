#![forbid(unsafe_code)]

use tokenize::Tokenizer;

/// Numeric vector produced by an [`Encoder`], with diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Encoding {
    /// flat feature vector
    pub values: Vec<f64>,
    /// token blocks dropped because the sentence overflowed the layout
    pub truncated: usize,
    /// tokens with no vocabulary index (contribute no activation)
    pub unknown: usize,
}

impl Encoding {
    /// True if trailing tokens were dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated > 0
    }

    /// Consume into the bare vector.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Turns text into a fixed-layout vector against a frozen vocabulary.
///
/// Implementations only read the tokenizer (`Tokenizer::segment`), so one
/// tokenizer can serve many encoders concurrently.
pub trait Encoder {
    /// Encode `text`.
    fn encode(&self, tokenizer: &Tokenizer, text: &str) -> Encoding;

    /// Length of every vector this encoder produces for `tokenizer`.
    fn output_len(&self, tokenizer: &Tokenizer) -> usize;
}
