use sampler::SampleError;
use tokenize::TokenizeError;

/// Errors surfaced by masking, training and generation.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// `generate` was called on text without the mask marker
    #[error("input text must contain the mask token '{mask}' (vocabulary index {index:?})")]
    MissingMask {
        /// the configured marker
        mask: String,
        /// the marker's vocabulary index, if fitted
        index: Option<usize>,
    },
    /// A sentence had no space-separated units to mask
    #[error("sentence has no units to mask")]
    EmptySentence,
    /// The sampled index has no token in the vocabulary
    #[error("sampled index {0} not found in vocabulary")]
    UnknownIndex(usize),
    /// Training was requested with no samples
    #[error("no samples to train on")]
    NoSamples,
    /// Sampling rejected the network output
    #[error(transparent)]
    Sample(#[from] SampleError),
    /// Tokenizer construction failed
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
