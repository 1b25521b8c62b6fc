#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]

//! Vocabulary and tokenizer for masked-token training data.
//!
//! The `Vocabulary` is an append-only bijection between tokens and dense
//! indices. The `Tokenizer` owns one and segments text on a delimiter
//! character class; spans that are not known tokens are decomposed into
//! their longest known prefix plus a verbatim remainder.
//!
//! Layout:
//! - `vocab.rs` — `Vocabulary` (fit, lookup, character accounting)
//! - `config.rs` — `TokenizerConfig` + `TokenizerBuilder`
//! - `tokenizer.rs` — `Tokenizer` (segment / tokenize)

/// Token ↔ index store.
pub mod vocab;
/// Tokenizer configuration and builder.
pub mod config;
/// Segmentation with recursive prefix fallback.
pub mod tokenizer;

pub use config::{TokenizerBuilder, TokenizerConfig, DEFAULT_DELIMITER};
pub use tokenizer::Tokenizer;
pub use vocab::Vocabulary;

/// Error type for tokenizer construction
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    /// The configured delimiter is not a valid regular expression
    #[error("invalid delimiter pattern: {0}")]
    InvalidDelimiter(#[from] regex::Error),
    /// A stored vocabulary lists a token twice, or a token that does not
    /// survive case folding
    #[error("duplicate or unfolded token in stored vocabulary: {0:?}")]
    DuplicateToken(String),
}
