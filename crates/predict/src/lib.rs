#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
#![deny(missing_docs, unused_must_use)]

//! Masked-token training data and mask filling.
//!
//! Sentences are masked one unit at a time, encoded against a tokenizer
//! vocabulary into fixed-width vectors, and handed to an external
//! [`Network`]. A prediction for a masked context is resolved back into a
//! token through the sampler and written into the marker's place.
//!
//! Layout (important files):
//! - `masker.rs` — `SentenceMasker` + `Sample` pairs
//! - `encoder.rs` — `Encoder` trait and `Encoding`
//! - `positional.rs` — one-hot + relative position per token slot
//! - `onehot.rs` — vocabulary-sized target vectors
//! - `network.rs` — the trainable-function boundary
//! - `model.rs` — fitting, training loop, `generate`
//! - `config.rs` — `ModelConfig` (JSON via serde)
//! - `core.rs` — seeded RNG

/// Seeded RNG helper.
pub mod core;
/// Model settings.
pub mod config;
/// Error type.
pub mod error;
/// Sentence masking.
pub mod masker;
/// Encoder trait.
pub mod encoder;
/// Positional sequence encoder.
pub mod positional;
/// One-hot target encoder.
pub mod onehot;
/// External network boundary.
pub mod network;
/// Orchestration of masking, training and generation.
pub mod model;

pub use config::{ModelConfig, MASK};
pub use encoder::{Encoder, Encoding};
pub use error::PredictError;
pub use masker::{Sample, SentenceMasker};
pub use model::{Model, TrainingReport};
pub use network::Network;
pub use onehot::OneHotEncoder;
pub use positional::PositionalEncoder;
