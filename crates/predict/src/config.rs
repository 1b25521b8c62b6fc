use serde::{Deserialize, Serialize};

use crate::PredictError;

/// Default mask marker.
pub const MASK: &str = "MASK";

/// Model settings. Missing JSON keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// number of token slots in a positional encoding
    pub max_positions: usize,
    /// seed for the sentence masker
    pub seed: u64,
    /// reserved marker replaced during masking and filled by `generate`
    pub mask_token: String,
    /// learning rate handed to `Network::train`
    pub learning_rate: f64,
    /// training stops once the loss is at or below this value
    pub target_loss: f64,
    /// upper bound on training epochs
    pub max_epochs: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_positions: 32,
            seed: 24,
            mask_token: MASK.to_string(),
            learning_rate: 0.1,
            target_loss: 0.03,
            max_epochs: 10_000,
        }
    }
}

impl ModelConfig {
    /// Parse a JSON object; absent fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, PredictError> {
        Ok(serde_json::from_str(s)?)
    }
}
