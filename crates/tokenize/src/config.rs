use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{TokenizeError, Tokenizer};

/// Default delimiter class: punctuation, ASCII digits and common symbols.
/// Every match is emitted as its own one-character token.
pub const DEFAULT_DELIMITER: &str = r#"[()?!.,:;*+\-/\\|\[\]{}<>=\~\&\^%$#@`"'0-9]"#;

/// Tokenizer settings. All flags are independent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// regex whose matches split the input and become standalone tokens
    pub delimiter: String,
    /// case-fold the input and the vocabulary
    pub lowercase_tokens: bool,
    /// register tokens unknown to the vocabulary while tokenizing
    pub include_unseen_tokens: bool,
    /// fit every emitted token after each `tokenize` call
    pub fit_upon_tokenization: bool,
    /// accepted for compatibility; segmentation does not consult it
    pub simple_tokens: bool,
    /// accepted for compatibility; segmentation does not consult it
    pub find_nearest_token: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            lowercase_tokens: false,
            include_unseen_tokens: false,
            fit_upon_tokenization: false,
            simple_tokens: false,
            find_nearest_token: false,
        }
    }
}

impl TokenizerConfig {
    /// Compile the delimiter pattern.
    pub fn compile_delimiter(&self) -> Result<Regex, TokenizeError> {
        Ok(Regex::new(&self.delimiter)?)
    }
}

/// Chainable builder over `TokenizerConfig`.
///
/// ```
/// use tokenize::TokenizerBuilder;
///
/// let tokenizer = TokenizerBuilder::new()
///     .lowercase_tokens()
///     .fit_upon_tokenization()
///     .build()
///     .unwrap();
/// assert!(tokenizer.config().lowercase_tokens);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Builder with the default delimiter and every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// Register unknown tokens as a side effect of `tokenize`.
    pub fn include_unseen_tokens(mut self) -> Self {
        self.config.include_unseen_tokens = true;
        self
    }

    /// Set the (inert) nearest-token flag.
    pub fn find_nearest(mut self) -> Self {
        self.config.find_nearest_token = true;
        self
    }

    /// Case-fold input and vocabulary.
    pub fn lowercase_tokens(mut self) -> Self {
        self.config.lowercase_tokens = true;
        self
    }

    /// Fit every emitted token after tokenizing.
    pub fn fit_upon_tokenization(mut self) -> Self {
        self.config.fit_upon_tokenization = true;
        self
    }

    /// Set the (inert) simple-tokens flag.
    pub fn simple_tokens(mut self) -> Self {
        self.config.simple_tokens = true;
        self
    }

    /// Replace the delimiter pattern. Validated by `build`.
    pub fn with_delimiter(mut self, pattern: &str) -> Self {
        self.config.delimiter = pattern.to_string();
        self
    }

    /// Configuration accumulated so far.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Hand the compiled configuration to an explicit constructor.
    pub fn build_with<T, F>(self, constructor: F) -> Result<T, TokenizeError>
    where
        F: FnOnce(TokenizerConfig, Regex) -> T,
    {
        let delimiter = self.config.compile_delimiter()?;
        Ok(constructor(self.config, delimiter))
    }

    /// Build the default `Tokenizer`.
    pub fn build(self) -> Result<Tokenizer, TokenizeError> {
        self.build_with(Tokenizer::with_delimiter)
    }
}
