use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, trace};

use crate::{TokenizeError, TokenizerConfig, Vocabulary};

/// Delimiter tokenizer owning its vocabulary.
///
/// `segment` is read-only and can run concurrently on a frozen vocabulary;
/// `tokenize` additionally applies the configured registration side effects.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    config: TokenizerConfig,
    delimiter: Regex,
    vocab: Vocabulary,
}

impl Tokenizer {
    /// Build a tokenizer from a configuration, compiling its delimiter.
    pub fn new(config: TokenizerConfig) -> Result<Self, TokenizeError> {
        let delimiter = config.compile_delimiter()?;
        Ok(Self::with_delimiter(config, delimiter))
    }

    /// Build from a delimiter compiled from `config.delimiter`.
    pub(crate) fn with_delimiter(config: TokenizerConfig, delimiter: Regex) -> Self {
        let vocab = Vocabulary::new(config.lowercase_tokens);
        Self { config, delimiter, vocab }
    }

    /// Active configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Read-only view of the vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Split `text` into tokens without touching the vocabulary.
    ///
    /// Each delimiter match becomes its own token. The spans between matches
    /// are emitted whole when known, otherwise word by word through
    /// `split_unknown`.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.config.lowercase_tokens {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };

        let mut tokens = Vec::new();
        let mut previous_end = 0usize;
        for m in self.delimiter.find_iter(text) {
            if m.start() > previous_end {
                if let Some(span) = text.get(previous_end..m.start()) {
                    self.push_span(&mut tokens, span);
                }
            }
            tokens.push(m.as_str().to_string());
            previous_end = m.end();
        }
        if let Some(rest) = text.get(previous_end..) {
            self.push_span(&mut tokens, rest);
        }
        tokens
    }

    fn push_span(&self, tokens: &mut Vec<String>, span: &str) {
        let span = span.trim();
        if span.is_empty() {
            return;
        }
        if self.vocab.contains_exact(span) {
            tokens.push(span.to_string());
            return;
        }
        for word in span.split_whitespace() {
            self.split_unknown(tokens, word);
        }
    }

    /// Emit the longest known prefix of `word` followed by the remainder
    /// verbatim. A word with no known prefix is emitted unchanged.
    fn split_unknown(&self, tokens: &mut Vec<String>, word: &str) {
        let mut ends: Vec<usize> = word.char_indices().map(|(i, _)| i).skip(1).collect();
        ends.push(word.len());

        for &end in ends.iter().rev() {
            let (prefix, suffix) = word.split_at(end);
            if self.vocab.contains_exact(prefix) {
                tokens.push(prefix.to_string());
                if !suffix.is_empty() {
                    trace!(word, prefix, suffix, "split unknown word on known prefix");
                    tokens.push(suffix.to_string());
                }
                return;
            }
        }
        tokens.push(word.to_string());
    }

    /// Segment `text`, then register tokens as configured:
    /// `include_unseen_tokens` fits tokens the vocabulary did not know,
    /// `fit_upon_tokenization` fits every emitted token.
    pub fn tokenize(&mut self, text: &str) -> Vec<String> {
        let tokens = self.segment(text);
        if self.config.fit_upon_tokenization || self.config.include_unseen_tokens {
            let before = self.vocab.len();
            self.vocab.fit_all(&tokens);
            let added = self.vocab.len() - before;
            if added > 0 {
                debug!(added, vocab_size = self.vocab.len(), "tokenization registered tokens");
            }
        }
        tokens
    }

    /// Add a single token to the vocabulary.
    pub fn fit(&mut self, token: &str) {
        self.vocab.fit(token);
    }

    /// Add tokens in order.
    pub fn fit_all<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocab.fit_all(tokens);
    }

    /// Index of a token, `None` if unknown.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.vocab.index_of(token)
    }

    /// Token at an index.
    pub fn token_of(&self, index: usize) -> Option<&str> {
        self.vocab.token_of(index)
    }

    /// Number of known tokens.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Owned snapshot of the vocabulary map.
    pub fn as_map(&self) -> HashMap<String, usize> {
        self.vocab.as_map()
    }

    /// See [`Vocabulary::count_total_characters`].
    pub fn count_total_characters(&self) -> usize {
        self.vocab.count_total_characters()
    }

    /// See [`Vocabulary::count_characters`].
    pub fn count_characters(&self) -> usize {
        self.vocab.count_characters()
    }
}
