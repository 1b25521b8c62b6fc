use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::TokenizeError;

/// Append-only token ↔ index bijection.
///
/// Indices are assigned in first-seen order starting at 0 and never change.
/// The reverse direction is a plain `Vec`, so two tokens can never share an
/// index. Serialized form is the token list alone; the index map is rebuilt
/// on load and duplicate tokens are rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredVocabulary", into = "StoredVocabulary")]
pub struct Vocabulary {
    indices: HashMap<String, usize>,
    tokens: Vec<String>,
    lowercase: bool,
}

#[derive(Serialize, Deserialize)]
struct StoredVocabulary {
    tokens: Vec<String>,
    lowercase: bool,
}

impl From<Vocabulary> for StoredVocabulary {
    fn from(v: Vocabulary) -> Self {
        Self { tokens: v.tokens, lowercase: v.lowercase }
    }
}

impl TryFrom<StoredVocabulary> for Vocabulary {
    type Error = TokenizeError;

    fn try_from(stored: StoredVocabulary) -> Result<Self, Self::Error> {
        let mut vocab = Vocabulary::new(stored.lowercase);
        for token in stored.tokens {
            let before = vocab.len();
            vocab.fit(&token);
            if vocab.len() == before || vocab.token_of(before) != Some(token.as_str()) {
                return Err(TokenizeError::DuplicateToken(token));
            }
        }
        Ok(vocab)
    }
}

impl Vocabulary {
    /// Create an empty vocabulary. With `lowercase` set, every token is
    /// case-folded before lookup and insertion.
    pub fn new(lowercase: bool) -> Self {
        Self { indices: HashMap::new(), tokens: Vec::new(), lowercase }
    }

    fn fold(&self, token: &str) -> String {
        if self.lowercase {
            token.to_lowercase()
        } else {
            token.to_string()
        }
    }

    /// Insert `token` at index `len()` unless it is already present.
    pub fn fit(&mut self, token: &str) {
        let token = self.fold(token);
        if self.indices.contains_key(&token) {
            return;
        }
        self.indices.insert(token.clone(), self.tokens.len());
        self.tokens.push(token);
    }

    /// Fit every token of an iterator, in order.
    pub fn fit_all<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.fit(token.as_ref());
        }
    }

    /// Index of `token`, or `None` when it was never fitted.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        if self.lowercase {
            self.indices.get(&token.to_lowercase()).copied()
        } else {
            self.indices.get(token).copied()
        }
    }

    /// Token stored at `index`.
    pub fn token_of(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Exact lookup without case folding. Used by segmentation, which folds
    /// the whole input up front.
    pub(crate) fn contains_exact(&self, token: &str) -> bool {
        self.indices.contains_key(token)
    }

    /// True if `token` has an index.
    pub fn contains(&self, token: &str) -> bool {
        self.index_of(token).is_some()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if nothing has been fitted yet.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether tokens are case-folded.
    pub fn is_lowercase(&self) -> bool {
        self.lowercase
    }

    /// Tokens in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Owned snapshot of the token → index map. Later fits are not reflected.
    pub fn as_map(&self) -> HashMap<String, usize> {
        self.indices.clone()
    }

    /// Sum of the character lengths of all tokens.
    pub fn count_total_characters(&self) -> usize {
        self.tokens.iter().map(|t| t.chars().count()).sum()
    }

    /// Number of distinct characters appearing in any token.
    pub fn count_characters(&self) -> usize {
        self.tokens
            .iter()
            .flat_map(|t| t.chars())
            .collect::<HashSet<char>>()
            .len()
    }
}
