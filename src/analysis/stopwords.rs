use std::collections::BTreeSet;

use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, ErrorKind, Result};

/// Ordered stop-word set, fixed for the engine's lifetime.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    /// Builds the set from a space-separated string.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_words(text))
    }

    /// Builds the set from an arbitrary string sequence. Empty tokens are
    /// discarded; any control byte fails construction.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("stop word {:?} contains a control character", word),
                ));
            }
            set.insert(word.to_string());
        }
        Ok(StopWordSet { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
