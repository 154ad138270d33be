use std::collections::{BTreeMap, HashMap};

use crate::core::types::DocId;

/// Mirrored term-frequency maps.
///
/// `word_to_docs` answers "which documents contain this word" and
/// `doc_to_words` answers "which words does this document contain". Both
/// carry the same (word, id, frequency) triples and are always updated
/// together; the per-document mirror keeps removal proportional to the
/// number of words in the document.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_docs: HashMap<String, BTreeMap<DocId, f64>>,
    doc_to_words: BTreeMap<DocId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one document's words. A word occurring k times out of W total
    /// words ends up with frequency k / W.
    pub fn insert_document(&mut self, id: DocId, words: &[&str]) {
        let inv_word_count = 1.0 / words.len() as f64;
        for &word in words {
            *self
                .word_to_docs
                .entry(word.to_string())
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
            *self
                .doc_to_words
                .entry(id)
                .or_default()
                .entry(word.to_string())
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// Erases every entry recorded for `id`, walking only the words of that
    /// document. Posting lists that become empty stay behind; lookups treat
    /// them as absent.
    pub fn remove_document(&mut self, id: DocId) {
        if let Some(words) = self.doc_to_words.remove(&id) {
            for word in words.keys() {
                if let Some(posting) = self.word_to_docs.get_mut(word) {
                    posting.remove(&id);
                }
            }
        }
    }

    /// Posting list for `word`, ascending by document id. Empty posting
    /// lists read as `None`.
    pub fn posting(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_docs.get(word).filter(|docs| !docs.is_empty())
    }

    /// Word frequencies recorded for `id`; an owned empty map for unknown
    /// ids.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<String, f64> {
        self.doc_to_words.get(&id).cloned().unwrap_or_default()
    }

    pub fn contains_document(&self, id: DocId) -> bool {
        self.doc_to_words.contains_key(&id)
    }
}
