use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::analysis::stopwords::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Document, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::parallel::accumulator::ConcurrentMap;
use crate::query::parser::{parse_query, Query};
use crate::search::filter::{DocumentFilter, StatusFilter};
use crate::search::ranker::rank_top_documents;

/// Per-document data kept alongside the index.
#[derive(Debug, Clone, Copy)]
struct DocumentRecord {
    rating: i32,
    status: DocumentStatus,
}

/// In-memory TF-IDF search engine.
///
/// Documents are ingested with an id, a text, a status and a ratings
/// vector. Ranked queries support plus words, minus words, stop-word
/// filtering and a caller-supplied post-filter, with a sequential and a
/// parallel scoring path producing the same observable results.
///
/// The engine is single-owner: callers serialize mutations against each
/// other and against reads. Within one read, scoring may fan out.
#[derive(Debug)]
pub struct SearchEngine {
    stop_words: StopWordSet,
    index: InvertedIndex,
    documents: BTreeMap<DocId, DocumentRecord>,
    ids: BTreeSet<DocId>,
}

impl SearchEngine {
    /// Builds an engine from a space-separated stop-word string.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Ok(Self::from_stop_word_set(StopWordSet::from_text(
            stop_words_text,
        )?))
    }

    /// Builds an engine from a stop-word sequence.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_stop_word_set(StopWordSet::from_words(
            stop_words,
        )?))
    }

    fn from_stop_word_set(stop_words: StopWordSet) -> Self {
        SearchEngine {
            stop_words,
            index: InvertedIndex::new(),
            documents: BTreeMap::new(),
            ids: BTreeSet::new(),
        }
    }

    /// Indexes one document.
    ///
    /// Fails with `NegativeId` for ids below zero, `DuplicateId` for ids
    /// already indexed, and `InvalidInput` when the text carries control
    /// characters or no word survives stop-word filtering. The stored
    /// rating is the truncated integer mean of `ratings`, 0 when empty.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id.value() < 0 {
            return Err(Error::new(
                ErrorKind::NegativeId,
                format!("document id {} is negative", id),
            ));
        }
        if self.documents.contains_key(&id) {
            return Err(Error::new(
                ErrorKind::DuplicateId,
                format!("document id {} already exists", id),
            ));
        }
        if !is_valid_word(text) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("document {} contains a control character", id),
            ));
        }
        let words = self.split_into_words_no_stop(text);
        if words.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("document {} has no words left after stop-word filtering", id),
            ));
        }
        self.index.insert_document(id, &words);
        self.documents.insert(
            id,
            DocumentRecord {
                rating: average_rating(ratings),
                status,
            },
        );
        self.ids.insert(id);
        Ok(())
    }

    /// Removes `id` from the index, the document store and the id
    /// directory. Unknown ids are a no-op.
    pub fn remove_document(&mut self, id: DocId) {
        if !self.ids.remove(&id) {
            return;
        }
        self.index.remove_document(id);
        self.documents.remove(&id);
    }

    /// Parallel-policy variant of [`remove_document`]; identical observable
    /// behavior.
    pub fn remove_document_parallel(&mut self, id: DocId) {
        self.remove_document(id);
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Ascending iterator over the indexed ids.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.ids.iter().copied()
    }

    /// Id at `index` in ascending order.
    pub fn nth_id(&self, index: usize) -> Result<DocId> {
        self.ids.iter().nth(index).copied().ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownDocument,
                format!("document index {} is out of range", index),
            )
        })
    }

    /// Word frequencies recorded for `id`; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<String, f64> {
        self.index.word_frequencies(id)
    }

    /// Top documents with `Actual` status.
    pub fn find_top(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_with(raw_query, StatusFilter::default())
    }

    /// Top documents with the given status.
    pub fn find_top_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_with(raw_query, StatusFilter(status))
    }

    /// Top documents accepted by `filter`, ranked by TF-IDF relevance.
    pub fn find_top_with<F: DocumentFilter>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>> {
        let query = parse_query(&self.stop_words, raw_query, true)?;
        Ok(rank_top_documents(self.find_all_documents(&query, &filter)))
    }

    /// Parallel-policy variant of [`find_top`].
    pub fn find_top_parallel(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_parallel_with(raw_query, StatusFilter::default())
    }

    /// Parallel-policy variant of [`find_top_by_status`].
    pub fn find_top_parallel_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_parallel_with(raw_query, StatusFilter(status))
    }

    /// Parallel-policy variant of [`find_top_with`]. Scoring fans out over
    /// the query's plus and minus words; the returned set of documents and
    /// their ratings match the sequential path, with relevance equal up to
    /// floating-point summation order.
    pub fn find_top_parallel_with<F: DocumentFilter>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>> {
        let query = parse_query(&self.stop_words, raw_query, true)?;
        Ok(rank_top_documents(
            self.find_all_documents_parallel(&query, &filter),
        ))
    }

    /// Plus words of the query occurring in document `id`, sorted and
    /// unique, together with the document's status. The list is empty when
    /// any minus word occurs in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let record = self.record(id)?;
        let query = parse_query(&self.stop_words, raw_query, true)?;
        for word in &query.minus_words {
            if self.posting_contains(word, id) {
                return Ok((Vec::new(), record.status));
            }
        }
        let matched = query
            .plus_words
            .iter()
            .filter(|word| self.posting_contains(word, id))
            .cloned()
            .collect();
        Ok((matched, record.status))
    }

    /// Parallel-policy variant of [`match_document`]; same matched set.
    pub fn match_document_parallel(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let record = self.record(id)?;
        let query = parse_query(&self.stop_words, raw_query, false)?;
        if query
            .minus_words
            .par_iter()
            .any(|word| self.posting_contains(word, id))
        {
            return Ok((Vec::new(), record.status));
        }
        let mut matched: Vec<String> = query
            .plus_words
            .par_iter()
            .filter(|word| self.posting_contains(word, id))
            .cloned()
            .collect();
        matched.sort_unstable();
        matched.dedup();
        Ok((matched, record.status))
    }

    fn record(&self, id: DocId) -> Result<&DocumentRecord> {
        self.documents.get(&id).ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownDocument,
                format!("document id {} is not indexed", id),
            )
        })
    }

    fn posting_contains(&self, word: &str, id: DocId) -> bool {
        self.index
            .posting(word)
            .map_or(false, |posting| posting.contains_key(&id))
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }

    fn find_all_documents<F: DocumentFilter>(&self, query: &Query, filter: &F) -> Vec<Document> {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let posting = match self.index.posting(word) {
                Some(posting) => posting,
                None => continue,
            };
            let idf = self.inverse_document_freq(posting.len());
            for (&id, &tf) in posting {
                let record = &self.documents[&id];
                if filter.accept(id, record.status, record.rating) {
                    *relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for word in &query.minus_words {
            let posting = match self.index.posting(word) {
                Some(posting) => posting,
                None => continue,
            };
            for &id in posting.keys() {
                relevance.remove(&id);
            }
        }
        self.materialize(relevance)
    }

    fn find_all_documents_parallel<F: DocumentFilter>(
        &self,
        query: &Query,
        filter: &F,
    ) -> Vec<Document> {
        let relevance = ConcurrentMap::<f64>::new();
        query.plus_words.par_iter().for_each(|word| {
            let posting = match self.index.posting(word) {
                Some(posting) => posting,
                None => return,
            };
            let idf = self.inverse_document_freq(posting.len());
            for (&id, &tf) in posting {
                let record = &self.documents[&id];
                if filter.accept(id, record.status, record.rating) {
                    *relevance.at(id) += tf * idf;
                }
            }
        });
        // The erase phase starts only after every scoring worker joined.
        query.minus_words.par_iter().for_each(|word| {
            let posting = match self.index.posting(word) {
                Some(posting) => posting,
                None => return,
            };
            for &id in posting.keys() {
                relevance.erase(id);
            }
        });
        self.materialize(relevance.build_ordinary())
    }

    fn materialize(&self, relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
        relevance
            .into_iter()
            .map(|(id, relevance)| Document {
                id,
                relevance,
                rating: self.documents[&id].rating,
            })
            .collect()
    }

    fn inverse_document_freq(&self, containing_docs: usize) -> f64 {
        (self.document_count() as f64 / containing_docs as f64).ln()
    }
}

/// Integer mean truncated toward zero; 0 for an empty vector.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i32 = ratings.iter().sum();
    sum / ratings.len() as i32
}
