use std::cmp::Ordering;

use crate::core::types::Document;

/// Upper bound on the number of documents a ranked query returns.
pub const MAX_RESULT_COUNT: usize = 5;

/// Relevance values closer than this are treated as equal when ordering.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Sorts by relevance descending, breaking near-ties by rating descending,
/// and truncates to the top results. The sort is stable, so documents that
/// tie on both keys keep their incoming order.
pub fn rank_top_documents(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(compare_documents);
    documents.truncate(MAX_RESULT_COUNT);
    documents
}

fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance
            .partial_cmp(&lhs.relevance)
            .unwrap_or(Ordering::Equal)
    }
}
