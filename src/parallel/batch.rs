use rayon::prelude::*;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::Document;

/// Runs every query through the parallel ranked search, returning one
/// result vector per query in input order.
pub fn process_queries<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| engine.find_top_parallel(query.as_ref()))
        .collect()
}

/// Concatenation of the per-query results, in input order.
pub fn process_queries_joined<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DocId, DocumentStatus};

    fn corpus() -> SearchEngine {
        let mut engine = SearchEngine::new("").unwrap();
        engine
            .add_document(DocId(1), "curly dog", DocumentStatus::Actual, &[1])
            .unwrap();
        engine
            .add_document(DocId(2), "big collar", DocumentStatus::Actual, &[2])
            .unwrap();
        engine
            .add_document(DocId(3), "sparrow", DocumentStatus::Actual, &[3])
            .unwrap();
        engine
    }

    #[test]
    fn results_follow_input_order() {
        let engine = corpus();
        let queries = ["sparrow", "nothing here", "curly dog"];

        let results = process_queries(&engine, &queries).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0][0].id, DocId(3));
        assert!(results[1].is_empty());
        assert_eq!(results[2][0].id, DocId(1));
    }

    #[test]
    fn joined_results_flatten_in_order() {
        let engine = corpus();
        let queries = ["collar", "dog sparrow"];

        let joined = process_queries_joined(&engine, &queries).unwrap();

        let ids: Vec<DocId> = joined.iter().map(|doc| doc.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], DocId(2));
        assert!(ids[1..].contains(&DocId(1)));
        assert!(ids[1..].contains(&DocId(3)));
    }

    #[test]
    fn invalid_query_surfaces_the_error() {
        let engine = corpus();
        let queries = ["dog", "--broken"];
        assert!(process_queries(&engine, &queries).is_err());
    }
}
