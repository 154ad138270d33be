use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub i32);

impl DocId {
    pub fn new(id: i32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for DocId {
    fn from(id: i32) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation state of an indexed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_id_ordering_is_numeric() {
        assert!(DocId(2) < DocId(10));
        assert_eq!(DocId::new(5).value(), 5);
    }

    #[test]
    fn document_display_wire_form() {
        let doc = Document {
            id: DocId(3),
            relevance: 0.25,
            rating: -1,
        };
        assert_eq!(
            doc.to_string(),
            "{ document_id = 3, relevance = 0.25, rating = -1 }"
        );
    }

    #[test]
    fn document_serialization_round_trip() {
        let doc = Document {
            id: DocId(42),
            relevance: 0.5,
            rating: 2,
        };

        let json = serde_json::to_string(&doc).unwrap();
        let restored: Document = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, doc);
    }

    #[test]
    fn status_serialization_round_trip() {
        for status in [
            DocumentStatus::Actual,
            DocumentStatus::Irrelevant,
            DocumentStatus::Banned,
            DocumentStatus::Removed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let restored: DocumentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, status);
        }
    }
}
