use crate::analysis::stopwords::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, ErrorKind, Result};

/// Parsed query. Plus words must occur in a matching document, minus words
/// must not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: Vec<String>,
    pub minus_words: Vec<String>,
}

/// One classified query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'a> {
    text: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// Splits `text` into plus and minus words, dropping stop words.
///
/// With `deduplicate` set, both word lists come back sorted and unique.
/// Without it, duplicates survive in insertion order for callers that
/// guarantee uniqueness upstream.
pub fn parse_query(stop_words: &StopWordSet, text: &str, deduplicate: bool) -> Result<Query> {
    let mut query = Query::default();
    for word in split_words(text) {
        let parsed = parse_query_word(stop_words, word)?;
        if parsed.is_stop {
            continue;
        }
        if parsed.is_minus {
            query.minus_words.push(parsed.text.to_string());
        } else {
            query.plus_words.push(parsed.text.to_string());
        }
    }
    if deduplicate {
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();
    }
    Ok(query)
}

fn parse_query_word<'a>(stop_words: &StopWordSet, word: &'a str) -> Result<QueryWord<'a>> {
    let (text, is_minus) = match word.strip_prefix('-') {
        Some(rest) => {
            if rest.is_empty() {
                return Err(Error::new(
                    ErrorKind::InvalidMinusWord,
                    "query contains a lone minus",
                ));
            }
            if rest.starts_with('-') {
                return Err(Error::new(
                    ErrorKind::InvalidMinusWord,
                    format!("query word {:?} starts with a double minus", word),
                ));
            }
            (rest, true)
        }
        None => (word, false),
    };
    if !is_valid_word(text) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("query word {:?} contains a control character", word),
        ));
    }
    Ok(QueryWord {
        text,
        is_minus,
        is_stop: stop_words.contains(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stop_words() -> StopWordSet {
        StopWordSet::from_text("").unwrap()
    }

    #[test]
    fn classifies_plus_and_minus_words() {
        let query = parse_query(&no_stop_words(), "cat -city dog", true).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "dog"]);
        assert_eq!(query.minus_words, vec!["city"]);
    }

    #[test]
    fn drops_stop_words_on_both_sides() {
        let stop_words = StopWordSet::from_text("in the").unwrap();
        let query = parse_query(&stop_words, "cat in the -the city", true).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "city"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn deduplicates_and_sorts_when_asked() {
        let query = parse_query(&no_stop_words(), "dog cat dog -x -x", true).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "dog"]);
        assert_eq!(query.minus_words, vec!["x"]);
    }

    #[test]
    fn keeps_duplicates_in_insertion_order_when_not_deduplicating() {
        let query = parse_query(&no_stop_words(), "dog cat dog", false).unwrap();
        assert_eq!(query.plus_words, vec!["dog", "cat", "dog"]);
    }

    #[test]
    fn lone_minus_is_rejected() {
        let err = parse_query(&no_stop_words(), "cat -", true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidMinusWord);
    }

    #[test]
    fn double_minus_is_rejected() {
        let err = parse_query(&no_stop_words(), "--cat", true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidMinusWord);
    }

    #[test]
    fn control_byte_is_rejected() {
        let err = parse_query(&no_stop_words(), "ca\u{1}t", true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);

        let err = parse_query(&no_stop_words(), "-ci\u{1f}ty", true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn empty_query_parses_to_empty_sides() {
        let query = parse_query(&no_stop_words(), "   ", true).unwrap();
        assert!(query.plus_words.is_empty());
        assert!(query.minus_words.is_empty());
    }
}
