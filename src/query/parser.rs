//! Query parser for turning raw query strings into plus/minus term sets.

use std::collections::BTreeSet;

use crate::analysis::is_valid_word;
use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
use crate::error::{Result, SieveError};

/// Prefix marking a minus term.
pub const MINUS_MARKER: char = '-';

/// One classified query word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTerm<'q> {
    /// The word without its minus marker.
    pub text: &'q str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// A parsed query.
///
/// Both term lists are deduplicated and sorted lexicographically; stop words
/// never appear in either list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery<'q> {
    pub plus_terms: Vec<&'q str>,
    pub minus_terms: Vec<&'q str>,
}

impl ParsedQuery<'_> {
    /// Check if the query has no plus terms and no minus terms.
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}

/// Query parser bound to an index's stop words.
#[derive(Debug, Clone)]
pub struct QueryParser {
    stop_words: StopWords,
    tokenizer: SpaceTokenizer,
}

impl QueryParser {
    /// Create a new query parser using the given stop words.
    pub fn new(stop_words: StopWords) -> Self {
        QueryParser {
            stop_words,
            tokenizer: SpaceTokenizer::new(),
        }
    }

    /// Get the stop words used by this parser.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Parse a raw query.
    ///
    /// Fails with [`SieveError::MalformedQuery`] if any word is empty, is a
    /// lone `-`, starts with `--`, or contains a control character. A single
    /// bad word rejects the whole query.
    pub fn parse<'q>(&self, raw_query: &'q str) -> Result<ParsedQuery<'q>> {
        let mut plus_terms = BTreeSet::new();
        let mut minus_terms = BTreeSet::new();

        for word in self.tokenizer.tokenize(raw_query) {
            let term = self.parse_word(word)?;
            if term.is_stop {
                continue;
            }
            if term.is_minus {
                minus_terms.insert(term.text);
            } else {
                plus_terms.insert(term.text);
            }
        }

        Ok(ParsedQuery {
            plus_terms: plus_terms.into_iter().collect(),
            minus_terms: minus_terms.into_iter().collect(),
        })
    }

    /// Classify a single query word.
    pub fn parse_word<'q>(&self, word: &'q str) -> Result<QueryTerm<'q>> {
        if word.is_empty() {
            return Err(SieveError::malformed_query("query word is empty"));
        }

        let (text, is_minus) = match word.strip_prefix(MINUS_MARKER) {
            Some(rest) => (rest, true),
            None => (word, false),
        };

        if text.is_empty() {
            return Err(SieveError::malformed_query(format!(
                "query word {word:?} has no text after the minus marker"
            )));
        }
        if text.starts_with(MINUS_MARKER) {
            return Err(SieveError::malformed_query(format!(
                "query word {word:?} has a double minus marker"
            )));
        }
        if !is_valid_word(text) {
            return Err(SieveError::malformed_query(format!(
                "query word {word:?} contains a control character"
            )));
        }

        Ok(QueryTerm {
            text,
            is_minus,
            is_stop: self.stop_words.is_stop_word(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> QueryParser {
        QueryParser::new(StopWords::from_text("in the").unwrap())
    }

    #[test]
    fn test_parse_plus_and_minus_terms() {
        let query = parser().parse("cat -city dog cat -city").unwrap();
        assert_eq!(query.plus_terms, vec!["cat", "dog"]);
        assert_eq!(query.minus_terms, vec!["city"]);
    }

    #[test]
    fn test_stop_words_are_dropped_from_both_sets() {
        let query = parser().parse("in -the cat").unwrap();
        assert_eq!(query.plus_terms, vec!["cat"]);
        assert!(query.minus_terms.is_empty());

        let query = parser().parse("in the").unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_terms_are_sorted() {
        let query = parser().parse("zebra apple mango").unwrap();
        assert_eq!(query.plus_terms, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_malformed_queries() {
        let parser = parser();
        for raw in ["", "   ", "cat -", "--cat", "cat -ci\u{3}ty", "ca\u{1f}t"] {
            let err = parser.parse(raw).unwrap_err();
            assert!(
                matches!(err, SieveError::MalformedQuery(_)),
                "expected malformed query for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_inner_minus_is_part_of_word() {
        let query = parser().parse("well-known -semi-final").unwrap();
        assert_eq!(query.plus_terms, vec!["well-known"]);
        assert_eq!(query.minus_terms, vec!["semi-final"]);
    }

    #[test]
    fn test_parse_word() {
        let parser = parser();
        let term = parser.parse_word("-the").unwrap();
        assert_eq!(
            term,
            QueryTerm {
                text: "the",
                is_minus: true,
                is_stop: true
            }
        );
    }
}
