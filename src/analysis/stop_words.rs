//! Stop word set owned by an index.
//!
//! Stop words are excluded from indexing and from queries entirely: a stop
//! word never becomes a plus or minus query term.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::analysis::is_valid_word;
use crate::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
use crate::error::{Result, SieveError};

/// An immutable set of stop words.
///
/// Cloning is cheap; clones share the same underlying set.
#[derive(Clone, Debug, Default)]
pub struct StopWords {
    words: Arc<BTreeSet<String>>,
}

impl StopWords {
    /// Create a stop word set from a list of words.
    ///
    /// Empty strings are dropped and duplicates collapse. A word containing a
    /// control character is rejected.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word: String = word.into();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(&word) {
                return Err(SieveError::invalid_word(word));
            }
            set.insert(word);
        }
        Ok(StopWords {
            words: Arc::new(set),
        })
    }

    /// Create a stop word set from space-separated text, e.g. `"a in the"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(SpaceTokenizer::new().tokenize(text))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate over the stop words in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_from_text() {
        let stop_words = StopWords::from_text("in the  in").unwrap();
        assert_eq!(stop_words.len(), 2);
        assert!(stop_words.is_stop_word("in"));
        assert!(stop_words.is_stop_word("the"));
        assert!(!stop_words.is_stop_word("cat"));
    }

    #[test]
    fn test_empty_words_are_dropped() {
        let stop_words = StopWords::from_words(vec!["", "and", ""]).unwrap();
        assert_eq!(stop_words.iter().collect::<Vec<_>>(), vec!["and"]);

        let stop_words = StopWords::from_text("").unwrap();
        assert!(stop_words.is_empty());
    }

    #[test]
    fn test_invalid_stop_word_is_rejected() {
        let err = StopWords::from_words(vec!["in", "th\u{2}e"]).unwrap_err();
        assert!(matches!(err, SieveError::InvalidWord(_)));
    }
}
