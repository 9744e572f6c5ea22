//! Text analysis for Sieve.
//!
//! Documents and queries go through the same two steps: the text is split
//! into words by a [`Tokenizer`], then words listed in the index's
//! [`StopWords`] are dropped. Word validity (no control characters) is
//! checked by the callers, not by the tokenizer.

pub mod stop_words;
pub mod tokenizer;

pub use stop_words::StopWords;
pub use tokenizer::{SpaceTokenizer, Tokenizer};

/// A word is valid when it contains no control characters (bytes below `' '`).
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}
