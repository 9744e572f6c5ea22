//! Tokenizer implementations for text analysis.
//!
//! # Examples
//!
//! ```
//! use sieve::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
//!
//! let tokenizer = SpaceTokenizer::new();
//! assert_eq!(tokenizer.tokenize("cat in  the city"), vec!["cat", "in", "the", "city"]);
//! assert_eq!(tokenizer.tokenize("   "), vec![""]);
//! ```

/// Trait for tokenizers that split text into words.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into words borrowed from it.
    ///
    /// Implementations return at least one word; blank input yields a single
    /// empty word, which callers treat as invalid.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on the ASCII space character only.
///
/// Tabs, newlines and other whitespace stay inside words; runs of spaces do
/// not produce empty words.
#[derive(Clone, Debug, Default)]
pub struct SpaceTokenizer;

impl SpaceTokenizer {
    /// Create a new space tokenizer.
    pub fn new() -> Self {
        SpaceTokenizer
    }
}

impl Tokenizer for SpaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut words: Vec<&'a str> = text.split(' ').filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            words.push(&text[..0]);
        }
        words
    }

    fn name(&self) -> &'static str {
        "space"
    }
}
