//! The [`SearchIndex`] façade: document lifecycle and introspection.
//!
//! Ranking lives in [`crate::search`]; this module owns insertion, removal,
//! matching and the read accessors.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::analysis::is_valid_word;
use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
use crate::config::SearchConfig;
use crate::document::{DocId, DocumentData, DocumentStatus, average_rating};
use crate::error::{Result, SieveError};
use crate::index::inverted::InvertedIndex;
use crate::index::store::{DocIds, DocumentStore, StoredDocument};
use crate::parallel::pool::WorkerPool;
use crate::query::parser::{ParsedQuery, QueryParser};
use crate::search::ExecutionPolicy;

static EMPTY_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// An in-memory TF-IDF search index.
///
/// # Examples
///
/// ```
/// use sieve::document::DocumentStatus;
/// use sieve::index::SearchIndex;
///
/// let mut index = SearchIndex::from_stop_words_text("in the").unwrap();
/// index.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
///
/// assert!(index.find_top_documents("in").unwrap().is_empty());
/// let hits = index.find_top_documents("cat").unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 42);
/// assert_eq!(hits[0].rating, 2);
/// ```
#[derive(Debug)]
pub struct SearchIndex {
    pub(crate) config: SearchConfig,
    pub(crate) parser: QueryParser,
    pub(crate) tokenizer: SpaceTokenizer,
    pub(crate) inverted: InvertedIndex,
    pub(crate) store: DocumentStore,
    pub(crate) pool: WorkerPool,
}

impl SearchIndex {
    /// Create an index with the default configuration.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(SearchConfig::default(), stop_words)
    }

    /// Create an index whose stop words are given as space-separated text.
    pub fn from_stop_words_text(stop_words: &str) -> Result<Self> {
        Self::with_stop_words(SearchConfig::default(), StopWords::from_text(stop_words)?)
    }

    /// Create an index with an explicit configuration.
    pub fn with_config<I, S>(config: SearchConfig, stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(config, StopWords::from_words(stop_words)?)
    }

    /// Create an index from a prepared stop word set.
    pub fn with_stop_words(config: SearchConfig, stop_words: StopWords) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.num_threads)?;
        Ok(SearchIndex {
            config,
            parser: QueryParser::new(stop_words),
            tokenizer: SpaceTokenizer::new(),
            inverted: InvertedIndex::new(),
            store: DocumentStore::new(),
            pool,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        self.parser.stop_words()
    }

    /// Index a document.
    ///
    /// The rating stored for the document is the truncated average of
    /// `ratings`. Nothing is indexed unless every check passes.
    ///
    /// # Errors
    ///
    /// - [`SieveError::InvalidId`] if `id` is negative
    /// - [`SieveError::DuplicateId`] if `id` is already indexed
    /// - [`SieveError::InvalidWord`] if a word contains a control character
    /// - [`SieveError::EmptyDocument`] if no word survives stop-word filtering
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SieveError::InvalidId(id));
        }
        if self.store.contains(id) {
            return Err(SieveError::DuplicateId(id));
        }

        let words = self.split_into_words_no_stop(text)?;
        if words.is_empty() {
            return Err(SieveError::EmptyDocument(id));
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in &words {
            *counts.entry(word).or_insert(0) += 1;
        }

        let total = words.len() as f64;
        let term_frequencies: BTreeMap<String, f64> = counts
            .into_iter()
            .map(|(word, count)| (word.to_string(), count as f64 / total))
            .collect();

        for (term, &tf) in &term_frequencies {
            self.inverted.insert(term, id, tf);
        }

        let data = DocumentData {
            rating: average_rating(ratings),
            status,
        };
        debug!(
            id,
            words = words.len(),
            terms = term_frequencies.len(),
            rating = data.rating,
            %status,
            "added document"
        );
        self.store.insert(
            id,
            StoredDocument {
                data,
                term_frequencies,
            },
        );

        Ok(())
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    /// Term frequencies of document `id`; empty if the id is not indexed.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<String, f64> {
        self.store
            .get(id)
            .map_or(&EMPTY_FREQUENCIES, |doc| &doc.term_frequencies)
    }

    /// Metadata of document `id`.
    pub fn document_data(&self, id: DocId) -> Option<DocumentData> {
        self.store.get(id).map(|doc| doc.data)
    }

    /// Check if document `id` is indexed.
    pub fn contains(&self, id: DocId) -> bool {
        self.store.contains(id)
    }

    /// Live document ids in ascending order.
    ///
    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> DocIds<'_> {
        self.store.ids()
    }

    /// Remove document `id`. Removing an unknown id is a no-op.
    ///
    /// Returns whether a document was removed.
    pub fn remove_document(&mut self, id: DocId) -> bool {
        self.remove_document_with_policy(ExecutionPolicy::Sequential, id)
    }

    /// Remove document `id` using the given execution policy.
    ///
    /// With [`ExecutionPolicy::Parallel`] the per-term postings updates are
    /// spread over the worker pool; the call returns once all of them are
    /// done.
    pub fn remove_document_with_policy(&mut self, policy: ExecutionPolicy, id: DocId) -> bool {
        let Some(removed) = self.store.remove(id) else {
            trace!(id, "remove of unknown document ignored");
            return false;
        };

        let terms = removed.term_frequencies.keys().map(String::as_str);
        match policy {
            ExecutionPolicy::Sequential => self.inverted.remove_document(id, terms),
            ExecutionPolicy::Parallel => {
                let inverted = &mut self.inverted;
                self.pool.install(|| inverted.par_remove_document(id, terms));
            }
        }

        debug!(
            id,
            terms = removed.term_frequencies.len(),
            %policy,
            "removed document"
        );
        true
    }

    /// Plus terms of `raw_query` found in document `id`, with its status.
    ///
    /// The term list is empty when any minus term occurs in the document.
    /// Matched terms are returned in lexicographic order.
    ///
    /// # Errors
    ///
    /// - [`SieveError::MalformedQuery`] if the query does not parse
    /// - [`SieveError::UnknownDocument`] if `id` is not indexed
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// [`SearchIndex::match_document`] with an explicit execution policy.
    pub fn match_document_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let document = self.store.get(id).ok_or(SieveError::UnknownDocument(id))?;
        let status = document.data.status;
        let terms = &document.term_frequencies;
        let contains = |term: &&str| terms.contains_key(*term);

        let matched: Vec<String> = match policy {
            ExecutionPolicy::Sequential => {
                if query.minus_terms.iter().any(contains) {
                    return Ok((Vec::new(), status));
                }
                query
                    .plus_terms
                    .iter()
                    .filter(|term| contains(*term))
                    .map(|term| term.to_string())
                    .collect()
            }
            ExecutionPolicy::Parallel => self.pool.install(|| {
                if query.minus_terms.par_iter().any(contains) {
                    return Vec::new();
                }
                query
                    .plus_terms
                    .par_iter()
                    .filter(|term| contains(*term))
                    .map(|term| term.to_string())
                    .collect()
            }),
        };

        Ok((matched, status))
    }

    pub(crate) fn parse_query<'q>(&self, raw_query: &'q str) -> Result<ParsedQuery<'q>> {
        self.parser.parse(raw_query)
    }

    /// Split a document into indexable words, dropping stop words.
    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in self.tokenizer.tokenize(text) {
            if !is_valid_word(word) {
                return Err(SieveError::invalid_word(word));
            }
            if word.is_empty() || self.stop_words().is_stop_word(word) {
                continue;
            }
            words.push(word);
        }
        Ok(words)
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = DocId;
    type IntoIter = DocIds<'a>;

    fn into_iter(self) -> DocIds<'a> {
        self.iter()
    }
}
