//! Inverted index mapping terms to per-document term frequencies.

use std::collections::BTreeMap;

use ahash::AHashMap;
use rayon::prelude::*;

use crate::document::DocId;

/// Postings of one term: document id to normalized term frequency.
pub type Postings = BTreeMap<DocId, f64>;

/// Term to postings map.
///
/// A term is present only while at least one live document contains it;
/// removing the last posting of a term removes the term.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: AHashMap<String, Postings>,
}

impl InvertedIndex {
    /// Create an empty inverted index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `term` occurs in document `id` with frequency `tf`.
    pub fn insert(&mut self, term: &str, id: DocId, tf: f64) {
        match self.postings.get_mut(term) {
            Some(postings) => {
                postings.insert(id, tf);
            }
            None => {
                self.postings
                    .insert(term.to_string(), BTreeMap::from([(id, tf)]));
            }
        }
    }

    /// Get the postings of `term`, if any live document contains it.
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.postings.get(term)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeMap::len)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterate over all terms and their postings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Postings)> {
        self.postings.iter().map(|(term, postings)| (term.as_str(), postings))
    }

    /// Remove document `id` from the postings of every term in `terms`.
    pub fn remove_document<'a, I>(&mut self, id: DocId, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            if let Some(postings) = self.postings.get_mut(term) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.postings.remove(term);
                }
            }
        }
    }

    /// Parallel variant of [`InvertedIndex::remove_document`].
    ///
    /// The postings of the affected terms are detached from the map, then
    /// rayon workers erase `id` from them, each worker owning a disjoint
    /// subset of the terms. Non-empty postings are reattached afterwards.
    /// Runs on the current rayon pool.
    pub fn par_remove_document<'a, I>(&mut self, id: DocId, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut detached: Vec<(String, Postings)> = terms
            .into_iter()
            .filter_map(|term| self.postings.remove_entry(term))
            .collect();

        detached.par_iter_mut().for_each(|(_, postings)| {
            postings.remove(&id);
        });

        self.postings.extend(
            detached
                .into_iter()
                .filter(|(_, postings)| !postings.is_empty()),
        );
    }
}
