//! Document store: per-document metadata and term frequencies.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::iter::FusedIterator;

use crate::document::{DocId, DocumentData};

/// Everything the index keeps about one live document.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub data: DocumentData,
    /// Term to normalized frequency; the frequencies sum to 1.
    pub term_frequencies: BTreeMap<String, f64>,
}

/// Live documents keyed by id, in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, StoredDocument>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DocId, document: StoredDocument) {
        self.documents.insert(id, document);
    }

    pub fn remove(&mut self, id: DocId) -> Option<StoredDocument> {
        self.documents.remove(&id)
    }

    pub fn get(&self, id: DocId) -> Option<&StoredDocument> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Live document ids in ascending order.
    pub fn ids(&self) -> DocIds<'_> {
        DocIds {
            inner: self.documents.keys(),
        }
    }
}

/// Iterator over live document ids in ascending order.
#[derive(Debug, Clone)]
pub struct DocIds<'a> {
    inner: btree_map::Keys<'a, DocId, StoredDocument>,
}

impl Iterator for DocIds<'_> {
    type Item = DocId;

    fn next(&mut self) -> Option<DocId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for DocIds<'_> {
    fn next_back(&mut self) -> Option<DocId> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for DocIds<'_> {}

impl FusedIterator for DocIds<'_> {}
