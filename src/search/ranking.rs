//! Top documents search.
//!
//! Relevance of a document is the sum over matching plus terms of
//! `tf * idf`, where `idf = ln(document_count / documents_containing_term)`.
//! Documents rejected by the predicate get no relevance; documents that
//! contain any minus term are dropped regardless of the predicate.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::trace;

use crate::document::{DocId, Document, DocumentStatus};
use crate::error::Result;
use crate::index::SearchIndex;
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::parser::ParsedQuery;
use crate::query::predicate::{DocumentPredicate, status_is};
use crate::search::execution::ExecutionPolicy;

impl SearchIndex {
    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, status_is(status))
    }

    /// Top documents accepted by `predicate`.
    pub fn find_top_documents_with<P: DocumentPredicate>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with_policy(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// [`SearchIndex::find_top_documents`] with an explicit execution policy.
    pub fn find_top_documents_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_policy(policy, raw_query, DocumentStatus::Actual)
    }

    /// [`SearchIndex::find_top_documents_by_status`] with an explicit
    /// execution policy.
    pub fn find_top_documents_by_status_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with_policy(policy, raw_query, status_is(status))
    }

    /// Rank documents for `raw_query`.
    ///
    /// Hits are sorted by descending relevance; relevances within the
    /// configured tolerance are ordered by descending rating. At most
    /// `max_results` hits are returned.
    ///
    /// # Errors
    ///
    /// [`SieveError::MalformedQuery`](crate::error::SieveError::MalformedQuery)
    /// if the query does not parse. No partial result is produced.
    pub fn find_top_documents_with_policy<P: DocumentPredicate>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>> {
        let query = self.parse_query(raw_query)?;
        let mut documents = self.find_all_documents(policy, &query, &predicate)?;
        let candidates = documents.len();

        sort_by_relevance(&mut documents, self.config.relevance_epsilon, policy);
        documents.truncate(self.config.max_results);

        trace!(
            %policy,
            plus_terms = query.plus_terms.len(),
            minus_terms = query.minus_terms.len(),
            candidates,
            returned = documents.len(),
            "ranked query"
        );
        Ok(documents)
    }

    fn find_all_documents<P: DocumentPredicate>(
        &self,
        policy: ExecutionPolicy,
        query: &ParsedQuery<'_>,
        predicate: &P,
    ) -> Result<Vec<Document>> {
        let relevance = match policy {
            ExecutionPolicy::Sequential => self.accumulate_sequential(query, predicate),
            ExecutionPolicy::Parallel => self
                .pool
                .install(|| self.accumulate_parallel(query, predicate))?,
        };

        Ok(relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                let document = self.store.get(id)?;
                Some(Document::new(id, relevance, document.data.rating))
            })
            .collect())
    }

    fn accumulate_sequential<P: DocumentPredicate>(
        &self,
        query: &ParsedQuery<'_>,
        predicate: &P,
    ) -> BTreeMap<DocId, f64> {
        let mut relevance = BTreeMap::new();
        for term in &query.plus_terms {
            for (id, delta) in self.term_contributions(term, predicate) {
                *relevance.entry(id).or_insert(0.0) += delta;
            }
        }
        for term in &query.minus_terms {
            for id in self.excluded_ids(term) {
                relevance.remove(&id);
            }
        }
        relevance
    }

    fn accumulate_parallel<P: DocumentPredicate>(
        &self,
        query: &ParsedQuery<'_>,
        predicate: &P,
    ) -> Result<BTreeMap<DocId, f64>> {
        let relevance = ConcurrentMap::new(self.config.shard_count)?;

        query.plus_terms.par_iter().for_each(|term| {
            for (id, delta) in self.term_contributions(term, predicate) {
                relevance.accumulate(id, delta);
            }
        });

        // for_each joins: every plus term is accumulated before any erase.
        query.minus_terms.par_iter().for_each(|term| {
            for id in self.excluded_ids(term) {
                relevance.erase(&id);
            }
        });

        Ok(relevance.into_ordinary_map())
    }

    /// `(id, tf * idf)` for every document containing `term` that passes
    /// `predicate`.
    fn term_contributions<'a, P: DocumentPredicate>(
        &'a self,
        term: &str,
        predicate: &'a P,
    ) -> impl Iterator<Item = (DocId, f64)> + 'a {
        let idf = self.inverse_document_frequency(term);
        self.inverted
            .postings(term)
            .into_iter()
            .flat_map(move |postings| {
                postings.iter().filter_map(move |(&id, &tf)| {
                    let data = self.store.get(id)?.data;
                    predicate(id, data.status, data.rating).then_some((id, tf * idf))
                })
            })
    }

    fn excluded_ids(&self, term: &str) -> impl Iterator<Item = DocId> + '_ {
        self.inverted
            .postings(term)
            .into_iter()
            .flat_map(|postings| postings.keys().copied())
    }

    /// Only meaningful for terms present in the index; absent terms have no
    /// postings to weigh.
    fn inverse_document_frequency(&self, term: &str) -> f64 {
        (self.store.len() as f64 / self.inverted.document_frequency(term) as f64).ln()
    }
}

/// Order hits by descending relevance, breaking near-ties by rating.
///
/// Hits are first put in a strict total order (relevance descending, rating
/// descending, id ascending). The sorted hits are then cut into runs: a run
/// starts at a hit and takes every following hit less than `epsilon` below
/// it. Each run is re-ordered by descending rating. A run never spans
/// `epsilon` or more, so a hit is never placed ahead of one that is more
/// relevant by the tolerance or more, and the comparator handed to the sort
/// stays transitive.
pub fn sort_by_relevance(documents: &mut [Document], epsilon: f64, policy: ExecutionPolicy) {
    let by_relevance = |lhs: &Document, rhs: &Document| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then_with(|| by_rating(lhs, rhs))
    };
    match policy {
        ExecutionPolicy::Sequential => documents.sort_by(by_relevance),
        ExecutionPolicy::Parallel => documents.par_sort_by(by_relevance),
    }

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && documents[start].relevance - documents[end].relevance < epsilon
        {
            end += 1;
        }
        if end - start > 1 {
            documents[start..end].sort_by(|lhs, rhs| {
                by_rating(lhs, rhs).then_with(|| rhs.relevance.total_cmp(&lhs.relevance))
            });
        }
        start = end;
    }
}

fn by_rating(lhs: &Document, rhs: &Document) -> Ordering {
    rhs.rating
        .cmp(&lhs.rating)
        .then_with(|| lhs.id.cmp(&rhs.id))
}
