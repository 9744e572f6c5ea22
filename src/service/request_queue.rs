//! Sliding-window history of ranking requests.

use std::collections::VecDeque;

use crate::document::{Document, DocumentStatus};
use crate::error::{Result, SieveError};
use crate::index::SearchIndex;
use crate::query::predicate::DocumentPredicate;

/// Default window: one request per minute for a day.
pub const MIN_IN_DAY: usize = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    hit_count: usize,
}

/// Records the last `window` ranking requests and counts the ones that
/// returned nothing.
///
/// The queue borrows the index, so no document can be removed while the
/// queue is alive.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    index: &'a SearchIndex,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    window: usize,
}

impl<'a> RequestQueue<'a> {
    /// Create a queue with the default one-day window.
    pub fn new(index: &'a SearchIndex) -> Self {
        RequestQueue {
            index,
            requests: VecDeque::with_capacity(MIN_IN_DAY),
            no_result_requests: 0,
            window: MIN_IN_DAY,
        }
    }

    /// Create a queue remembering the last `window` requests.
    pub fn with_window(index: &'a SearchIndex, window: usize) -> Result<Self> {
        if window == 0 {
            return Err(SieveError::invalid_argument("request window cannot be zero"));
        }
        Ok(RequestQueue {
            index,
            requests: VecDeque::with_capacity(window),
            no_result_requests: 0,
            window,
        })
    }

    /// Run [`SearchIndex::find_top_documents`] and record the outcome.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let hits = self.index.find_top_documents(raw_query)?;
        self.record(&hits);
        Ok(hits)
    }

    /// Run [`SearchIndex::find_top_documents_by_status`] and record the outcome.
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let hits = self.index.find_top_documents_by_status(raw_query, status)?;
        self.record(&hits);
        Ok(hits)
    }

    /// Run [`SearchIndex::find_top_documents_with`] and record the outcome.
    pub fn add_find_request_with<P: DocumentPredicate>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>> {
        let hits = self.index.find_top_documents_with(raw_query, predicate)?;
        self.record(&hits);
        Ok(hits)
    }

    /// Number of requests in the window that returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Number of requests currently in the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, hits: &[Document]) {
        if hits.is_empty() {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult {
            hit_count: hits.len(),
        });
        if self.requests.len() > self.window {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.hit_count == 0 {
                    self.no_result_requests -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocId, Rating};

    fn index() -> SearchIndex {
        let mut index = SearchIndex::from_stop_words_text("and in at").unwrap();
        index
            .add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        index
            .add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        index
            .add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8])
            .unwrap();
        index
            .add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2])
            .unwrap();
        index
            .add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1])
            .unwrap();
        index
    }

    #[test]
    fn test_counts_empty_requests_in_window() {
        let index = index();
        let mut queue = RequestQueue::new(&index);
        for _ in 0..MIN_IN_DAY - 1 {
            queue.add_find_request("empty request").unwrap();
        }
        assert_eq!(queue.no_result_requests(), MIN_IN_DAY - 1);

        // Still inside the window.
        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.no_result_requests(), MIN_IN_DAY - 1);

        // Each new request pushes one empty request out.
        queue.add_find_request("big collar").unwrap();
        assert_eq!(queue.no_result_requests(), MIN_IN_DAY - 2);
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), MIN_IN_DAY - 3);
        assert_eq!(queue.len(), MIN_IN_DAY);
    }

    #[test]
    fn test_small_window() {
        let index = index();
        let mut queue = RequestQueue::with_window(&index, 2).unwrap();
        queue.add_find_request("parrot").unwrap();
        queue.add_find_request("parrot").unwrap();
        assert_eq!(queue.no_result_requests(), 2);
        queue
            .add_find_request_by_status("cat", DocumentStatus::Actual)
            .unwrap();
        assert_eq!(queue.no_result_requests(), 1);
        queue
            .add_find_request_with("dog", |_: DocId, _: DocumentStatus, rating: Rating| {
                rating > 100
            })
            .unwrap();
        assert_eq!(queue.no_result_requests(), 1);
        assert!(RequestQueue::with_window(&index, 0).is_err());
    }

    #[test]
    fn test_errors_are_not_recorded() {
        let index = index();
        let mut queue = RequestQueue::new(&index);
        assert!(queue.add_find_request("--cat").is_err());
        assert!(queue.is_empty());
        assert_eq!(queue.no_result_requests(), 0);
    }
}
