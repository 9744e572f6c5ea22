//! Document predicates used to filter ranking candidates.

use crate::document::{DocId, DocumentStatus, Rating};

/// A filter over `(id, status, rating)` applied to every plus-term candidate.
///
/// Any `Fn(DocId, DocumentStatus, Rating) -> bool` closure that is `Sync`
/// is a predicate, so parallel ranking can evaluate it from worker threads.
pub trait DocumentPredicate: Fn(DocId, DocumentStatus, Rating) -> bool + Sync {}

impl<F> DocumentPredicate for F where F: Fn(DocId, DocumentStatus, Rating) -> bool + Sync {}

/// Predicate accepting documents with exactly the given status.
pub fn status_is(status: DocumentStatus) -> impl DocumentPredicate + Copy {
    move |_id: DocId, document_status: DocumentStatus, _rating: Rating| document_status == status
}
