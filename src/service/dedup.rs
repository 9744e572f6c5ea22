//! Duplicate document detection.
//!
//! Two documents are duplicates when they have the same set of terms;
//! term frequencies and word order are ignored.

use ahash::AHashSet;
use tracing::info;

use crate::document::DocId;
use crate::index::SearchIndex;

/// Ids of documents whose vocabulary equals that of a lower id.
///
/// The lowest id of every group of duplicates is kept; ids are returned in
/// ascending order.
pub fn find_duplicates(index: &SearchIndex) -> Vec<DocId> {
    let mut seen: AHashSet<Vec<&str>> = AHashSet::new();
    let mut duplicates = Vec::new();

    for id in index {
        let vocabulary: Vec<&str> = index
            .word_frequencies(id)
            .keys()
            .map(String::as_str)
            .collect();
        if !seen.insert(vocabulary) {
            duplicates.push(id);
        }
    }

    duplicates
}

/// Remove every duplicate found by [`find_duplicates`], returning the
/// removed ids.
pub fn remove_duplicates(index: &mut SearchIndex) -> Vec<DocId> {
    let duplicates = find_duplicates(index);
    for &id in &duplicates {
        info!(id, "Found duplicate document id {id}");
        index.remove_document(id);
    }
    duplicates
}
