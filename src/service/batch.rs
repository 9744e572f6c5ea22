//! Batch query execution.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::index::SearchIndex;

/// Run [`SearchIndex::find_top_documents`] for every query in parallel.
///
/// Results are returned in query order. The first malformed query fails
/// the whole batch.
pub fn process_queries<S>(index: &SearchIndex, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    index.pool.install(|| {
        queries
            .par_iter()
            .map(|query| index.find_top_documents(query.as_ref()))
            .collect()
    })
}

/// [`process_queries`] with all results concatenated in query order.
pub fn process_queries_joined<S>(index: &SearchIndex, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(index, queries)?
        .into_iter()
        .flatten()
        .collect())
}
