//! Higher-level helpers built on the public [`SearchIndex`] interface.
//!
//! None of these touch index internals that affect consistency: the request
//! history only reads, the duplicate remover goes through
//! [`SearchIndex::remove_document`], and the batch helper runs one ranking
//! call per query.
//!
//! [`SearchIndex`]: crate::index::SearchIndex
//! [`SearchIndex::remove_document`]: crate::index::SearchIndex::remove_document

pub mod batch;
pub mod dedup;
pub mod request_queue;

pub use batch::{process_queries, process_queries_joined};
pub use dedup::{find_duplicates, remove_duplicates};
pub use request_queue::RequestQueue;
