//! The search index: inverted index, document store and their façade.
//!
//! [`SearchIndex`] is the single owner of all mutable state. Mutation goes
//! through `&mut self`, so a partially indexed or partially removed document
//! is never observable; read-only ranking takes `&self` and may run from
//! many threads at once.

pub mod inverted;
pub mod search_index;
pub mod store;

pub use inverted::{InvertedIndex, Postings};
pub use search_index::SearchIndex;
pub use store::{DocIds, DocumentStore, StoredDocument};
