//! # Sieve
//!
//! An in-memory TF-IDF document search index.
//!
//! ## Features
//!
//! - Plus/minus keyword queries with stop-word filtering
//! - Top-k ranking by TF-IDF relevance with rating tie-breaks
//! - Status and arbitrary predicate filters
//! - Sequential and rayon-parallel ranking, matching and removal
//! - Sharded concurrent accumulator for parallel relevance
//! - Request history, duplicate removal, batch queries and pagination
//!
//! ## Example
//!
//! ```
//! use sieve::prelude::*;
//!
//! let mut index = SearchIndex::from_stop_words_text("and in on").unwrap();
//! index.add_document(1, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! index.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//!
//! let hits = index.find_top_documents("fluffy cat").unwrap();
//! assert_eq!(hits[0].id, 2);
//!
//! let parallel = index
//!     .find_top_documents_policy(ExecutionPolicy::Parallel, "fluffy cat")
//!     .unwrap();
//! assert_eq!(parallel.len(), hits.len());
//! assert_eq!(parallel[0].id, 2);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod parallel;
pub mod query;
pub mod search;
pub mod service;
pub mod util;

pub mod prelude {
    pub use crate::analysis::{SpaceTokenizer, StopWords, Tokenizer};
    pub use crate::config::SearchConfig;
    pub use crate::document::{DocId, Document, DocumentData, DocumentStatus, Rating};
    pub use crate::error::{Result, SieveError};
    pub use crate::index::SearchIndex;
    pub use crate::parallel::ConcurrentMap;
    pub use crate::query::{DocumentPredicate, status_is};
    pub use crate::search::ExecutionPolicy;
    pub use crate::service::{
        RequestQueue, process_queries, process_queries_joined, remove_duplicates,
    };
    pub use crate::util::{Paginator, paginate};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
