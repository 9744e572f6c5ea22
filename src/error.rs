//! Error types for the Sieve library.
//!
//! Every failure in Sieve is a deterministic input-validation failure or an
//! ambient I/O / configuration problem. All of them are represented by the
//! [`SieveError`] enum so callers can match on the exact cause.
//!
//! # Examples
//!
//! ```
//! use sieve::document::DocumentStatus;
//! use sieve::error::SieveError;
//! use sieve::index::SearchIndex;
//!
//! let mut index = SearchIndex::new(["in", "the"]).unwrap();
//! index.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//!
//! match index.add_document(1, "dog", DocumentStatus::Actual, &[]) {
//!     Err(SieveError::DuplicateId(id)) => assert_eq!(id, 1),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::document::DocId;

/// The main error type for Sieve operations.
#[derive(Error, Debug)]
pub enum SieveError {
    /// A negative document id was supplied.
    #[error("Invalid document id: {0}")]
    InvalidId(DocId),

    /// The document id is already present in the index.
    #[error("Duplicate document id: {0}")]
    DuplicateId(DocId),

    /// The document has no indexable words after stop-word filtering.
    #[error("Document {0} has no indexable words")]
    EmptyDocument(DocId),

    /// The query contains an invalid word.
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// The operation requires a document that is not in the index.
    #[error("Unknown document id: {0}")]
    UnknownDocument(DocId),

    /// A document word or stop word contains a control character.
    #[error("Invalid word: {0:?}")]
    InvalidWord(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed to a helper
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Thread pool construction errors
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// I/O errors (corpus and configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SieveError.
pub type Result<T> = std::result::Result<T, SieveError>;

impl SieveError {
    /// Create a new malformed query error.
    pub fn malformed_query<S: Into<String>>(msg: S) -> Self {
        SieveError::MalformedQuery(msg.into())
    }

    /// Create a new invalid word error.
    pub fn invalid_word<S: Into<String>>(word: S) -> Self {
        SieveError::InvalidWord(word.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SieveError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SieveError::InvalidArgument(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        SieveError::ThreadPool(msg.into())
    }
}
