//! Query parsing and document filtering.
//!
//! A raw query is a space-separated list of words. A word prefixed with `-`
//! is a minus term: any document containing it is excluded from the result.
//! All other words are plus terms contributing to relevance.

pub mod parser;
pub mod predicate;

pub use parser::{ParsedQuery, QueryParser, QueryTerm};
pub use predicate::{DocumentPredicate, status_is};
