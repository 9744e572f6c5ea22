//! Ranking: TF-IDF relevance, filtering and top-K ordering.
//!
//! One algorithm serves both execution policies. Sequential ranking
//! accumulates relevance in an ordinary ordered map; parallel ranking fans
//! the query terms out over the worker pool and accumulates into a
//! [`ConcurrentMap`](crate::parallel::ConcurrentMap). In both cases minus
//! terms are applied only after every plus term has been accumulated.

pub mod execution;
pub mod ranking;

pub use execution::ExecutionPolicy;
pub use ranking::sort_by_relevance;
