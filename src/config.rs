//! Configuration for a search index.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// Number of hits returned by a top-documents query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are considered tied and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of shards in the parallel relevance accumulator.
pub const DEFAULT_SHARD_COUNT: usize = 100;

/// Configuration for [`SearchIndex`](crate::index::SearchIndex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of hits returned by a ranking query.
    pub max_results: usize,

    /// Relevance tolerance used when breaking ties by rating.
    pub relevance_epsilon: f64,

    /// Shard count of the concurrent accumulator used by parallel ranking.
    pub shard_count: usize,

    /// Size of a dedicated worker pool for parallel operations.
    /// If None, the global rayon pool is used.
    pub num_threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
            shard_count: DEFAULT_SHARD_COUNT,
            num_threads: None,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum number of hits.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the shard count of the parallel accumulator.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Use a dedicated pool of `num_threads` workers.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(SieveError::invalid_config("max_results must be positive"));
        }
        if self.shard_count == 0 {
            return Err(SieveError::invalid_config("shard_count must be positive"));
        }
        if !(self.relevance_epsilon >= 0.0 && self.relevance_epsilon.is_finite()) {
            return Err(SieveError::invalid_config(format!(
                "relevance_epsilon must be a finite non-negative number, got {}",
                self.relevance_epsilon
            )));
        }
        if self.num_threads == Some(0) {
            return Err(SieveError::invalid_config("num_threads cannot be zero"));
        }
        Ok(())
    }
}
