//! Worker pool for parallel index operations.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SieveError};

/// The rayon pool that parallel ranking and removal run on.
///
/// `Global` defers to rayon's global pool; `Dedicated` owns a pool sized by
/// configuration. Either way, [`WorkerPool::install`] blocks the caller
/// until every spawned sub-task has finished.
#[derive(Debug, Clone, Default)]
pub enum WorkerPool {
    #[default]
    Global,
    Dedicated(Arc<ThreadPool>),
}

impl WorkerPool {
    /// Create a pool with `num_threads` workers, or use the global pool when
    /// `None`.
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let Some(num_threads) = num_threads else {
            return Ok(WorkerPool::Global);
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("sieve-worker-{i}"))
            .build()
            .map_err(|e| SieveError::thread_pool(format!("Failed to create thread pool: {e}")))?;

        Ok(WorkerPool::Dedicated(Arc::new(pool)))
    }

    /// Run `op` inside this pool.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            WorkerPool::Global => op(),
            WorkerPool::Dedicated(pool) => pool.install(op),
        }
    }

    /// Number of worker threads available to parallel operations.
    pub fn current_num_threads(&self) -> usize {
        match self {
            WorkerPool::Global => rayon::current_num_threads(),
            WorkerPool::Dedicated(pool) => pool.current_num_threads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_dedicated_pool_size() {
        let pool = WorkerPool::new(Some(3)).unwrap();
        assert_eq!(pool.current_num_threads(), 3);
        let in_pool = pool.install(rayon::current_num_threads);
        assert_eq!(in_pool, 3);
    }

    #[test]
    fn test_install_joins_all_work() {
        let pool = WorkerPool::new(Some(2)).unwrap();
        let sum: u64 = pool.install(|| (1..=100u64).into_par_iter().sum());
        assert_eq!(sum, 5050);

        let sum: u64 = WorkerPool::Global.install(|| (1..=10u64).into_par_iter().sum());
        assert_eq!(sum, 55);
    }
}
