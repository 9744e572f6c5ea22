//! Building blocks for the parallel execution paths.
//!
//! - [`ConcurrentMap`]: a sharded, lock-per-shard map used to accumulate
//!   relevance from several rayon workers without a single global lock.
//! - [`WorkerPool`]: the rayon pool parallel operations run on.

pub mod concurrent_map;
pub mod pool;

pub use concurrent_map::{ConcurrentMap, ShardKey};
pub use pool::WorkerPool;
