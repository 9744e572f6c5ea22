//! Sharded concurrent map.
//!
//! The key space is partitioned into a fixed number of shards by
//! `key mod shard_count`. Every shard is an ordinary ordered map behind its
//! own [`parking_lot::Mutex`], so workers updating keys that live in
//! different shards never contend.
//!
//! Single-key operations ([`ConcurrentMap::accumulate`],
//! [`ConcurrentMap::erase`], ...) lock exactly one shard. Only
//! [`ConcurrentMap::build_ordinary_map`] locks every shard, always in
//! ascending shard order, which keeps concurrent snapshots deadlock-free.
//!
//! Updates to the same key from different threads are never lost, but the
//! relative order of an `accumulate` and an `erase` racing on one key is
//! unspecified. Callers that need "erase after all accumulates" must
//! sequence the two phases themselves, as ranking does.
//!
//! Once every worker has joined, the owner can take the result with
//! [`ConcurrentMap::into_ordinary_map`], which needs no locks and no clones;
//! ranking finishes this way. [`ConcurrentMap::build_ordinary_map`] is the
//! locking snapshot for callers that keep the map alive afterwards.
//!
//! # Examples
//!
//! ```
//! use sieve::parallel::ConcurrentMap;
//!
//! let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(4).unwrap();
//! std::thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for id in 0..10 {
//!                 map.accumulate(id, 0.5);
//!             }
//!         });
//!     }
//! });
//! map.erase(&3);
//!
//! let merged = map.build_ordinary_map();
//! assert_eq!(merged.len(), 9);
//! assert_eq!(merged[&0], 2.0);
//!
//! // Workers are done, so the map can be consumed without locking.
//! assert_eq!(map.into_ordinary_map(), merged);
//! ```

use std::collections::BTreeMap;
use std::ops::AddAssign;

use parking_lot::Mutex;

use crate::error::{Result, SieveError};

/// Keys that can be assigned to a shard by `key mod shard_count`.
pub trait ShardKey: Ord + Copy + Send {
    /// Index of the shard owning this key, in `0..shard_count`.
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShardKey for $t {
                fn shard_index(&self, shard_count: usize) -> usize {
                    (*self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A map split into independently locked shards.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// Create a new map with `shard_count` shards.
    pub fn new(shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(SieveError::invalid_config("shard count cannot be zero"));
        }
        let shards = (0..shard_count)
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        Ok(ConcurrentMap { shards })
    }

    /// Get the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard_index(self.shards.len())]
    }

    /// Run `f` on the value stored under `key`, inserting `V::default()`
    /// first if the key is absent. Only the owning shard is locked, for the
    /// duration of `f`.
    pub fn update<R>(&self, key: K, f: impl FnOnce(&mut V) -> R) -> R
    where
        V: Default,
    {
        let mut shard = self.shard(&key).lock();
        f(shard.entry(key).or_default())
    }

    /// Add `delta` to the value under `key`, starting from `V::default()`.
    pub fn accumulate(&self, key: K, delta: V)
    where
        V: Default + AddAssign,
    {
        self.update(key, |value| *value += delta);
    }

    /// Remove `key`, returning its value if it was present.
    pub fn erase(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Get a copy of the value under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.shard(key).lock().contains_key(key)
    }

    /// Total number of entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Check if every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Merge all shards into one ordered map.
    ///
    /// All shards are locked in ascending order before merging, so the
    /// result is a consistent snapshot with keys in ascending order.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let guards: Vec<_> = self.shards.iter().map(|shard| shard.lock()).collect();
        let mut merged = BTreeMap::new();
        for guard in &guards {
            merged.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Consume the map and merge its shards without cloning values.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}
