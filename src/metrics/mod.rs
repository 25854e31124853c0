//! Cache Metrics System
//!
//! Each cache keeps a set of counters and reports them through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`. A `BTreeMap` keeps the
//! keys in a fixed order, so two reports of the same state always print the
//! same way.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to every cache implementation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of promoting lookups (`get`/`get_mut`).
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// `put` calls that stored a previously absent key.
    pub insertions: u64,

    /// `put` calls that overwrote the value of a present key.
    pub updates: u64,

    /// Entries dropped because an insertion pushed the cache past capacity.
    pub evictions: u64,

    /// Entries dropped by an explicit `remove` or `pop_lru`.
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed metrics set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup for a missing key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records the insertion of a new key.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an overwrite of an existing key.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Number of lookups that did not find their key.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Hit ratio between 0.0 and 1.0, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss ratio between 0.0 and 1.0, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        let writes = self.insertions + self.updates;
        if writes > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / writes as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics interface for every cache type.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in sorted key order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the cache implementation, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
