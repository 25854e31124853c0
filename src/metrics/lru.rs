//! LRU Cache Metrics

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics for an [`LruCache`](crate::LruCache).
///
/// Adds occupancy figures (`len`, `capacity`, `cache_utilization`) to the core
/// counters. Occupancy is sampled by the cache when a report is built, so it
/// always matches the cache's state at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,
    /// Maximum number of entries.
    pub capacity: usize,
    /// Number of entries at the time of the last snapshot.
    pub len: usize,
}

impl LruCacheMetrics {
    /// Creates zeroed metrics for a cache of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            core: CoreCacheMetrics::new(),
            capacity,
            len: 0,
        }
    }

    /// Fraction of the capacity currently in use, between 0.0 and 1.0.
    pub fn cache_utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.len as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("len".to_string(), self.len as f64);
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
