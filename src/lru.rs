//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity cache with O(1) `get` and `put`. When an insertion pushes
//! the cache past its capacity, the entry that was touched least recently is
//! evicted.
//!
//! # Algorithm
//!
//! Entries live in an index-addressed arena threaded into a doubly linked
//! list, ordered from most to least recently used. A hash map from key to
//! arena slot gives O(1) lookup. Every `get` or `put` on a key unlinks its
//! slot and relinks it at the front; the eviction candidate is always the
//! slot in front of the tail sentinel.
//!
//! ```text
//!   map: { "a" → 3, "b" → 2, "c" → 4 }
//!
//!   ┌──────┐   ┌─────┐   ┌─────┐   ┌─────┐   ┌──────┐
//!   │ HEAD │ ⇄ │ [4] │ ⇄ │ [3] │ ⇄ │ [2] │ ⇄ │ TAIL │
//!   └──────┘   │  c  │   │  a  │   │  b  │   └──────┘
//!              └─────┘   └─────┘   └─────┘
//!                MRU                 LRU → evicted next
//! ```
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!   - Clear: O(n)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the number of cached entries. Construction reserves
//!     room for at most [`PREALLOC_LIMIT`] entries; larger caches grow their
//!     storage as they fill.
//!
//! # Thread Safety
//!
//! `LruCache` is not internally synchronized; every promoting operation takes
//! `&mut self`. For shared access use
//! [`SharedLruCache`](crate::SharedLruCache) (feature `concurrent`), which puts
//! the whole cache behind one lock.

use crate::arena::{self, Arena, SlotIndex};
use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(all(feature = "std", not(feature = "hashbrown")))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(all(feature = "std", not(feature = "hashbrown")))]
use std::collections::HashMap;

/// Upper bound on the entries a constructor reserves storage for.
///
/// A cache with a larger capacity starts with this much room and grows while
/// it fills, so a huge capacity never allocates up front.
pub const PREALLOC_LIMIT: usize = 4096;

/// A fixed-capacity Least Recently Used cache.
///
/// # Examples
///
/// ```
/// use arena_lru::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    cap: NonZeroUsize,
    map: HashMap<K, SlotIndex, S>,
    arena: Arena<(K, V)>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V, DefaultHashBuilder> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        Self::init(LruCacheConfig { capacity }, None)
    }

    /// Creates an empty cache from a configuration, with an optional hash
    /// builder. `None` uses [`DefaultHashBuilder::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `config.capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_lru::config::LruCacheConfig;
    /// use arena_lru::{CacheError, LruCache};
    ///
    /// let cache: LruCache<u64, String> = LruCache::init(LruCacheConfig { capacity: 64 }, None)?;
    /// assert!(cache.is_empty());
    ///
    /// let err = LruCache::<u64, String>::init(LruCacheConfig { capacity: 0 }, None).unwrap_err();
    /// assert_eq!(err, CacheError::InvalidCapacity { requested: 0 });
    /// # Ok::<(), CacheError>(())
    /// ```
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, CacheError> {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates an empty cache using `hash_builder` for the key index.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self, CacheError> {
        let cap = LruCacheConfig { capacity }.validate()?;
        // An over-capacity insert briefly holds one entry more than `cap`.
        let reserve = cap.get().min(PREALLOC_LIMIT) + 1;
        debug!(capacity = cap.get(), "creating LRU cache");
        Ok(LruCache {
            cap,
            map: HashMap::with_capacity_and_hasher(reserve, hash_builder),
            arena: Arena::with_capacity(reserve),
            metrics: LruCacheMetrics::new(cap.get()),
        })
    }

    /// Maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Number of entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.promote(key)?;
        self.arena.get(idx).map(|(_, v)| v)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.promote(key)?;
        self.arena.get_mut(idx).map(|(_, v)| v)
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = *self.map.get(key)?;
        self.arena.get(idx).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is cached. Does not change its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the entry that the next over-capacity insert would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let idx = self.arena.back()?;
        self.arena.get(idx).map(|(k, v)| (k, v))
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.map.remove(key)?;
        let (_, value) = self.arena.remove(idx)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.arena.pop_back()?;
        self.map.remove(&key);
        self.metrics.core.record_removal();
        Some((key, value))
    }

    /// Drops every entry. Capacity and metrics counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.arena.clear();
        debug_assert!(self.arena.is_empty());
    }

    /// Iterates entries from most to least recently used without promoting
    /// them.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.arena.iter(),
        }
    }

    /// Returns a snapshot of the cache's metrics.
    pub fn lru_metrics(&self) -> LruCacheMetrics {
        let mut snapshot = self.metrics.clone();
        snapshot.len = self.len();
        snapshot
    }

    /// Looks `key` up, moves its slot to the front and records the outcome.
    fn promote<Q>(&mut self, key: &Q) -> Option<SlotIndex>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.arena.move_to_front(idx);
                self.metrics.core.record_hit();
                Some(idx)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Updating a present key overwrites its value and never evicts. Inserting
    /// a new key into a full cache evicts exactly one entry, the least
    /// recently used one, and returns it.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            self.arena.move_to_front(idx);
            if let Some(entry) = self.arena.get_mut(idx) {
                entry.1 = value;
            }
            self.metrics.core.record_update();
            return None;
        }

        let idx = self.arena.push_front((key.clone(), value));
        self.map.insert(key, idx);
        self.metrics.core.record_insertion();

        if self.map.len() > self.cap.get() {
            return self.evict();
        }
        None
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.arena.pop_back()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction();
        trace!(len = self.map.len(), "evicted least recently used entry");
        Some((key, value))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.lru_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.cap)
            .field("len", &self.arena.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over the entries of an [`LruCache`], most recently used first.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: arena::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn keys<K: Clone + Hash + Eq, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    fn assert_consistent<K: Hash + Eq, V>(cache: &LruCache<K, V>) {
        cache.arena.assert_consistent();
        assert_eq!(cache.map.len(), cache.arena.len());
        assert!(cache.map.len() <= cache.cap.get());
        for (key, &idx) in cache.map.iter() {
            let (stored, _) = cache.arena.get(idx).expect("indexed slot is empty");
            assert!(stored == key, "index points at a slot holding another key");
        }
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(2).unwrap();
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.put("apple", 3), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.put("cherry", 4), Some(("banana", 2)));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_rejects_zero_capacity() {
        let result = LruCache::<i32, i32>::new(0);
        assert_eq!(
            result.unwrap_err(),
            CacheError::InvalidCapacity { requested: 0 }
        );
    }

    #[test]
    fn test_lru_huge_capacity_reserves_lazily() {
        let mut cache = LruCache::new(usize::MAX).unwrap();
        assert_eq!(cache.cap().get(), usize::MAX);
        assert!(cache.map.capacity() <= 2 * (PREALLOC_LIMIT + 1));

        assert_eq!(cache.put(7u32, 70u32), None);
        assert_eq!(cache.get(&7), Some(&70));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_grows_past_prealloc_limit() {
        let cap = PREALLOC_LIMIT * 2;
        let mut cache = LruCache::new(cap).unwrap();
        for i in 0..=cap {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), cap);
        assert_eq!(cache.peek(&0), None);
        assert_eq!(cache.peek(&cap), Some(&cap));
        assert_eq!(cache.arena.slot_count(), cap + 3);
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut cache = LruCache::new(1).unwrap();
        assert_eq!(cache.put(1, "one"), None);
        assert_eq!(cache.put(2, "two"), Some((1, "one")));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"two"));
        assert_eq!(cache.put(2, "deux"), None);
        assert_eq!(cache.get(&2), Some(&"deux"));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_miss_does_not_reorder() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);
        let before = keys(&cache);
        for _ in 0..3 {
            assert_eq!(cache.get(&99), None);
        }
        assert_eq!(keys(&cache), before);
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_peek_and_contains_do_not_promote() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert!(cache.contains(&"a"));
        assert_eq!(cache.peek_lru(), Some((&"a", &1)));
        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.peek(&"a"), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);
        assert_eq!(cache.put("cherry", 3), None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_pop_lru() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, 'a');
        cache.put(2, 'b');
        cache.put(3, 'c');
        cache.get(&1);
        assert_eq!(cache.pop_lru(), Some((2, 'b')));
        assert_eq!(cache.pop_lru(), Some((3, 'c')));
        assert_eq!(cache.pop_lru(), Some((1, 'a')));
        assert_eq!(cache.pop_lru(), None);
        assert!(cache.is_empty());
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.peek_lru(), None);
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_iter_order() {
        let mut cache = LruCache::new(4).unwrap();
        for i in 0..4 {
            cache.put(i, i * 10);
        }
        cache.get(&1);
        assert_eq!(keys(&cache), [1, 3, 2, 0]);
        let reversed: Vec<_> = cache.iter().rev().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(reversed, [(0, 0), (2, 20), (3, 30), (1, 10)]);
        assert_eq!(cache.iter().len(), 4);
        let mut count = 0;
        for _ in &cache {
            count += 1;
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = LruCache::new(2).unwrap();
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        assert_eq!(cache.get(&key2), Some(&2));
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
    }

    #[test]
    fn test_lru_slot_reuse_after_churn() {
        let mut cache = LruCache::new(3).unwrap();
        for i in 0..100 {
            cache.put(i, i);
            if i > 0 && i % 7 == 0 {
                cache.remove(&(i - 1));
            }
            assert_consistent(&cache);
        }
        // two sentinels, three entries, one transient over-capacity entry
        assert!(cache.arena.slot_count() <= 6);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(2).unwrap();
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &0.0);
        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple");
        cache.get(&"banana");
        cache.get(&"durian");
        cache.put("apple", 5);
        cache.put("cherry", 3);
        let metrics = cache.metrics();
        assert_eq!(metrics["cache_hits"], 2.0);
        assert_eq!(metrics["cache_misses"], 1.0);
        assert_eq!(metrics["requests"], 3.0);
        assert_eq!(metrics["insertions"], 3.0);
        assert_eq!(metrics["updates"], 1.0);
        assert_eq!(metrics["evictions"], 1.0);
        assert_eq!(metrics["len"], 2.0);
        assert_eq!(metrics["cache_utilization"], 1.0);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_custom_hasher() {
        let mut cache: LruCache<u32, u32, DefaultHashBuilder> =
            LruCache::with_hasher(2, DefaultHashBuilder::default()).unwrap();
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_lru_debug() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, 1);
        assert_eq!(
            alloc::format!("{cache:?}"),
            "LruCache { capacity: 3, len: 1 }"
        );
    }

    #[test]
    fn test_lru_concurrent_access() {
        extern crate std;
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LruCache::new(100).unwrap()));
        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let key = alloc::format!("thread_{}_key_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    guard.put(key.clone(), t * 1000 + i);
                    let _ = guard.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert_eq!(guard.len(), 100);
        assert_consistent(&*guard);
    }

    #[test]
    fn test_lru_default_hash_builder() {
        let mut cache: LruCache<&str, i32> =
            LruCache::with_hasher(2, DefaultHashBuilder::default()).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(keys(&cache), ["c", "b"]);
        assert_consistent(&cache);
    }

    #[cfg(all(feature = "std", not(feature = "hashbrown")))]
    #[test]
    fn test_lru_std_hash_map_fallback() {
        use std::collections::hash_map::RandomState;

        let mut cache: LruCache<u8, u8, RandomState> =
            LruCache::with_hasher(1, RandomState::new()).unwrap();
        assert_eq!(cache.put(1, 1), None);
        assert_eq!(cache.put(2, 2), Some((1, 1)));
        assert_consistent(&cache);
    }
}
