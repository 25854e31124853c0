//! Shared LRU Cache
//!
//! A thread-safe wrapper that puts an entire [`LruCache`] behind a single
//! `parking_lot::Mutex`.
//!
//! # Why One Lock?
//!
//! Every `get` moves the hit entry to the front of the recency list, and every
//! over-capacity `put` unlinks the global tail, whichever key triggered it.
//! The key index and the recency list must be updated together, so there is
//! no per-key or per-shard locking scheme that keeps a single global LRU
//! order. All operations take the one lock and run to completion while
//! holding it. Nothing blocks inside the critical section.
//!
//! A `Mutex` is used rather than an `RwLock` because lookups mutate the
//! recency order too.
//!
//! # Example
//!
//! ```
//! use arena_lru::SharedLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SharedLruCache::new(1000).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key_{}_{}", t, i);
//!                 cache.put(key.clone(), i);
//!                 assert_eq!(cache.get(&key), Some(i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::lru::{DefaultHashBuilder, LruCache};
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

/// A thread-safe LRU cache guarded by one exclusive lock.
///
/// Values are returned by clone so no reference into the cache outlives the
/// lock. Use [`get_with`](Self::get_with) to read a value in place.
pub struct SharedLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> SharedLruCache<K, V, DefaultHashBuilder> {
    /// Creates an empty shared cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        Self::init(LruCacheConfig { capacity }, None)
    }

    /// Creates an empty shared cache from a configuration, with an optional
    /// hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `config.capacity` is zero.
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, CacheError> {
        LruCache::init(config, hasher).map(Self::from)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SharedLruCache<K, V, S> {
    /// Creates an empty shared cache using `hash_builder` for the key index.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self, CacheError> {
        LruCache::with_hasher(capacity, hash_builder).map(Self::from)
    }

    /// Maximum number of entries the cache holds.
    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value for `key` while holding the lock, marking the
    /// entry most recently used.
    ///
    /// ```
    /// use arena_lru::SharedLruCache;
    ///
    /// let cache = SharedLruCache::new(4).unwrap();
    /// cache.put("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |s| s.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value for `key` while holding
    /// the lock.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.lock().get_mut(key).map(f)
    }

    /// Returns a clone of the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns `true` if `key` is cached. Does not change its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Consumes the wrapper and returns the underlying cache.
    pub fn into_inner(self) -> LruCache<K, V, S> {
        self.inner.into_inner()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> SharedLruCache<K, V, S> {
    /// Inserts or updates `key`, returning the evicted entry if the insert
    /// pushed the cache past capacity.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }
}

impl<K, V, S> From<LruCache<K, V, S>> for SharedLruCache<K, V, S> {
    fn from(cache: LruCache<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for SharedLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "SharedLRU"
    }
}

impl<K, V, S> fmt::Debug for SharedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_struct("SharedLruCache").field("inner", &*cache).finish(),
            None => f
                .debug_struct("SharedLruCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}
