//! Cache Configuration
//!
//! Configuration structs have public fields for simple instantiation. Values
//! are checked when the cache is built, not when the struct is created, so a
//! config can be assembled from untrusted input and rejected with a
//! [`CacheError`] instead of a panic.
//!
//! # Sizing
//!
//! `capacity` is the maximum number of entries. Construction reserves index
//! and arena storage for `min(capacity, PREALLOC_LIMIT)` entries, so small
//! caches fill without rehashing and a huge capacity costs nothing until it is
//! used. A full cache takes roughly:
//!
//! ```text
//! Total Memory ≈ capacity × (size_of::<(K, V)>() + size_of::<K>() + ~40 bytes)
//! ```
//!
//! See [`PREALLOC_LIMIT`](crate::lru::PREALLOC_LIMIT).
//!
//! # Examples
//!
//! ```
//! use arena_lru::config::LruCacheConfig;
//! use arena_lru::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, i32> = LruCache::init(config, None).unwrap();
//! assert_eq!(cache.cap().get(), 1000);
//! ```

use crate::error::CacheError;
use core::fmt;
use core::num::NonZeroUsize;
use tracing::warn;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Must be at
///   least 1.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Checks the configuration and returns the capacity as a `NonZeroUsize`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn validate(&self) -> Result<NonZeroUsize, CacheError> {
        NonZeroUsize::new(self.capacity).ok_or_else(|| {
            warn!(capacity = self.capacity, "rejecting cache configuration");
            CacheError::InvalidCapacity {
                requested: self.capacity,
            }
        })
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: capacity.get(),
        }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
