#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Type | Description | Requires |
//! |------|-------------|----------|
//! | [`LruCache`] | Single-owner LRU cache | - |
//! | [`SharedLruCache`] | `LruCache` behind one `parking_lot::Mutex` | `concurrent` |
//! | [`LruCacheConfig`](config::LruCacheConfig) | Construction parameters | - |
//! | [`CacheError`] | Construction failure | - |
//!
//! ## Performance Characteristics
//!
//! | Operation | Time | Notes |
//! |-----------|------|-------|
//! | `get` / `get_mut` | O(1) | Promotes the entry to most recently used |
//! | `put` | O(1) | At most one eviction per call |
//! | `peek` / `contains` | O(1) | No promotion |
//! | `remove` / `pop_lru` | O(1) | Slot returns to the free list |
//! | `clear` | O(n) | Drops every entry |
//!
//! ## Storage Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  index: HashMap<K, SlotIndex>                                │
//! │                                                              │
//! │  arena: Vec<Slot<(K, V)>>                                    │
//! │   [0] HEAD sentinel ─▶ MRU ─▶ ... ─▶ LRU ─▶ [1] TAIL sentinel │
//! │   free list: slots released by eviction/removal, reused next │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Links are indices into the arena rather than pointers, so the crate has no
//! `unsafe` code. The sentinels are never exposed and never count towards the
//! capacity.
//!
//! ## Example
//!
//! ```rust
//! use arena_lru::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! # Ok::<(), arena_lru::CacheError>(())
//! ```
//!
//! ## Shared Access
//!
//! Enable the `concurrent` feature for [`SharedLruCache`]:
//!
//! ```toml
//! [dependencies]
//! arena-lru = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The LRU cache
//! - [`config`]: Configuration structures
//! - [`error`]: Error types
//! - [`metrics`]: Metrics collection for cache monitoring
//! - [`concurrent`]: Lock-guarded shared cache (requires `concurrent` feature)

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(all(feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(not(any(feature = "hashbrown", feature = "std")))]
compile_error!("arena-lru needs a hash map: enable the `hashbrown` or the `std` feature");

/// Index-addressed doubly linked list with sentinel slots and a free list.
///
/// Internal storage for [`LruCache`]; not part of the public API.
pub(crate) mod arena;

/// Cache configuration structures.
pub mod config;

/// Error types.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used item when
/// an insertion exceeds the capacity.
pub mod lru;

/// Cache metrics system.
///
/// Counters for hits, misses, insertions, updates, evictions and removals,
/// reported through the [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// Thread-safe shared cache.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
#[cfg_attr(docsrs, doc(cfg(feature = "concurrent")))]
pub mod concurrent;

pub use config::LruCacheConfig;
pub use error::CacheError;
pub use lru::{DefaultHashBuilder, LruCache};
pub use metrics::CacheMetrics;

#[cfg(feature = "concurrent")]
pub use concurrent::SharedLruCache;
