//! Error types returned by cache constructors.
//!
//! Lookups never fail: a missing key is reported as `None`. The only fallible
//! step is building a cache, which rejects a capacity of zero.

use thiserror::Error;

/// Errors produced while constructing a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The requested capacity cannot hold a single entry.
    #[error("invalid cache capacity: {requested} (capacity must be at least 1)")]
    InvalidCapacity {
        /// The capacity that was passed to the constructor.
        requested: usize,
    },
}
