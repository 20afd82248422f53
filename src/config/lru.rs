//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Sizing Guidelines
//!
//! `capacity` is a hard ceiling on resident entries. Inserting a new key into a
//! full cache evicts the least recently used entry first, so the cache never
//! holds more than `capacity` entries, even transiently.
//!
//! Each entry carries a fixed overhead beyond the key and value: one slot in the
//! node slab (two `Option<usize>` links) plus one hash index entry holding a
//! clone of the key and a `usize` node id.
//!
//! ```text
//! Memory ≈ capacity × (2 × size_of::<K>() + size_of::<V>() + ~48 bytes)
//! ```
//!
//! # Examples
//!
//! ```
//! use bounded_rs::config::LruCacheConfig;
//! use bounded_rs::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Memoization table for the last 256 distinct arguments
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(256).unwrap(),
//! };
//! let cache: LruCache<u64, String> = LruCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when a new key is inserted
/// into a full cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. A zero capacity
///   cannot be expressed; use [`LruCache::try_new`](crate::LruCache::try_new)
///   to validate a runtime `usize`.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a config with the given capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
        assert_eq!(config.capacity(), config.capacity);
    }

    #[test]
    fn test_lru_config_new() {
        let config = LruCacheConfig::new(NonZeroUsize::new(3).unwrap());
        assert_eq!(config.capacity().get(), 3);
    }
}
