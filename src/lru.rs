//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a bounded key-value store with O(1) operations for all
//! common cache operations. When a new key is inserted into a full cache, the
//! entry that was used least recently is evicted to make room.
//!
//! # Algorithm
//!
//! Entries are kept in a doubly linked list ordered by recency: the front is the
//! most recently used entry and the back the least recently used. A hash index
//! maps each key to its list node, so every operation is a constant number of
//! hash lookups and link splices:
//!
//! - **lookup**: hash index
//! - **promotion**: unlink the node and relink it at the front
//! - **eviction**: drop the back node
//!
//! List nodes live in a slab and link to each other by index rather than by
//! pointer. The hash index stores node ids.
//!
//! # Recency Rules
//!
//! - [`LruCache::get`] and [`LruCache::get_mut`] promote the entry. A read that
//!   writes: callers sharing a cache must treat `get` as a mutation.
//! - [`LruCache::put`] always leaves its key as the most recently used entry.
//! - [`LruCache::peek`] and [`LruCache::contains`] never change recency.
//!
//! Eviction only happens when `put` introduces a key that is not resident while
//! the cache is full, and the victim is always the back of the list. There is no
//! frequency weighting and no time-based expiry; callers that care about
//! staleness layer it on top.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get / Peek / Contains: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!   - Iteration: O(n)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a synchronization primitive such as `Mutex`.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::durable::Durable;
use crate::error::{Error, Result};
use crate::list::{List, ListIter, NodeId};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use tracing::{trace, warn};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and removing entries. When the cache reaches capacity,
/// the least recently used entry will be evicted to make room for new entries.
///
/// # Examples
///
/// ```
/// use bounded_rs::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert!(!cache.contains(&"banana"));
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, NodeId, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a runtime capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `cap` is zero. A cache that can
    /// hold nothing would evict every entry as it is inserted, which is never
    /// what a caller meant.
    pub fn try_new(cap: usize) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        match NonZeroUsize::new(cap) {
            Some(cap) => Ok(LruCache::new(cap)),
            None => {
                warn!(capacity = cap, "rejected LRU cache capacity");
                Err(Error::InvalidCapacity {
                    structure: "LruCache",
                    capacity: cap,
                })
            }
        }
    }

    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = cap.get().next_power_of_two();
        LruCache {
            config: LruCacheConfig::new(cap),
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
    }

    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Counters recorded by this cache.
    #[inline]
    pub fn cache_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Promotes `node` to the front, recording the hit.
    fn touch(&mut self, node: NodeId) {
        if self.list.front() != Some(node) {
            self.metrics.record_promotion();
            self.list.move_to_front(node);
        }
        self.metrics.core.record_hit();
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.touch(node);
                self.list.get(node).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns a mutable reference to the value for `key` and marks it most
    /// recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.touch(node);
                self.list.get_mut(node).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without touching recency or metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.list.get(node).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is resident. Does not touch recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Removes `key` and returns its value. No-op if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        let (_, value) = self.list.remove(node)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    /// Drops every entry. Capacity and metrics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Iterates `(key, value)` pairs from most to least recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates values from most to least recently used.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Calls `f(value, key, self)` for each entry, most recently used first.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K, &Self),
    {
        for (k, v) in self.iter() {
            f(v, k, self);
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts `value` under `key` as the most recently used entry.
    ///
    /// If `key` was resident, its old node is dropped and the previous
    /// `(key, value)` pair is returned. Otherwise, if the cache was full, the
    /// least recently used entry is evicted before the new one is linked and
    /// the evicted pair is returned. The cache never holds more than
    /// [`cap`](Self::cap) entries.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        let mut displaced = None;

        if let Some(node) = self.map.remove(&key) {
            displaced = self.list.remove(node);
        } else if self.list.is_full() {
            if let Some((old_key, old_value)) = self.list.remove_last() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
                trace!(
                    capacity = self.cap().get(),
                    "evicted least recently used entry"
                );
                displaced = Some((old_key, old_value));
            }
        }

        if let Some(node) = self.list.add((key.clone(), value)) {
            self.map.insert(key, node);
            self.metrics.core.record_insertion();
        }

        displaced
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity())
            .field("len", &self.list.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Most-recent-first iterator over an [`LruCache`].
pub struct Iter<'a, K, V> {
    inner: ListIter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Snapshot of an [`LruCache`]: capacity and entries, most recently used first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LruCacheDry<K, V> {
    /// Capacity of the captured cache.
    pub capacity: usize,
    /// Entries, most recently used first.
    pub entries: Vec<(K, V)>,
}

impl<K, V, S> Durable for LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    type Dry = LruCacheDry<K, V>;

    fn to_dry(&self) -> LruCacheDry<K, V> {
        LruCacheDry {
            capacity: self.cap().get(),
            entries: self.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    /// Replays `put` from the least recently used entry forward, which
    /// reproduces the captured recency order. Metrics start from zero.
    fn from_dry(dry: LruCacheDry<K, V>) -> Result<Self> {
        let cap = NonZeroUsize::new(dry.capacity).ok_or(Error::InvalidCapacity {
            structure: "LruCache",
            capacity: dry.capacity,
        })?;
        let mut cache = LruCache::with_hasher(cap, S::default());
        for (k, v) in dry.entries.into_iter().rev() {
            cache.put(k, v);
        }
        cache.metrics = LruCacheMetrics::new();
        Ok(cache)
    }
}
