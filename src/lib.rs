#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! Three bounded structures, each with O(1) writes and a hard upper bound on
//! memory:
//!
//! | Structure | Bound | On overflow | Reads |
//! |-----------|-------|-------------|-------|
//! | [`RingBuffer`] | `capacity` items | overwrites the oldest item | by logical index, newest-first scans |
//! | [`LruCache`] | `cap` entries | evicts the least recently used entry | by key, promotes on `get` |
//! | [`SampleCollector`] | `max_samples` values | drops the oldest sample | memoized statistics |
//!
//! ## Ring Buffer
//!
//! ```rust
//! use bounded_rs::RingBuffer;
//! use core::num::NonZeroUsize;
//!
//! let mut log = RingBuffer::new(NonZeroUsize::new(3).unwrap());
//! for line in ["boot", "ready", "request", "shutdown"] {
//!     log.push(line);
//! }
//!
//! assert_eq!(log.to_vec(), vec!["ready", "request", "shutdown"]);
//! assert_eq!(log.peek(), Some(&"shutdown"));
//! assert_eq!(log.get_last(2), vec![&"request", &"shutdown"]);
//! ```
//!
//! ## LRU Cache
//!
//! ```rust
//! use bounded_rs::LruCache;
//! use bounded_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");        // "a" is now most recently used
//! cache.put("c", 3);      // evicts "b"
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! ## Sample Collector
//!
//! Requires the `std` feature (enabled by default).
//!
//! ```rust
//! use bounded_rs::SampleCollector;
//! use bounded_rs::config::{CachePolicy, SampleCollectorConfig};
//! use core::num::NonZeroUsize;
//!
//! let mut latencies = SampleCollector::init(SampleCollectorConfig {
//!     max_samples: NonZeroUsize::new(100).unwrap(),
//!     cache: CachePolicy::Auto,
//!     pre_fill: None,
//! });
//!
//! for ms in [12.0, 15.0, 11.0, 40.0] {
//!     latencies.add(ms);
//! }
//! assert_eq!(latencies.median(), Some(13.5));
//! assert_eq!(latencies.highest(), Some(40.0));
//! ```
//!
//! ## Snapshots
//!
//! Every structure implements [`Durable`]: it reduces to a plain "dry" value and
//! can be rebuilt from one. With the `serde` feature the dry values serialize
//! with any serde format.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `hashbrown` | yes | hashbrown as the LRU index (required without `std`) |
//! | `std` | yes | [`SampleCollector`], [`stats`], timers, wall-clock ring queries |
//! | `serde` | yes | `Serialize`/`Deserialize` on config and dry types |
//! | `nightly` | no | hashbrown nightly optimizations |
//!
//! ## Modules
//!
//! - [`ring_buffer`]: Fixed-capacity circular buffer
//! - [`lru`]: Least Recently Used cache implementation
//! - [`sample_collector`]: Rolling-window statistics (requires `std`)
//! - [`stats`]: Descriptive statistics over a slice (requires `std`)
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - [`durable`]: Snapshot trait
//! - [`error`]: Error type

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(not(any(feature = "hashbrown", feature = "std")))]
compile_error!("bounded-rs needs either the `hashbrown` or the `std` feature for its hash index");

/// Error type shared by every fallible constructor.
pub mod error;

/// Snapshot ("dry") trait implemented by every structure.
pub mod durable;

/// Doubly linked list stored in a slab with index links.
///
/// Internal infrastructure behind [`LruCache`]'s recency order.
pub(crate) mod list;

/// Configuration structures.
pub mod config;

/// Fixed-capacity circular buffer.
///
/// Keeps the most recent `capacity` items, overwriting the oldest on overflow.
pub mod ring_buffer;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// Pure statistics over sample slices.
#[cfg(feature = "std")]
pub mod stats;

/// Rolling-window sample collector built on [`RingBuffer`].
#[cfg(feature = "std")]
pub mod sample_collector;

/// Metrics collection.
///
/// Counters for cache hits, misses, evictions and statistic recomputation,
/// reported through the [`metrics::CacheMetrics`] trait.
pub mod metrics;

pub use durable::Durable;
pub use error::{Error, Result};
pub use lru::LruCache;
pub use metrics::CacheMetrics;
pub use ring_buffer::RingBuffer;
#[cfg(feature = "std")]
pub use sample_collector::{SampleCollector, SampleTimer, StatValue, Statistic};
