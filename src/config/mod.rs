//! Configuration Module
//!
//! This module provides configuration structures for the collections in this crate.
//! Each structure that takes more than a bare capacity has its own config struct
//! with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: Capacities are `NonZeroUsize`, so a zero-sized structure
//!   cannot be configured
//! - **Serializable**: With the `serde` feature, configs can travel inside snapshots
//!
//! # Configs
//!
//! | Config | Structure | Description |
//! |--------|-----------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used cache |
//! | `SampleCollectorConfig` | `SampleCollector` | Rolling-window statistics (requires `std`) |
//!
//! [`RingBuffer`](crate::RingBuffer) is configured by its capacity alone.
//!
//! # Examples
//!
//! ```
//! use bounded_rs::config::LruCacheConfig;
//! use bounded_rs::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//!
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//! ```

pub mod lru;
#[cfg(feature = "std")]
pub mod sample_collector;

pub use lru::LruCacheConfig;
#[cfg(feature = "std")]
pub use sample_collector::{CachePolicy, SampleCollectorConfig};
