//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU metrics: the core counters plus the number of recency promotions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to key-value caches
    pub core: CoreCacheMetrics,
    /// Hits that moved an entry that was not already most recently used.
    pub promotions: u64,
}

impl LruCacheMetrics {
    /// Creates zeroed LRU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit that moved its entry to the front.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
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
