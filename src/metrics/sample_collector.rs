//! Sample Collector Metrics
//!
//! Counters describing how well the statistic cache of a
//! [`SampleCollector`](crate::SampleCollector) amortizes recomputation.

extern crate alloc;

use super::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters for a rolling-window sample collector.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SampleCollectorMetrics {
    /// Samples pushed with `add`, including pre-fill and timer samples.
    pub samples_added: u64,
    /// Statistic reads of any kind.
    pub statistic_requests: u64,
    /// Statistic reads answered from the cache.
    pub statistic_cache_hits: u64,
    /// Statistic reads that ran the underlying computation.
    pub computations: u64,
    /// Times the statistic cache was dropped by the add-count threshold.
    pub invalidations: u64,
}

impl SampleCollectorMetrics {
    /// Creates zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a statistic read served from the cache.
    pub fn record_cache_hit(&mut self) {
        self.statistic_requests += 1;
        self.statistic_cache_hits += 1;
    }

    /// Records a statistic read that had to compute.
    pub fn record_computation(&mut self) {
        self.statistic_requests += 1;
        self.computations += 1;
    }

    /// Fraction of statistic reads served from the cache.
    pub fn cache_hit_rate(&self) -> f64 {
        if self.statistic_requests > 0 {
            self.statistic_cache_hits as f64 / self.statistic_requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("cache_hit_rate".to_string(), self.cache_hit_rate());
        metrics.insert("computations".to_string(), self.computations as f64);
        metrics.insert("invalidations".to_string(), self.invalidations as f64);
        metrics.insert("samples_added".to_string(), self.samples_added as f64);
        metrics.insert(
            "statistic_cache_hits".to_string(),
            self.statistic_cache_hits as f64,
        );
        metrics.insert(
            "statistic_requests".to_string(),
            self.statistic_requests as f64,
        );
        metrics
    }
}

impl CacheMetrics for SampleCollectorMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "SampleCollector"
    }
}
