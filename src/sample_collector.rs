//! Rolling-window sample collector with memoized statistics.
//!
//! A [`SampleCollector`] keeps the most recent `max_samples` values in a
//! [`RingBuffer`] and answers descriptive statistics over that window. Computing
//! a median or deviation is a full pass (or a sort) over the window, which is
//! wasteful when samples arrive once per request, so computed statistics are
//! reused until enough new samples have been added.
//!
//! # Cache Invalidation
//!
//! With caching enabled (see [`CachePolicy`](crate::config::CachePolicy)), each statistic is computed on
//! its first read and stored. Every [`add`](SampleCollector::add) increments a
//! counter; once the counter exceeds the threshold while anything is cached,
//! the whole statistic cache is dropped and the counter resets. A statistic can
//! therefore lag the window by at most `threshold` additions:
//!
//! ```
//! use bounded_rs::config::{CachePolicy, SampleCollectorConfig};
//! use bounded_rs::SampleCollector;
//! use core::num::NonZeroUsize;
//!
//! let mut collector = SampleCollector::init(SampleCollectorConfig {
//!     max_samples: NonZeroUsize::new(8).unwrap(),
//!     cache: CachePolicy::After(2),
//!     pre_fill: None,
//! });
//!
//! collector.add(4.0);
//! collector.clear_cache();
//! assert_eq!(collector.mean(), Some(4.0));
//!
//! collector.add(8.0);
//! collector.add(8.0);
//! assert_eq!(collector.mean(), Some(4.0)); // stale, within threshold
//!
//! collector.add(8.0);
//! assert_eq!(collector.mean(), Some(7.0)); // threshold exceeded, recomputed
//! ```
//!
//! The ordered [`samples`](SampleCollector::samples) view is never stale: it is
//! rebuilt after every addition.

use crate::config::SampleCollectorConfig;
use crate::durable::Durable;
use crate::error::Result;
use crate::metrics::{CacheMetrics, SampleCollectorMetrics};
use crate::ring_buffer::RingBuffer;
use crate::stats;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// A statistic a [`SampleCollector`] can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statistic {
    Lowest,
    Highest,
    Mean,
    Median,
    Variance,
    Deviation,
    Standardize,
    Lowpass,
}

impl Statistic {
    /// Every statistic, in declaration order.
    pub const ALL: [Statistic; 8] = [
        Statistic::Lowest,
        Statistic::Highest,
        Statistic::Mean,
        Statistic::Median,
        Statistic::Variance,
        Statistic::Deviation,
        Statistic::Standardize,
        Statistic::Lowpass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Lowest => "lowest",
            Statistic::Highest => "highest",
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Variance => "variance",
            Statistic::Deviation => "deviation",
            Statistic::Standardize => "standardize",
            Statistic::Lowpass => "lowpass",
        }
    }

    /// Computes this statistic over `samples`.
    pub fn compute(self, samples: &[f64]) -> StatValue {
        match self {
            Statistic::Lowest => StatValue::Scalar(stats::lowest(samples)),
            Statistic::Highest => StatValue::Scalar(stats::highest(samples)),
            Statistic::Mean => StatValue::Scalar(stats::mean(samples)),
            Statistic::Median => StatValue::Scalar(stats::median(samples)),
            Statistic::Variance => StatValue::Scalar(stats::variance(samples)),
            Statistic::Deviation => StatValue::Scalar(stats::deviation(samples)),
            Statistic::Standardize => StatValue::Series(stats::standardize(samples)),
            Statistic::Lowpass => StatValue::Series(stats::lowpass(samples)),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a [`Statistic`]: a single value or one value per sample.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    /// `None` for an empty window.
    Scalar(Option<f64>),
    /// Empty for an empty window.
    Series(Vec<f64>),
}

impl StatValue {
    /// The scalar value, `None` for an empty window or a series.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatValue::Scalar(v) => *v,
            StatValue::Series(_) => None,
        }
    }

    /// The series, `None` for a scalar.
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            StatValue::Series(v) => Some(v),
            StatValue::Scalar(_) => None,
        }
    }

    /// Consumes the value, returning the series or an empty `Vec` for a scalar.
    pub fn into_series(self) -> Vec<f64> {
        match self {
            StatValue::Series(v) => v,
            StatValue::Scalar(_) => Vec::new(),
        }
    }
}

/// Rolling window of numeric samples with memoized statistics.
///
/// Statistic accessors take `&mut self` because they fill the cache.
///
/// # Examples
///
/// ```
/// use bounded_rs::SampleCollector;
///
/// // Defaults: 10 samples, pre-filled with 0.0
/// let mut collector = SampleCollector::new();
/// assert_eq!(collector.len(), 10);
///
/// for v in [10.0, 20.0, 30.0] {
///     collector.add(v);
/// }
/// assert_eq!(collector.highest(), Some(30.0));
/// assert_eq!(collector.mean(), Some(6.0));
/// ```
pub struct SampleCollector {
    config: SampleCollectorConfig,
    threshold: Option<usize>,
    ring: RingBuffer<f64>,
    samples: Option<Vec<f64>>,
    cached: BTreeMap<Statistic, StatValue>,
    new_values: usize,
    metrics: SampleCollectorMetrics,
}

impl SampleCollector {
    /// Creates a collector with [`SampleCollectorConfig::default`].
    pub fn new() -> Self {
        Self::init(SampleCollectorConfig::default())
    }

    /// Creates a collector from `config`, pre-filling the window if asked.
    ///
    /// Pre-fill values do not count towards the invalidation threshold.
    pub fn init(config: SampleCollectorConfig) -> Self {
        let mut ring = RingBuffer::new(config.max_samples);
        let mut metrics = SampleCollectorMetrics::new();
        if let Some(fill) = config.pre_fill {
            ring.extend(core::iter::repeat(fill).take(config.max_samples.get()));
            metrics.samples_added = config.max_samples.get() as u64;
        }
        SampleCollector {
            threshold: config.change_cache_after(),
            config,
            ring,
            samples: None,
            cached: BTreeMap::new(),
            new_values: 0,
            metrics,
        }
    }

    /// Options the collector was built with.
    pub fn config(&self) -> &SampleCollectorConfig {
        &self.config
    }

    /// Number of samples currently in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Window size.
    #[inline]
    pub fn max_samples(&self) -> usize {
        self.ring.capacity()
    }

    /// Whether computed statistics are reused between reads.
    #[inline]
    pub fn is_caching(&self) -> bool {
        self.threshold.is_some()
    }

    /// Counters recorded by this collector.
    pub fn collector_metrics(&self) -> &SampleCollectorMetrics {
        &self.metrics
    }

    /// Adds a sample, dropping the oldest one if the window is full.
    pub fn add(&mut self, value: f64) {
        self.ring.push(value);
        self.samples = None;
        self.metrics.samples_added += 1;

        let Some(threshold) = self.threshold else {
            return;
        };
        self.new_values += 1;
        if self.new_values > threshold && !self.cached.is_empty() {
            debug!(
                threshold,
                new_values = self.new_values,
                cached = self.cached.len(),
                "invalidating cached statistics"
            );
            self.cached.clear();
            self.new_values = 0;
            self.metrics.invalidations += 1;
        }
    }

    /// The window, oldest sample first.
    pub fn samples(&mut self) -> &[f64] {
        let ring = &self.ring;
        self.samples.get_or_insert_with(|| ring.to_vec())
    }

    /// Reads `statistic`, from the cache when caching is enabled and a value
    /// has been computed since the last invalidation.
    pub fn stat(&mut self, statistic: Statistic) -> StatValue {
        if self.threshold.is_some() {
            if let Some(value) = self.cached.get(&statistic) {
                self.metrics.record_cache_hit();
                return value.clone();
            }
        }
        self.metrics.record_computation();
        let value = statistic.compute(self.samples());
        if self.threshold.is_some() {
            self.cached.insert(statistic, value.clone());
        }
        value
    }

    pub fn lowest(&mut self) -> Option<f64> {
        self.stat(Statistic::Lowest).as_scalar()
    }

    pub fn highest(&mut self) -> Option<f64> {
        self.stat(Statistic::Highest).as_scalar()
    }

    pub fn mean(&mut self) -> Option<f64> {
        self.stat(Statistic::Mean).as_scalar()
    }

    /// Median; the mean of the middle pair for an even-sized window.
    pub fn median(&mut self) -> Option<f64> {
        self.stat(Statistic::Median).as_scalar()
    }

    /// Population variance of the window.
    pub fn variance(&mut self) -> Option<f64> {
        self.stat(Statistic::Variance).as_scalar()
    }

    /// Population standard deviation of the window.
    pub fn deviation(&mut self) -> Option<f64> {
        self.stat(Statistic::Deviation).as_scalar()
    }

    /// Z-score of each sample, oldest first.
    pub fn standardize(&mut self) -> Vec<f64> {
        self.stat(Statistic::Standardize).into_series()
    }

    /// Low-pass filtered window, oldest first. See [`stats::lowpass`].
    pub fn lowpass(&mut self) -> Vec<f64> {
        self.stat(Statistic::Lowpass).into_series()
    }

    /// Drops every cached statistic and resets the invalidation counter.
    pub fn clear_cache(&mut self) {
        debug!(cached = self.cached.len(), "clearing statistic cache");
        self.cached.clear();
        self.samples = None;
        self.new_values = 0;
    }

    /// Starts a timer whose [`record`](SampleTimer::record) adds the elapsed
    /// milliseconds as a sample.
    ///
    /// ```
    /// use bounded_rs::SampleCollector;
    ///
    /// let mut latencies = SampleCollector::new();
    /// let timer = latencies.start_timer();
    /// // ... handle a request ...
    /// let ms = timer.record(&mut latencies);
    /// assert!(ms >= 0.0);
    /// assert_eq!(latencies.samples().last(), Some(&ms));
    /// ```
    pub fn start_timer(&self) -> SampleTimer {
        SampleTimer::start()
    }
}

impl Default for SampleCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SampleCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleCollector")
            .field("max_samples", &self.ring.capacity())
            .field("len", &self.ring.len())
            .field("cache", &self.config.cache)
            .field("cached", &self.cached.len())
            .finish()
    }
}

impl CacheMetrics for SampleCollector {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

/// Stopwatch returned by [`SampleCollector::start_timer`].
#[derive(Debug, Clone, Copy)]
#[must_use = "a timer records nothing until `record` is called"]
pub struct SampleTimer {
    started: Instant,
}

impl SampleTimer {
    fn start() -> Self {
        SampleTimer {
            started: Instant::now(),
        }
    }

    /// Milliseconds since the timer was started.
    pub fn elapsed_millis(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Adds the elapsed milliseconds to `collector` and returns them.
    pub fn record(self, collector: &mut SampleCollector) -> f64 {
        let ms = self.elapsed_millis();
        collector.add(ms);
        ms
    }
}

/// Snapshot of a [`SampleCollector`]: its options and window, oldest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleCollectorDry {
    pub options: SampleCollectorConfig,
    pub samples: Vec<f64>,
}

impl Durable for SampleCollector {
    type Dry = SampleCollectorDry;

    fn to_dry(&self) -> SampleCollectorDry {
        SampleCollectorDry {
            options: self.config,
            samples: self.ring.to_vec(),
        }
    }

    /// Builds an unfilled collector and replays `add` for every sample.
    ///
    /// Snapshots holding more samples than `max_samples` keep only the
    /// newest ones. The rebuilt collector starts with an empty statistic
    /// cache and reports the original options. The window size is a
    /// `NonZeroUsize`, so this never fails.
    fn from_dry(dry: SampleCollectorDry) -> Result<Self> {
        let mut collector = SampleCollector::init(SampleCollectorConfig {
            pre_fill: None,
            ..dry.options
        });
        for value in dry.samples {
            collector.add(value);
        }
        collector.config = dry.options;
        collector.clear_cache();
        collector.metrics = SampleCollectorMetrics::new();
        Ok(collector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CachePolicy;
    use core::num::NonZeroUsize;

    fn collector(max: usize, cache: CachePolicy) -> SampleCollector {
        SampleCollector::init(SampleCollectorConfig {
            max_samples: NonZeroUsize::new(max).unwrap(),
            cache,
            pre_fill: None,
        })
    }

    #[test]
    fn test_default_collector_is_prefilled() {
        let mut c = SampleCollector::new();
        assert_eq!(c.len(), 10);
        assert_eq!(c.max_samples(), 10);
        assert!(c.samples().iter().all(|&v| v == 0.0));
        assert_eq!(c.mean(), Some(0.0));
        assert!(c.is_caching());
    }

    #[test]
    fn test_prefill_with_value() {
        let mut c = SampleCollector::init(SampleCollectorConfig {
            max_samples: NonZeroUsize::new(4).unwrap(),
            cache: CachePolicy::Disabled,
            pre_fill: Some(5.0),
        });
        c.add(9.0);
        assert_eq!(c.samples(), &[5.0, 5.0, 5.0, 9.0]);
        assert_eq!(c.highest(), Some(9.0));
        assert_eq!(c.lowest(), Some(5.0));
    }

    #[test]
    fn test_window_is_bounded() {
        let mut c = collector(3, CachePolicy::Disabled);
        for v in 1..=6 {
            c.add(v as f64);
            assert!(c.len() <= 3);
        }
        assert_eq!(c.samples(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_empty_window_statistics() {
        let mut c = collector(5, CachePolicy::Auto);
        assert!(c.is_empty());
        assert_eq!(c.mean(), None);
        assert_eq!(c.median(), None);
        assert_eq!(c.deviation(), None);
        assert!(c.standardize().is_empty());
        assert!(c.lowpass().is_empty());
    }

    #[test]
    fn test_statistics_over_window() {
        let mut c = collector(8, CachePolicy::Disabled);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            c.add(v);
        }
        assert_eq!(c.lowest(), Some(2.0));
        assert_eq!(c.highest(), Some(9.0));
        assert_eq!(c.mean(), Some(5.0));
        assert_eq!(c.median(), Some(4.5));
        assert_eq!(c.variance(), Some(4.0));
        assert_eq!(c.deviation(), Some(2.0));
        assert_eq!(c.standardize().len(), 8);
        assert_eq!(c.lowpass()[0], 2.0);
    }

    #[test]
    fn test_disabled_cache_is_always_fresh() {
        let mut c = collector(10, CachePolicy::Disabled);
        c.add(1.0);
        assert_eq!(c.mean(), Some(1.0));
        c.add(3.0);
        assert_eq!(c.mean(), Some(2.0));
        assert_eq!(c.mean(), Some(2.0));
        assert_eq!(c.collector_metrics().statistic_cache_hits, 0);
        assert_eq!(c.collector_metrics().computations, 3);
    }

    #[test]
    fn test_staleness_bounded_by_threshold() {
        let mut c = collector(10, CachePolicy::After(3));
        c.add(1.0);
        c.add(2.0);
        c.add(3.0);
        c.clear_cache();
        assert_eq!(c.mean(), Some(2.0));

        for _ in 0..3 {
            c.add(10.0);
            assert_eq!(c.mean(), Some(2.0));
        }
        // samples are never stale
        assert_eq!(c.samples().len(), 6);

        c.add(10.0);
        assert_eq!(c.mean(), Some(46.0 / 7.0));
        assert_eq!(c.collector_metrics().invalidations, 1);
    }

    #[test]
    fn test_counter_without_cached_values_does_not_invalidate() {
        let mut c = collector(10, CachePolicy::After(1));
        for v in 1..=5 {
            c.add(v as f64);
        }
        assert_eq!(c.collector_metrics().invalidations, 0);
        assert_eq!(c.mean(), Some(3.0));
        // counter is already past the threshold, the next add invalidates
        c.add(9.0);
        assert_eq!(c.collector_metrics().invalidations, 1);
        assert_eq!(c.mean(), Some(4.0));
    }

    #[test]
    fn test_clear_cache_forces_recompute() {
        let mut c = collector(4, CachePolicy::After(100));
        c.add(1.0);
        assert_eq!(c.highest(), Some(1.0));
        c.add(7.0);
        assert_eq!(c.highest(), Some(1.0));
        c.clear_cache();
        assert_eq!(c.highest(), Some(7.0));
    }

    #[test]
    fn test_stat_dispatch_matches_accessors() {
        let mut c = collector(4, CachePolicy::Auto);
        for v in [1.0, 2.0, 3.0, 4.0] {
            c.add(v);
        }
        for statistic in Statistic::ALL {
            let expected = statistic.compute(&[1.0, 2.0, 3.0, 4.0]);
            assert_eq!(c.stat(statistic), expected, "{}", statistic);
        }
        assert_eq!(c.median(), Some(2.5));
        assert_eq!(c.lowpass(), vec![1.0, 1.5, 2.25, 3.125]);
    }

    #[test]
    fn test_metrics() {
        let mut c = collector(4, CachePolicy::Auto);
        c.add(1.0);
        c.mean();
        c.mean();
        c.median();
        let metrics = c.metrics();
        assert_eq!(metrics.get("samples_added").unwrap(), &1.0);
        assert_eq!(metrics.get("statistic_requests").unwrap(), &3.0);
        assert_eq!(metrics.get("statistic_cache_hits").unwrap(), &1.0);
        assert_eq!(metrics.get("computations").unwrap(), &2.0);
        assert_eq!(c.algorithm_name(), "SampleCollector");
    }

    #[test]
    fn test_timer_records_sample() {
        let mut c = collector(4, CachePolicy::Disabled);
        let timer = c.start_timer();
        let ms = timer.record(&mut c);
        assert!(ms >= 0.0);
        assert_eq!(c.len(), 1);
        assert_eq!(c.samples(), &[ms]);
    }

    #[test]
    fn test_dry_round_trip() {
        let mut c = collector(5, CachePolicy::After(2));
        for v in 1..=8 {
            c.add(v as f64);
        }
        let dry = c.to_dry();
        assert_eq!(dry.samples, vec![4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(dry.options.cache, CachePolicy::After(2));

        let mut revived = SampleCollector::from_dry(dry).unwrap();
        assert_eq!(revived.samples(), c.samples());
        assert_eq!(revived.config(), c.config());
        assert_eq!(revived.mean(), Some(6.0));
    }

    #[test]
    fn test_from_dry_keeps_newest_when_oversized() {
        let dry = SampleCollectorDry {
            options: SampleCollectorConfig {
                max_samples: NonZeroUsize::new(2).unwrap(),
                cache: CachePolicy::Disabled,
                pre_fill: Some(0.0),
            },
            samples: vec![1.0, 2.0, 3.0],
        };
        let mut revived = SampleCollector::from_dry(dry).unwrap();
        assert_eq!(revived.samples(), &[2.0, 3.0]);
        assert_eq!(revived.config().pre_fill, Some(0.0));
    }
}
