//! Configuration for the rolling-window [`SampleCollector`](crate::SampleCollector).
//!
//! # Options
//!
//! - **`max_samples`**: size of the window. Once full, each new sample drops the oldest.
//! - **`cache`**: how long computed statistics are reused. See [`CachePolicy`].
//! - **`pre_fill`**: value the window starts full of, or `None` to start empty.
//!   A pre-filled window reports statistics over the fill value until real
//!   samples have replaced it, so early readings lean towards the fill value.
//!
//! # Examples
//!
//! ```
//! use bounded_rs::config::{CachePolicy, SampleCollectorConfig};
//! use bounded_rs::SampleCollector;
//! use core::num::NonZeroUsize;
//!
//! // Last 100 request latencies, statistics recomputed at most every 25 samples
//! let config = SampleCollectorConfig {
//!     max_samples: NonZeroUsize::new(100).unwrap(),
//!     cache: CachePolicy::After(25),
//!     pre_fill: None,
//! };
//! let collector = SampleCollector::init(config);
//! assert!(collector.is_empty());
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Window size used by [`SampleCollectorConfig::default`].
pub const DEFAULT_MAX_SAMPLES: usize = 10;

/// Lower bound of the [`CachePolicy::Auto`] threshold.
pub const MIN_AUTO_THRESHOLD: usize = 10;

/// Memoization policy for computed statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CachePolicy {
    /// Every statistic read recomputes from the current window.
    Disabled,
    /// Threshold of `max(max_samples / 3, 10)` additions.
    #[default]
    Auto,
    /// Statistics are dropped once more than this many samples have been
    /// added since the last invalidation.
    After(usize),
}

impl CachePolicy {
    /// Resolves the policy to an add-count threshold, `None` when disabled.
    pub fn threshold(self, max_samples: NonZeroUsize) -> Option<usize> {
        match self {
            CachePolicy::Disabled => None,
            CachePolicy::Auto => Some((max_samples.get() / 3).max(MIN_AUTO_THRESHOLD)),
            CachePolicy::After(n) => Some(n),
        }
    }
}

/// Construction options for a [`SampleCollector`](crate::SampleCollector).
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleCollectorConfig {
    /// Capacity of the underlying ring buffer.
    pub max_samples: NonZeroUsize,
    /// Statistic memoization policy.
    pub cache: CachePolicy,
    /// Value to fill the window with at construction, `None` to start empty.
    pub pre_fill: Option<f64>,
}

impl Default for SampleCollectorConfig {
    fn default() -> Self {
        Self {
            max_samples: NonZeroUsize::new(DEFAULT_MAX_SAMPLES).unwrap_or(NonZeroUsize::MIN),
            cache: CachePolicy::Auto,
            pre_fill: Some(0.0),
        }
    }
}

impl SampleCollectorConfig {
    /// Threshold the collector will use, `None` when caching is disabled.
    #[inline]
    pub fn change_cache_after(&self) -> Option<usize> {
        self.cache.threshold(self.max_samples)
    }
}

impl fmt::Debug for SampleCollectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleCollectorConfig")
            .field("max_samples", &self.max_samples)
            .field("cache", &self.cache)
            .field("pre_fill", &self.pre_fill)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SampleCollectorConfig::default();
        assert_eq!(config.max_samples.get(), 10);
        assert_eq!(config.cache, CachePolicy::Auto);
        assert_eq!(config.pre_fill, Some(0.0));
        assert_eq!(config.change_cache_after(), Some(10));
    }

    #[test]
    fn test_auto_threshold_scales_with_window() {
        let small = NonZeroUsize::new(12).unwrap();
        let large = NonZeroUsize::new(300).unwrap();
        assert_eq!(CachePolicy::Auto.threshold(small), Some(10));
        assert_eq!(CachePolicy::Auto.threshold(large), Some(100));
    }

    #[test]
    fn test_explicit_and_disabled_thresholds() {
        let cap = NonZeroUsize::new(50).unwrap();
        assert_eq!(CachePolicy::After(4).threshold(cap), Some(4));
        assert_eq!(CachePolicy::After(0).threshold(cap), Some(0));
        assert_eq!(CachePolicy::Disabled.threshold(cap), None);
    }
}
