//! Descriptive statistics over a window of samples.
//!
//! Every function here is a pure function of a slice. Scalar statistics
//! return `None` for an empty slice; series statistics return an empty `Vec`.
//! [`SampleCollector`](crate::SampleCollector) memoizes these over its
//! current window.

/// Smoothing factor used by [`lowpass`].
pub const LOWPASS_SMOOTHING: f64 = 0.5;

/// Smallest sample.
pub fn lowest(samples: &[f64]) -> Option<f64> {
    samples.iter().copied().reduce(f64::min)
}

/// Largest sample.
pub fn highest(samples: &[f64]) -> Option<f64> {
    samples.iter().copied().reduce(f64::max)
}

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Middle value of the sorted samples.
///
/// For an even number of samples this is the mean of the two middle values.
pub fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population variance (divides by `n`).
pub fn variance(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    let sum_sq: f64 = samples.iter().map(|x| (x - m) * (x - m)).sum();
    Some(sum_sq / samples.len() as f64)
}

/// Population standard deviation.
pub fn deviation(samples: &[f64]) -> Option<f64> {
    variance(samples).map(f64::sqrt)
}

/// Z-score of every sample, in window order.
///
/// A window with zero deviation standardizes to all zeros.
pub fn standardize(samples: &[f64]) -> Vec<f64> {
    let (Some(m), Some(sd)) = (mean(samples), deviation(samples)) else {
        return Vec::new();
    };
    if sd == 0.0 {
        return vec![0.0; samples.len()];
    }
    samples.iter().map(|x| (x - m) / sd).collect()
}

/// Single-pole low-pass filter with [`LOWPASS_SMOOTHING`].
///
/// ```
/// use bounded_rs::stats::lowpass;
///
/// assert_eq!(lowpass(&[0.0, 8.0, 8.0]), vec![0.0, 4.0, 6.0]);
/// ```
pub fn lowpass(samples: &[f64]) -> Vec<f64> {
    lowpass_with(samples, LOWPASS_SMOOTHING)
}

/// Single-pole low-pass filter: `y[0] = x[0]`,
/// `y[i] = y[i-1] + smoothing * (x[i] - y[i-1])`.
///
/// `smoothing` of `1.0` returns the input unchanged; values near `0.0` react
/// slowly.
pub fn lowpass_with(samples: &[f64], smoothing: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(samples.len());
    let mut prev: Option<f64> = None;
    for &x in samples {
        let y = match prev {
            Some(p) => p + smoothing * (x - p),
            None => x,
        };
        out.push(y);
        prev = Some(y);
    }
    out
}
