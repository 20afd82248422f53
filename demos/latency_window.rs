//! Latency Window Demonstration
//!
//! Tracks simulated request latencies with a `SampleCollector`, keeps a
//! timestamped request log in a `RingBuffer`, and memoizes responses in an
//! `LruCache`. Prints the rolling statistics and the metrics each structure
//! recorded.

use bounded_rs::config::{CachePolicy, LruCacheConfig, SampleCollectorConfig};
use bounded_rs::{CacheMetrics, Durable, LruCache, RingBuffer, SampleCollector};
use core::num::NonZeroUsize;
use std::collections::BTreeMap;

fn main() {
    println!("Latency Window Demonstration");
    println!("============================\n");

    let mut latencies = SampleCollector::init(SampleCollectorConfig {
        max_samples: NonZeroUsize::new(20).unwrap(),
        cache: CachePolicy::After(5),
        pre_fill: None,
    });
    let mut log = RingBuffer::new(NonZeroUsize::new(8).unwrap());
    let mut responses: LruCache<u32, String> = LruCache::init(
        LruCacheConfig {
            capacity: NonZeroUsize::new(4).unwrap(),
        },
        None,
    );

    // Deterministic "latencies": a steady baseline with periodic spikes
    for request in 0..40u32 {
        let route = request % 6;
        let latency = if request % 9 == 0 { 120.0 } else { 10.0 + f64::from(route) };

        if responses.get(&route).is_none() {
            responses.put(route, format!("response for route {}", route));
        }
        latencies.add(latency);
        log.push((u64::from(request) * 100, route));
    }

    let timer = latencies.start_timer();
    let measured = timer.record(&mut latencies);
    println!("📏 Real timer sample: {:.4} ms\n", measured);

    println!("📊 Rolling statistics over the last {} samples:", latencies.len());
    println!("   mean      {:>8.2}", latencies.mean().unwrap_or_default());
    println!("   median    {:>8.2}", latencies.median().unwrap_or_default());
    println!("   deviation {:>8.2}", latencies.deviation().unwrap_or_default());
    println!("   lowest    {:>8.2}", latencies.lowest().unwrap_or_default());
    println!("   highest   {:>8.2}", latencies.highest().unwrap_or_default());
    let smoothed = latencies.lowpass();
    println!(
        "   lowpass   {:>8.2} (latest)",
        smoothed.last().copied().unwrap_or_default()
    );

    println!("\n🕒 Requests stamped 3500..=3900:");
    for (ts, route) in log.get_in_time_range(3500, 3900) {
        println!("   t={:>5} route={}", ts, route);
    }

    println!("\n💾 Response cache, most recent first:");
    for (route, body) in &responses {
        println!("   {} -> {}", route, body);
    }

    print_metrics(&responses);
    print_metrics(&latencies);

    let dry = latencies.to_dry();
    println!(
        "\n📦 Snapshot: {} samples, cache {:?}",
        dry.samples.len(),
        dry.options.cache
    );
}

fn print_metrics(source: &dyn CacheMetrics) {
    let metrics: BTreeMap<String, f64> = source.metrics();
    println!("\n📈 {} metrics:", source.algorithm_name());
    for (name, value) in &metrics {
        println!("   {:<22} {:>10.3}", name, value);
    }
}
