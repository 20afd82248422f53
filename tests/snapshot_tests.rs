//! Snapshot round-trips through serde_json.
//!
//! Each structure is reduced to its dry value, written as JSON, read back and
//! rebuilt. The rebuilt structure must behave like the original.

#![cfg(all(feature = "serde", feature = "std"))]

use bounded_rs::config::{CachePolicy, SampleCollectorConfig};
use bounded_rs::lru::LruCacheDry;
use bounded_rs::ring_buffer::RingBufferDry;
use bounded_rs::sample_collector::SampleCollectorDry;
use bounded_rs::{Durable, LruCache, RingBuffer, SampleCollector};
use std::num::NonZeroUsize;

#[test]
fn test_ring_buffer_json_round_trip() {
    let mut ring = RingBuffer::new(NonZeroUsize::new(3).unwrap());
    for i in 1..=5u32 {
        ring.push(i);
    }

    let json = serde_json::to_string(&ring.to_dry()).unwrap();
    assert_eq!(json, r#"{"capacity":3,"items":[3,4,5]}"#);

    let dry: RingBufferDry<u32> = serde_json::from_str(&json).unwrap();
    let mut revived = RingBuffer::from_dry(dry).unwrap();
    assert_eq!(revived.to_vec(), vec![3, 4, 5]);

    // overwrite order survives the round trip
    assert_eq!(revived.push(6), Some(3));
}

#[test]
fn test_ring_buffer_json_zero_capacity_is_rejected() {
    let dry: RingBufferDry<u32> =
        serde_json::from_str(r#"{"capacity":0,"items":[]}"#).unwrap();
    assert!(RingBuffer::from_dry(dry).is_err());
}

#[test]
fn test_lru_json_round_trip() {
    let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
    cache.put(String::from("a"), 1u32);
    cache.put(String::from("b"), 2);
    cache.put(String::from("c"), 3);
    cache.get("a");

    let json = serde_json::to_string(&cache.to_dry()).unwrap();
    assert_eq!(
        json,
        r#"{"capacity":3,"entries":[["a",1],["c",3],["b",2]]}"#
    );

    let dry: LruCacheDry<String, u32> = serde_json::from_str(&json).unwrap();
    let mut revived: LruCache<String, u32> = LruCache::from_dry(dry).unwrap();

    // "b" is still least recently used after the round trip
    revived.put(String::from("d"), 4);
    assert!(!revived.contains("b"));
    assert!(revived.contains("a"));
    assert!(revived.contains("c"));
}

#[test]
fn test_sample_collector_json_round_trip() {
    let mut collector = SampleCollector::init(SampleCollectorConfig {
        max_samples: NonZeroUsize::new(4).unwrap(),
        cache: CachePolicy::After(5),
        pre_fill: Some(1.0),
    });
    collector.add(2.0);
    collector.add(4.0);

    let json = serde_json::to_string(&collector.to_dry()).unwrap();
    let dry: SampleCollectorDry = serde_json::from_str(&json).unwrap();
    assert_eq!(dry.options.cache, CachePolicy::After(5));
    assert_eq!(dry.samples, vec![1.0, 1.0, 2.0, 4.0]);

    let mut revived = SampleCollector::from_dry(dry).unwrap();
    assert_eq!(revived.samples(), collector.samples());
    assert_eq!(revived.mean(), Some(2.0));
    assert_eq!(revived.config().pre_fill, Some(1.0));
}

#[test]
fn test_config_json_shape() {
    let json = serde_json::to_value(SampleCollectorConfig::default()).unwrap();
    assert_eq!(json["max_samples"], 10);
    assert_eq!(json["cache"], "Auto");
    assert_eq!(json["pre_fill"], 0.0);
}
