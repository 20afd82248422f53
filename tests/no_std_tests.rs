#![no_std]
extern crate alloc;
extern crate bounded_rs;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use bounded_rs::config::LruCacheConfig;
use bounded_rs::{Durable, LruCache, RingBuffer};
use core::num::NonZeroUsize;

fn make_lru<K: core::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

fn make_ring<T>(cap: usize) -> RingBuffer<T> {
    RingBuffer::new(NonZeroUsize::new(cap).unwrap())
}

#[test]
fn test_lru_in_no_std() {
    let mut cache = make_lru(2);
    cache.put(String::from("a"), 1);
    cache.put(String::from("b"), 2);
    assert_eq!(cache.get("a"), Some(&1));

    cache.put(String::from("c"), 3);
    assert!(!cache.contains("b"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_lru_with_formatted_keys() {
    let mut cache = make_lru(8);
    for i in 0..16 {
        cache.put(format!("key-{}", i), i);
    }
    assert_eq!(cache.len(), 8);
    assert_eq!(cache.peek("key-15"), Some(&15));
    assert_eq!(cache.peek("key-7"), None);

    let newest: Vec<&String> = cache.keys().take(2).collect();
    assert_eq!(newest, vec!["key-15", "key-14"]);
}

#[test]
fn test_lru_try_new_rejects_zero() {
    assert!(LruCache::<u32, u32>::try_new(0).is_err());
}

#[test]
fn test_ring_in_no_std() {
    let mut ring = make_ring(3);
    for i in 1..=5 {
        ring.push(i);
    }
    assert_eq!(ring.to_vec(), vec![3, 4, 5]);
    assert_eq!(ring.get(0), Some(&3));
    assert_eq!(ring.peek(), Some(&5));
    assert_eq!(ring.iter().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3]);
}

#[test]
fn test_ring_time_range_in_no_std() {
    let mut ring = make_ring(4);
    ring.extend([(1u64, 'a'), (2, 'b'), (3, 'c'), (4, 'd'), (5, 'e')]);
    let found: Vec<char> = ring
        .get_in_time_range(3, 4)
        .into_iter()
        .map(|(_, c)| *c)
        .collect();
    assert_eq!(found, vec!['c', 'd']);
}

#[test]
fn test_ring_dry_in_no_std() {
    let mut ring = make_ring(2);
    ring.extend([String::from("x"), String::from("y"), String::from("z")]);
    let revived = RingBuffer::from_dry(ring.to_dry()).unwrap();
    assert_eq!(revived.to_vec(), ring.to_vec());
    assert!(RingBuffer::<u8>::try_new(0).is_err());
}
