//! Snapshot ("dry") representations.
//!
//! Each structure can reduce itself to a plain data value and be rebuilt
//! from it. The dry value holds only what is needed to replay the structure's
//! public operations, so a rebuilt instance behaves like the original:
//!
//! | Structure | Dry type | Rebuilt by |
//! |-----------|----------|------------|
//! | [`RingBuffer`](crate::RingBuffer) | [`RingBufferDry`](crate::ring_buffer::RingBufferDry) | replaying `push` oldest-first |
//! | [`LruCache`](crate::LruCache) | [`LruCacheDry`](crate::lru::LruCacheDry) | replaying `put` least-recent-first |
//! | `SampleCollector` | `SampleCollectorDry` | replaying `add` into an unfilled window |
//!
//! With the `serde` feature every dry type implements `Serialize` and
//! `Deserialize`, so any serde format can store it.
//!
//! ```
//! use bounded_rs::{Durable, RingBuffer};
//! use core::num::NonZeroUsize;
//!
//! let mut ring = RingBuffer::new(NonZeroUsize::new(3).unwrap());
//! for i in 1..=5 {
//!     ring.push(i);
//! }
//!
//! let dry = ring.to_dry();
//! assert_eq!(dry.items, vec![3, 4, 5]);
//!
//! let revived = RingBuffer::from_dry(dry).unwrap();
//! assert_eq!(revived.to_vec(), ring.to_vec());
//! ```

use crate::error::Result;

/// A structure that can be reduced to a snapshot and rebuilt from it.
pub trait Durable: Sized {
    /// Plain data snapshot of the structure.
    type Dry;

    /// Captures the current state.
    fn to_dry(&self) -> Self::Dry;

    /// Rebuilds an equivalent structure.
    ///
    /// Fails only when the snapshot describes an impossible structure,
    /// such as a zero capacity.
    fn from_dry(dry: Self::Dry) -> Result<Self>;
}
