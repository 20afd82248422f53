//! Fixed-Capacity Ring Buffer
//!
//! A circular log that keeps the last `capacity` items pushed into it. Pushing
//! into a full buffer overwrites the oldest item in place: no element is ever
//! shifted and no allocation happens after construction.
//!
//! # Layout
//!
//! ```text
//!  capacity = 5, len = 5, head = 2
//!
//!   slot:    0     1     2     3     4
//!          ┌─────┬─────┬─────┬─────┬─────┐
//!          │  F  │  G  │  C  │  D  │  E  │
//!          └─────┴─────┴─────┴─────┴─────┘
//!                       ▲
//!                      head: next write, and the oldest item while full
//!
//!  logical order: C(0) D(1) E(2) F(3) G(4)
//! ```
//!
//! Logical index 0 is always the oldest surviving item and `len - 1` the newest,
//! whatever the physical offset.
//!
//! # Performance Characteristics
//!
//! - `push`, `peek`, `peek_oldest`, `get`: O(1)
//! - `to_vec`, `iter`, `get_last`: O(len)
//! - `get_while_match`, `get_in_time_range`: O(k) where k is the number of
//!   items inspected before the scan stops
//!
//! # Ordered Scans
//!
//! [`RingBuffer::get_while_match`] and [`RingBuffer::get_in_time_range`] walk from
//! the newest item towards the oldest and stop at the first item that falls
//! outside the requested range. They are not filters. The caller guarantees the
//! data is ordered so that matches cluster at the newest end (for time ranges:
//! timestamps never decrease in push order). On unordered data they return only
//! the newest contiguous run of matches.

extern crate alloc;

use crate::durable::Durable;
use crate::error::{Error, Result};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use tracing::{trace, warn};

/// An item that may carry a timestamp, in milliseconds since the Unix epoch.
///
/// Used by [`RingBuffer::get_in_time_range`].
pub trait Timestamped {
    /// The item's timestamp, or `None` if it has none.
    fn timestamp(&self) -> Option<u64>;
}

/// `(timestamp, payload)` pairs.
impl<V> Timestamped for (u64, V) {
    fn timestamp(&self) -> Option<u64> {
        Some(self.0)
    }
}

/// A fixed-capacity circular buffer that overwrites its oldest item when full.
///
/// # Examples
///
/// ```
/// use bounded_rs::RingBuffer;
/// use core::num::NonZeroUsize;
///
/// let mut ring = RingBuffer::new(NonZeroUsize::new(3).unwrap());
/// for i in 1..=5 {
///     ring.push(i);
/// }
///
/// assert_eq!(ring.to_vec(), vec![3, 4, 5]);
/// assert_eq!(ring.peek_oldest(), Some(&3));
/// assert_eq!(ring.peek(), Some(&5));
/// assert_eq!(ring.get(1), Some(&4));
/// assert_eq!(ring.get(3), None);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    buf: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring buffer holding at most `capacity` items.
    ///
    /// All slots are allocated up front.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let buf: Box<[Option<T>]> = (0..capacity.get()).map(|_| None).collect();
        RingBuffer {
            buf,
            head: 0,
            len: 0,
        }
    }

    /// Creates a ring buffer from a runtime capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(Self::new(capacity)),
            None => {
                warn!(capacity, "rejected ring buffer capacity");
                Err(Error::InvalidCapacity {
                    structure: "RingBuffer",
                    capacity,
                })
            }
        }
    }

    /// Maximum number of items the buffer holds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of items currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the next push will overwrite the oldest item.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Physical slot of logical index `index`. Caller ensures `index < len`.
    #[inline]
    fn slot(&self, index: usize) -> usize {
        let cap = self.capacity();
        (self.head + cap - self.len + index) % cap
    }

    /// Appends an item as the newest entry.
    ///
    /// When the buffer is full the oldest item is overwritten and returned.
    pub fn push(&mut self, item: T) -> Option<T> {
        let cap = self.capacity();
        let overwritten = self.buf[self.head].replace(item);
        self.head = (self.head + 1) % cap;
        if self.len < cap {
            self.len += 1;
            None
        } else {
            trace!(capacity = cap, "ring buffer full, overwrote oldest item");
            overwritten
        }
    }

    /// The most recently pushed item.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.buf[self.slot(self.len - 1)].as_ref()
    }

    /// The oldest surviving item.
    pub fn peek_oldest(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.buf[self.slot(0)].as_ref()
    }

    /// Item at logical `index`, where 0 is the oldest and `len() - 1` the newest.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.buf[self.slot(index)].as_ref()
    }

    /// The last `min(n, len())` items, oldest first.
    pub fn get_last(&self, n: usize) -> Vec<&T> {
        let n = n.min(self.len);
        self.iter().skip(self.len - n).collect()
    }

    /// Collects items from the newest end while `predicate` holds, returned
    /// oldest first.
    ///
    /// Stops at the first item that fails `predicate`; older items are never
    /// inspected. See the [module docs](crate::ring_buffer#ordered-scans) for the ordering
    /// precondition.
    ///
    /// ```
    /// use bounded_rs::RingBuffer;
    ///
    /// let mut ring = RingBuffer::try_new(5).unwrap();
    /// ring.extend([9, 1, 6, 7, 8]);
    ///
    /// // 1 fails the predicate, so 9 is never reached
    /// assert_eq!(ring.get_while_match(|&v| v > 5), vec![&6, &7, &8]);
    /// ```
    pub fn get_while_match<F>(&self, mut predicate: F) -> Vec<&T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut matched: Vec<&T> = self
            .iter()
            .rev()
            .take_while(|item| predicate(*item))
            .collect();
        matched.reverse();
        matched
    }

    /// Drops every item and resets the write position. Capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.buf.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Calls `f(item, logical_index, self)` for each item, oldest first.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize, &Self),
    {
        for (index, item) in self.iter().enumerate() {
            f(item, index, self);
        }
    }

    /// Iterates items from oldest to newest.
    ///
    /// The iterator is double-ended, so `.rev()` walks newest to oldest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            front: 0,
            back: self.len,
        }
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copies the contents into a new vector, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Timestamped> RingBuffer<T> {
    /// Items whose timestamp lies in `[start, end]`, oldest first.
    ///
    /// Scans from the newest item: items newer than `end` are skipped, items
    /// without a timestamp are skipped, and the scan stops at the first item
    /// older than `start`. Timestamps must not decrease in push order.
    ///
    /// ```
    /// use bounded_rs::RingBuffer;
    ///
    /// let mut ring = RingBuffer::try_new(8).unwrap();
    /// ring.extend([(100u64, "a"), (200, "b"), (300, "c"), (400, "d")]);
    ///
    /// let hits: Vec<_> = ring
    ///     .get_in_time_range(150, 350)
    ///     .into_iter()
    ///     .map(|(_, v)| *v)
    ///     .collect();
    /// assert_eq!(hits, vec!["b", "c"]);
    /// ```
    pub fn get_in_time_range(&self, start: u64, end: u64) -> Vec<&T> {
        let mut found = Vec::new();
        for item in self.iter().rev() {
            let Some(ts) = item.timestamp() else {
                continue;
            };
            if ts > end {
                continue;
            }
            if ts < start {
                break;
            }
            found.push(item);
        }
        found.reverse();
        found
    }

    /// Items stamped between `start` and the current wall-clock time, oldest first.
    #[cfg(feature = "std")]
    pub fn get_since(&self, start: u64) -> Vec<&T> {
        self.get_in_time_range(start, now_millis())
    }
}

/// Milliseconds since the Unix epoch, saturating on clock skew.
#[cfg(feature = "std")]
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("head", &self.head)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Oldest-to-newest iterator over a [`RingBuffer`].
///
/// Created by [`RingBuffer::iter`]. Calling `iter` again restarts from the oldest item.
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front >= self.back {
            return None;
        }
        let item = self.ring.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.ring.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

/// Snapshot of a [`RingBuffer`]: its capacity and items, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingBufferDry<T> {
    /// Capacity of the captured buffer.
    pub capacity: usize,
    /// Items, oldest first.
    pub items: Vec<T>,
}

impl<T: Clone> Durable for RingBuffer<T> {
    type Dry = RingBufferDry<T>;

    fn to_dry(&self) -> RingBufferDry<T> {
        RingBufferDry {
            capacity: self.capacity(),
            items: self.to_vec(),
        }
    }

    fn from_dry(dry: RingBufferDry<T>) -> Result<Self> {
        let mut ring = Self::try_new(dry.capacity)?;
        ring.extend(dry.items);
        Ok(ring)
    }
}
