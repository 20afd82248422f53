//! Error types for bounded collections.
//!
//! Construction is the only fallible step in this crate. Queries that fall
//! outside a structure's contents return `None` instead of an error, and
//! operations on absent keys are no-ops.
//!
//! ```
//! use bounded_rs::{Error, RingBuffer};
//!
//! let err = RingBuffer::<u32>::try_new(0).unwrap_err();
//! assert_eq!(
//!     err,
//!     Error::InvalidCapacity { structure: "RingBuffer", capacity: 0 }
//! );
//! assert!(err.to_string().contains("at least 1"));
//! ```

use thiserror::Error;

/// Errors produced when building a bounded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A structure was asked to hold fewer than one element.
    #[error("{structure} capacity must be at least 1, got {capacity}")]
    InvalidCapacity {
        /// Name of the structure that rejected the capacity.
        structure: &'static str,
        /// The rejected capacity.
        capacity: usize,
    },
}

/// Result alias used by fallible constructors in this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_invalid_capacity_display() {
        let err = Error::InvalidCapacity {
            structure: "LruCache",
            capacity: 0,
        };
        assert_eq!(
            err.to_string(),
            "LruCache capacity must be at least 1, got 0"
        );
    }
}
