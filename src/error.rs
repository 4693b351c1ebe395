//! Error types for the framecache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Closed set of failures reported by cache operations
//!   (bad construction arguments, missing keys, pin underflow, and an
//!   eviction scan that found every frame pinned).
//! - [`InvariantError`]: Returned when internal frame-store invariants are
//!   violated (see [`ClockCache::check_invariants`](crate::policy::clock::ClockCache::check_invariants)).
//!
//! ## Example Usage
//!
//! ```
//! use framecache::error::CacheError;
//! use framecache::policy::clock::ClockCache;
//!
//! // Zero capacity is rejected without panicking
//! let bad = ClockCache::<u32, u32>::new(0);
//! assert_eq!(bad.unwrap_err(), CacheError::InvalidArgument);
//!
//! let mut cache = ClockCache::new(1).unwrap();
//! cache.set(1, "one").unwrap();
//! cache.pin(&1).unwrap();
//!
//! // The only frame is pinned, so nothing can be evicted
//! assert_eq!(cache.set(2, "two"), Err(CacheError::EvictionExhausted));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by fallible cache operations.
///
/// Every operation that returns `Err` leaves the cache exactly as it was
/// before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheError {
    /// A constructor argument was rejected (capacity of zero).
    InvalidArgument,
    /// The key is not resident in the cache.
    NotFound,
    /// The operation is not valid for the entry's current state
    /// (unpinning an entry whose pin count is already zero).
    InvalidState,
    /// The cache is full and every resident frame is pinned.
    EvictionExhausted,
}

impl CacheError {
    /// Returns a short static description of the error.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheError::InvalidArgument => "capacity must be > 0",
            CacheError::NotFound => "key not found",
            CacheError::InvalidState => "pin count is already zero",
            CacheError::EvictionExhausted => "cannot evict: all frames are pinned",
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for CacheError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
