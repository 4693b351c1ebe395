//! framecache: fixed-capacity clock cache with pinning and dirty tracking.
//!
//! The cache stores entries in a frame array allocated once at construction
//! and evicts with the clock (second-chance) algorithm. Frames can be pinned
//! to keep them resident while in use, and every write marks a frame dirty.
//!
//! ```
//! use framecache::prelude::*;
//!
//! let mut cache = ClockCache::new(2)?;
//! cache.set(1, "a")?;
//! cache.set(2, "b")?;
//! cache.get(&1)?;
//! cache.set(3, "c")?;
//!
//! // Key 1 was referenced, so key 2 took the eviction
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! # Ok::<(), CacheError>(())
//! ```

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use crate::error::CacheError;

/// Result alias for fallible cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
