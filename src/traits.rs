//! # Cache Trait Hierarchy
//!
//! Traits describing the operation sets a fixed-capacity frame cache exposes.
//! Lookups that cannot fail return plain values; everything that can fail
//! returns [`CacheError`] so callers match on a closed set of causes.
//!
//! ## Architecture
//!
//! ```text
//!                ┌─────────────────────────────────────────┐
//!                │          ReadOnlyCache<K, V>            │
//!                │                                         │
//!                │  contains(&, &K) → bool                 │
//!                │  len(&) → usize                         │
//!                │  is_empty(&) → bool                     │
//!                │  capacity(&) → usize                    │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │            CoreCache<K, V>              │
//!                │                                         │
//!                │  set(&mut, K, V) → Result<()>           │
//!                │  get(&mut, &K) → Result<&V>             │
//!                │  clear(&mut)                            │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │          PinnableCache<K, V>            │
//!                │                                         │
//!                │  pin(&mut, &K) → Result<()>             │
//!                │  unpin(&mut, &K) → Result<()>           │
//!                │  pin_count(&, &K) → Result<usize>       │
//!                │  is_dirty(&, &K) → Result<bool>         │
//!                └─────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. Wrap an instance in a `Mutex` (one
//! per cache) when it must be shared.
//!
//! ## Example Usage
//!
//! ```
//! use framecache::policy::clock::ClockCache;
//! use framecache::traits::{CoreCache, PinnableCache, ReadOnlyCache};
//!
//! // Fetch a page, keeping it resident while `work` runs.
//! fn with_pinned<C, F>(cache: &mut C, key: u64, work: F) -> framecache::Result<()>
//! where
//!     C: PinnableCache<u64, Vec<u8>>,
//!     F: FnOnce(&[u8]),
//! {
//!     cache.pin(&key)?;
//!     work(cache.get(&key)?);
//!     cache.unpin(&key)
//! }
//!
//! let mut cache = ClockCache::new(4).unwrap();
//! cache.set(7, vec![1, 2, 3]).unwrap();
//! with_pinned(&mut cache, 7, |bytes| assert_eq!(bytes.len(), 3)).unwrap();
//! assert_eq!(cache.pin_count(&7), Ok(0));
//! assert_eq!(cache.len(), 1);
//! ```

use crate::error::CacheError;

/// Side-effect-free queries every cache supports.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is resident. Never affects eviction order.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed number of frames.
    fn capacity(&self) -> usize;
}

/// Core insert/lookup/clear operations.
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts or updates `key`.
    ///
    /// Updating a resident key never evicts. Inserting into a full cache
    /// evicts one unpinned entry, or fails with
    /// [`CacheError::EvictionExhausted`] leaving the cache unchanged.
    fn set(&mut self, key: K, value: V) -> Result<(), CacheError>;

    /// Returns the value for `key`, recording the access for eviction.
    fn get(&mut self, key: &K) -> Result<&V, CacheError>;

    /// Removes every entry.
    fn clear(&mut self);
}

/// Pin and dirty-state operations for caches that back page-like frames.
pub trait PinnableCache<K, V>: CoreCache<K, V> {
    /// Adds a pin; pinned entries are never evicted.
    fn pin(&mut self, key: &K) -> Result<(), CacheError>;

    /// Releases one pin. Fails with [`CacheError::InvalidState`] when the
    /// entry has no outstanding pins.
    fn unpin(&mut self, key: &K) -> Result<(), CacheError>;

    /// Returns the number of outstanding pins on `key`.
    fn pin_count(&self, key: &K) -> Result<usize, CacheError>;

    /// Returns `true` if `key` was written since it was placed in its frame.
    fn is_dirty(&self, key: &K) -> Result<bool, CacheError>;
}
