//! Clock cache replacement policy with pinning and dirty tracking.
//!
//! Implements the Clock algorithm (also known as Second-Chance), which
//! approximates LRU with O(1) access operations, extended with per-frame pin
//! counts (pinned frames are never evicted) and a dirty bit (set by every
//! write).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         ClockCache<K, V> Layout                             │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  index: FxHashMap<K, usize>     (key -> frame id)                   │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  frames: Vec<Frame<K,V>>   (fixed, allocated once)                  │   │
//! │   │                                                                     │   │
//! │   │    [0]     [1]     [2]     [3]     [4]     [5]     [6]     [7]      │   │
//! │   │   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐    │   │
//! │   │   │ A │   │ B │   │ C │   │ D │   │ E │   │ F │   │ G │   │ H │    │   │
//! │   │   │ref│   │pin│   │   │   │ref│   │   │   │pin│   │   │   │   │    │   │
//! │   │   └───┘   └───┘   └───┘   └───┘   └───┘   └───┘   └───┘   └───┘    │   │
//! │   │             ▲                                                       │   │
//! │   │             │                                                       │   │
//! │   │           hand (clock pointer)                                      │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   On access: set referenced bit                                             │
//! │   On eviction: sweep from hand, skip pinned, clear ref bits,                │
//! │                evict first unpinned unreferenced frame                      │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! SET(key, value):
//!   1. If key exists: replace value, referenced = true, dirty = true
//!   2. Else if a frame is free: place in lowest free frame
//!      (referenced = false, dirty = true, pins = 0)
//!   3. Else: EVICT(), overwrite victim frame, hand = victim + 1
//!
//! EVICT():
//!   if every resident frame is pinned: fail, nothing changes
//!   repeat at most 2 * capacity times:
//!     frame = frames[hand]
//!     if frame.pin_count > 0:  hand += 1           // skip, ref untouched
//!     elif frame.referenced:   frame.referenced = false; hand += 1
//!     else:                    return hand         // victim
//! ```
//!
//! ## Frame Lifecycle
//!
//! ```text
//!   Free ──set──► Occupied(ref=0, dirty=1) ──get/update──► Occupied(ref=1)
//!    ▲                     │                                    │
//!    └──── victim / clear ─┴──────────── sweep clears ref ◄─────┘
//! ```
//!
//! The dirty bit is only ever cleared when the frame returns to Free.
//!
//! ## Performance Characteristics
//!
//! | Operation   | Time    | Notes                                   |
//! |-------------|---------|-----------------------------------------|
//! | `get`       | O(1)    | Hash lookup + bit set                   |
//! | `set`       | O(n)*   | *Bounded sweep when full                |
//! | `contains`  | O(1)    | Hash lookup only                        |
//! | `pin/unpin` | O(1)    | Hash lookup + counter                   |
//! | `clear`     | O(n)    | Resets every frame                      |
//!
//! ## Example Usage
//!
//! ```
//! use framecache::error::CacheError;
//! use framecache::policy::clock::ClockCache;
//!
//! let mut cache = ClockCache::new(2)?;
//! cache.set("page1", "content1")?;
//! cache.set("page2", "content2")?;
//!
//! // Pinned pages survive eviction pressure
//! cache.pin(&"page1")?;
//! cache.set("page3", "content3")?;
//! assert!(cache.contains(&"page1"));
//! assert!(!cache.contains(&"page2"));
//!
//! // Every write marks the frame dirty
//! assert_eq!(cache.is_dirty(&"page3"), Ok(true));
//! # Ok::<(), CacheError>(())
//! ```
//!
//! ## Thread Safety
//!
//! `ClockCache` performs no internal synchronization. Callers sharing an
//! instance across threads must serialize every call, e.g. with one
//! `Mutex<ClockCache<K, V>>` per cache.

use std::hash::Hash;

use tracing::{debug, trace};

use crate::ds::{FrameMeta, FrameRing};
use crate::error::{CacheError, InvariantError};
use crate::traits::{CoreCache, PinnableCache, ReadOnlyCache};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ClockMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ClockMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    ClockMetricsRecorder, CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};

/// Fixed-capacity Clock cache with pinning and dirty tracking.
///
/// Uses the [`FrameRing`] data structure with a sweeping clock hand for
/// eviction. Pinned frames are never selected as victims.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use framecache::policy::clock::ClockCache;
///
/// let mut cache = ClockCache::new(100).unwrap();
///
/// cache.set("key1", "value1").unwrap();
/// cache.set("key2", "value2").unwrap();
///
/// assert_eq!(cache.get(&"key1"), Ok(&"value1"));
/// assert_eq!(cache.size(), 2);
/// ```
pub struct ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    ring: FrameRing<K, V>,
    #[cfg(feature = "metrics")]
    metrics: ClockMetrics,
}

impl<K, V> ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new Clock cache with `capacity` frames.
    ///
    /// Fails with [`CacheError::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use framecache::error::CacheError;
    /// use framecache::policy::clock::ClockCache;
    ///
    /// let cache: ClockCache<String, i32> = ClockCache::new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    ///
    /// assert!(matches!(
    ///     ClockCache::<String, i32>::new(0),
    ///     Err(CacheError::InvalidArgument)
    /// ));
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidArgument);
        }
        Ok(Self {
            ring: FrameRing::new(capacity),
            #[cfg(feature = "metrics")]
            metrics: ClockMetrics::default(),
        })
    }

    /// Inserts or updates `key`.
    ///
    /// - Resident key: the value is replaced in place and the frame is marked
    ///   referenced and dirty. Never evicts.
    /// - Free frame available: the entry is placed unreferenced and dirty.
    /// - Full: the clock sweep picks an unpinned victim which is overwritten.
    ///
    /// Fails with [`CacheError::EvictionExhausted`] when the cache is full and
    /// every frame is pinned; the cache is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use framecache::policy::clock::ClockCache;
    ///
    /// let mut cache = ClockCache::new(2).unwrap();
    /// cache.set(1, 10).unwrap();
    /// cache.set(2, 20).unwrap();
    ///
    /// // Update existing: size unchanged, frame dirty
    /// cache.set(1, 111).unwrap();
    /// assert_eq!(cache.size(), 2);
    /// assert_eq!(cache.get(&1), Ok(&111));
    /// assert_eq!(cache.is_dirty(&1), Ok(true));
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Result<(), CacheError> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_call();
        }

        let value = match self.ring.update(&key, value) {
            Ok(_) => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_insert_update();
                }
                return Ok(());
            },
            Err(value) => value,
        };

        let (key, value) = match self.ring.place(key, value) {
            Ok(slot) => {
                trace!(slot, len = self.ring.len(), "clock_place");
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_insert_new();
                }
                return Ok(());
            },
            Err(rejected) => rejected,
        };

        self.evict_and_replace(key, value)
    }

    fn evict_and_replace(&mut self, key: K, value: V) -> Result<(), CacheError> {
        let sweep = self.ring.sweep();

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evict_call();
            self.metrics.record_hand_advance(sweep.advanced as u64);
            self.metrics.record_ref_bit_reset(sweep.ref_resets as u64);
            self.metrics.record_pinned_skip(sweep.pinned_skips as u64);
        }

        let Some(victim) = sweep.victim else {
            debug!(
                capacity = self.ring.capacity(),
                pinned = self.ring.pinned_len(),
                "clock_eviction_exhausted"
            );
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_eviction_exhausted();
            }
            return Err(CacheError::EvictionExhausted);
        };

        // Sweep victims are unpinned and `key` already missed the index.
        let evicted = match self.ring.replace(victim, key, value) {
            Ok(displaced) => displaced.is_some(),
            Err(_) => return Err(CacheError::InvalidState),
        };
        trace!(
            slot = victim,
            evicted,
            hand = self.ring.hand(),
            scanned = sweep.advanced,
            ref_resets = sweep.ref_resets,
            pinned_skips = sweep.pinned_skips,
            "clock_evict"
        );

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_new();
            if evicted {
                self.metrics.record_evicted_entry();
            }
        }
        Ok(())
    }

    /// Returns the value for `key` and sets its reference bit.
    ///
    /// Fails with [`CacheError::NotFound`] if `key` is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use framecache::error::CacheError;
    /// use framecache::policy::clock::ClockCache;
    ///
    /// let mut cache = ClockCache::new(10).unwrap();
    /// cache.set("key", 42).unwrap();
    ///
    /// // Access sets reference bit - this entry gets "second chance"
    /// assert_eq!(cache.get(&"key"), Ok(&42));
    /// assert_eq!(cache.get(&"missing"), Err(CacheError::NotFound));
    /// ```
    pub fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        match self.ring.get(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_get_hit();
                }
                Ok(value)
            },
            None => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_get_miss();
                }
                Err(CacheError::NotFound)
            },
        }
    }

    /// Returns the value for `key` without setting the reference bit.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.ring.peek(key)
    }

    /// Returns `true` if `key` is resident. Does not affect the reference bit.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.ring.contains(key)
    }

    /// Returns the number of occupied frames.
    #[inline]
    pub fn size(&self) -> usize {
        self.ring.len()
    }

    /// Returns the number of occupied frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns the fixed number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of frames with outstanding pins.
    #[inline]
    pub fn pinned_len(&self) -> usize {
        self.ring.pinned_len()
    }

    /// Frees every frame, drops all entries, and rewinds the clock hand.
    pub fn clear(&mut self) {
        let dropped = self.ring.len();
        self.ring.clear();
        debug!(dropped, "clock_clear");
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_clear();
        }
    }

    /// Adds a pin to `key`, protecting it from eviction.
    ///
    /// Pins nest: each `pin` needs a matching [`unpin`](Self::unpin). The
    /// reference bit is not affected.
    ///
    /// # Example
    ///
    /// ```
    /// use framecache::error::CacheError;
    /// use framecache::policy::clock::ClockCache;
    ///
    /// let mut cache = ClockCache::new(1).unwrap();
    /// cache.set("a", 1).unwrap();
    /// cache.pin(&"a").unwrap();
    ///
    /// assert_eq!(cache.set("b", 2), Err(CacheError::EvictionExhausted));
    /// cache.unpin(&"a").unwrap();
    /// cache.set("b", 2).unwrap();
    /// assert!(!cache.contains(&"a"));
    /// ```
    pub fn pin(&mut self, key: &K) -> Result<(), CacheError> {
        self.ring.pin(key)?;
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_pin();
        }
        Ok(())
    }

    /// Releases one pin on `key`.
    ///
    /// Fails with [`CacheError::NotFound`] if `key` is absent, or
    /// [`CacheError::InvalidState`] if it has no outstanding pins.
    pub fn unpin(&mut self, key: &K) -> Result<(), CacheError> {
        match self.ring.unpin(key) {
            Ok(_) => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_unpin();
                }
                Ok(())
            },
            Err(err) => {
                #[cfg(feature = "metrics")]
                {
                    if err == CacheError::InvalidState {
                        self.metrics.record_unpin_underflow();
                    }
                }
                Err(err)
            },
        }
    }

    /// Returns the number of outstanding pins on `key`.
    pub fn pin_count(&self, key: &K) -> Result<usize, CacheError> {
        self.frame_meta(key).map(|meta| meta.pin_count)
    }

    /// Returns `true` if `key` has at least one outstanding pin.
    pub fn is_pinned(&self, key: &K) -> Result<bool, CacheError> {
        self.pin_count(key).map(|pins| pins > 0)
    }

    /// Returns `true` if `key` was written since it entered its frame.
    ///
    /// Every insert and update sets the flag; nothing clears it short of
    /// eviction or [`clear`](Self::clear).
    pub fn is_dirty(&self, key: &K) -> Result<bool, CacheError> {
        self.frame_meta(key).map(|meta| meta.dirty)
    }

    /// Returns a copy of `key`'s frame bookkeeping without side effects.
    pub fn frame_meta(&self, key: &K) -> Result<FrameMeta, CacheError> {
        self.ring.meta(key).ok_or(CacheError::NotFound)
    }

    /// Returns the entry the next eviction would select, without side effects.
    ///
    /// `None` when every resident frame is pinned (or the cache is empty).
    #[inline]
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        self.ring.peek_victim()
    }

    /// Iterates resident entries in frame order without touching reference bits.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.ring.iter()
    }

    /// Verifies index, frame store, hand, and pin bookkeeping consistency.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.ring.check_invariants()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.ring.debug_validate_invariants();
    }

    /// Returns the underlying [`FrameRing`] for inspection.
    #[inline]
    pub fn as_ring(&self) -> &FrameRing<K, V> {
        &self.ring
    }
}

impl<K, V> ReadOnlyCache<K, V> for ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        ClockCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        ClockCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        ClockCache::capacity(self)
    }
}

impl<K, V> CoreCache<K, V> for ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn set(&mut self, key: K, value: V) -> Result<(), CacheError> {
        ClockCache::set(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        ClockCache::get(self, key)
    }

    fn clear(&mut self) {
        ClockCache::clear(self);
    }
}

impl<K, V> PinnableCache<K, V> for ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn pin(&mut self, key: &K) -> Result<(), CacheError> {
        ClockCache::pin(self, key)
    }

    #[inline]
    fn unpin(&mut self, key: &K) -> Result<(), CacheError> {
        ClockCache::unpin(self, key)
    }

    #[inline]
    fn pin_count(&self, key: &K) -> Result<usize, CacheError> {
        ClockCache::pin_count(self, key)
    }

    #[inline]
    fn is_dirty(&self, key: &K) -> Result<bool, CacheError> {
        ClockCache::is_dirty(self, key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> ClockMetricsSnapshot {
        ClockMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clears: self.metrics.clears,
            hand_advances: self.metrics.hand_advances,
            ref_bit_resets: self.metrics.ref_bit_resets,
            pinned_skips: self.metrics.pinned_skips,
            evictions_exhausted: self.metrics.evictions_exhausted,
            pin_calls: self.metrics.pin_calls,
            unpin_calls: self.metrics.unpin_calls,
            unpin_underflows: self.metrics.unpin_underflows,
            cache_len: self.ring.len(),
            pinned_len: self.ring.pinned_len(),
            capacity: self.ring.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ClockMetricsSnapshot> for ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> ClockMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for ClockCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn reset_metrics(&mut self) {
        self.metrics = ClockMetrics::default();
    }
}

impl<K, V> std::fmt::Debug for ClockCache<K, V>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockCache")
            .field("capacity", &self.ring.capacity())
            .field("len", &self.ring.len())
            .field("pinned", &self.ring.pinned_len())
            .field("hand", &self.ring.hand())
            .finish_non_exhaustive()
    }
}
