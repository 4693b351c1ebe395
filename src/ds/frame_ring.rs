//! Fixed frame store with a clock hand for pin-aware second-chance eviction.
//!
//! Frames live in a `Vec` allocated once at construction; a key index maps
//! each resident key to its frame id. The clock hand sweeps the frames when a
//! victim is needed, skipping pinned frames and clearing reference bits.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         FrameRing<K, V>                              │
//!   │                                                                      │
//!   │   frames: Vec<Frame<K,V>>   (fixed length == capacity)               │
//!   │   hand ─────────────────────────────────────────────┐                │
//!   │                                                     │                │
//!   │   index: FxHashMap<K, usize> (key -> frame id)       ▼                │
//!   │   ┌─────────┬─────────┐                                              │
//!   │   │  key A  │   0     │   frame[0] { ref:1 pin:0 dirty:1 }  [A]      │
//!   │   │  key B  │   1     │   frame[1] { ref:0 pin:2 dirty:1 }  [B]      │
//!   │   │  key C  │   2     │   frame[2] { ref:0 pin:0 dirty:1 }  [C]      │
//!   │   └─────────┴─────────┘   frame[3] free                     [ ]      │
//!   │                                                                      │
//!   │   Eviction scan (hand moves forward):                                │
//!   │   [A ref=1 pin=0] -> clear ref, advance                              │
//!   │   [B pin=2]       -> skip, advance (ref untouched)                   │
//!   │   [C ref=0 pin=0] -> victim                                          │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Structure
//!
//! ```text
//!   Frame<K, V>
//!   ┌───────────────────────────────┐
//!   │ entry: Option<(K, V)>         │  None == free
//!   │ referenced: bool              │
//!   │ dirty: bool                   │
//!   │ pin_count: usize              │
//!   └───────────────────────────────┘
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation   | Time        | Notes                                    |
//! |-------------|-------------|------------------------------------------|
//! | `place`     | O(n) worst  | First free frame, only while not full    |
//! | `sweep`     | O(n) worst  | At most `2 * capacity` frames visited    |
//! | `get`       | O(1)        | Sets reference bit                       |
//! | `pin/unpin` | O(1)        | Adjusts pin count and pinned tally       |
//!
//! ## Notes
//! - Frame ids are stable for the lifetime of the ring.
//! - A sweep never mutates anything when every resident frame is pinned.
//! - `debug_validate_invariants()` is available in debug/test builds.
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{CacheError, InvariantError};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Debug)]
struct Frame<K, V> {
    entry: Option<Entry<K, V>>,
    referenced: bool,
    dirty: bool,
    pin_count: usize,
}

impl<K, V> Frame<K, V> {
    fn free() -> Self {
        Self {
            entry: None,
            referenced: false,
            dirty: false,
            pin_count: 0,
        }
    }

    fn reset(&mut self) -> Option<Entry<K, V>> {
        self.referenced = false;
        self.dirty = false;
        self.pin_count = 0;
        self.entry.take()
    }

    fn occupy(&mut self, key: K, value: V) {
        self.entry = Some(Entry { key, value });
        self.referenced = false;
        self.dirty = true;
        self.pin_count = 0;
    }

    #[inline]
    fn is_occupied(&self) -> bool {
        self.entry.is_some()
    }

    fn meta(&self, slot: usize) -> FrameMeta {
        FrameMeta {
            slot,
            referenced: self.referenced,
            dirty: self.dirty,
            pin_count: self.pin_count,
        }
    }
}

/// Copy of a resident frame's bookkeeping bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMeta {
    /// Frame id (position in the frame store).
    pub slot: usize,
    /// Set on access, cleared when the clock hand passes.
    pub referenced: bool,
    /// Set by every insert or update.
    pub dirty: bool,
    /// Outstanding pins; pinned frames are never victims.
    pub pin_count: usize,
}

/// Result of one eviction sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sweep {
    /// Frame chosen for replacement; `None` when nothing is evictable.
    pub victim: Option<usize>,
    /// Frames the hand moved past before stopping.
    pub advanced: usize,
    /// Reference bits cleared along the way.
    pub ref_resets: usize,
    /// Pinned frames skipped along the way.
    pub pinned_skips: usize,
}

/// Fixed-size frame store implementing pin-aware CLOCK eviction.
#[derive(Debug)]
pub struct FrameRing<K, V> {
    frames: Vec<Frame<K, V>>,
    index: FxHashMap<K, usize>,
    hand: usize,
    pinned: usize,
}

impl<K, V> FrameRing<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new ring with `capacity` free frames.
    pub fn new(capacity: usize) -> Self {
        let mut frames = Vec::with_capacity(capacity);
        frames.resize_with(capacity, Frame::free);
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            frames,
            index,
            hand: 0,
            pinned: 0,
        }
    }

    /// Returns the number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Returns the number of occupied frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` when every frame is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.index.len() >= self.frames.len()
    }

    /// Returns the number of frames with a non-zero pin count.
    #[inline]
    pub fn pinned_len(&self) -> usize {
        self.pinned
    }

    /// Returns the current clock hand position.
    #[inline]
    pub fn hand(&self) -> usize {
        self.hand
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the frame id holding `key`.
    #[inline]
    pub fn slot_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns `key`'s bookkeeping bits without side effects.
    pub fn meta(&self, key: &K) -> Option<FrameMeta> {
        let idx = self.slot_of(key)?;
        Some(self.frames[idx].meta(idx))
    }

    /// Returns a shared reference to `key`'s value without setting the reference bit.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = self.slot_of(key)?;
        self.frames[idx].entry.as_ref().map(|entry| &entry.value)
    }

    /// Returns a shared reference to `key`'s value and sets the reference bit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = self.slot_of(key)?;
        let frame = &mut self.frames[idx];
        let entry = frame.entry.as_ref()?;
        frame.referenced = true;
        Some(&entry.value)
    }

    /// Replaces the value of a resident key, marking it referenced and dirty.
    ///
    /// Returns the previous value, or hands `value` back if `key` is absent.
    pub fn update(&mut self, key: &K, value: V) -> Result<V, V> {
        let Some(idx) = self.slot_of(key) else {
            return Err(value);
        };
        let frame = &mut self.frames[idx];
        match frame.entry.as_mut() {
            Some(entry) => {
                frame.referenced = true;
                frame.dirty = true;
                Ok(std::mem::replace(&mut entry.value, value))
            },
            None => Err(value),
        }
    }

    /// Places a new key in the lowest free frame.
    ///
    /// Returns the frame id, or hands the pair back if `key` is already
    /// resident or no frame is free. The hand does not move.
    pub fn place(&mut self, key: K, value: V) -> Result<usize, (K, V)> {
        if self.is_full() || self.index.contains_key(&key) {
            return Err((key, value));
        }
        let Some(idx) = self.frames.iter().position(|frame| !frame.is_occupied()) else {
            return Err((key, value));
        };
        self.frames[idx].occupy(key.clone(), value);
        self.index.insert(key, idx);
        Ok(idx)
    }

    /// Runs the clock sweep and returns the chosen victim frame.
    ///
    /// Starting at the hand: pinned frames are skipped, referenced frames
    /// have their bit cleared, and the first unpinned unreferenced frame is
    /// the victim. The hand is left on the victim. At most `2 * capacity`
    /// frames are visited.
    ///
    /// When no resident frame is unpinned the sweep returns without touching
    /// any state, so a failed eviction leaves the ring unchanged.
    pub fn sweep(&mut self) -> Sweep {
        let mut sweep = Sweep::default();
        let cap = self.capacity();
        if cap == 0 || self.index.len() == self.pinned {
            return sweep;
        }

        for _ in 0..2 * cap {
            let idx = self.hand;
            let frame = &mut self.frames[idx];
            if !frame.is_occupied() {
                sweep.victim = Some(idx);
                return sweep;
            }
            if frame.pin_count > 0 {
                sweep.pinned_skips += 1;
            } else if frame.referenced {
                frame.referenced = false;
                sweep.ref_resets += 1;
            } else {
                sweep.victim = Some(idx);
                return sweep;
            }
            self.advance_hand();
            sweep.advanced += 1;
        }
        sweep
    }

    /// Overwrites frame `idx` with a new entry and moves the hand past it.
    ///
    /// Returns the displaced entry, if the frame was occupied. New entries
    /// start unreferenced, dirty, and unpinned.
    ///
    /// Hands the pair back untouched if `idx` is out of range, the frame is
    /// pinned, or `key` is already resident.
    pub fn replace(&mut self, idx: usize, key: K, value: V) -> Result<Option<(K, V)>, (K, V)> {
        let pinned = match self.frames.get(idx) {
            Some(frame) => frame.pin_count > 0,
            None => return Err((key, value)),
        };
        if pinned || self.index.contains_key(&key) {
            return Err((key, value));
        }
        let evicted = self.frames[idx].reset().map(|old| {
            self.index.remove(&old.key);
            (old.key, old.value)
        });
        self.frames[idx].occupy(key.clone(), value);
        self.index.insert(key, idx);
        self.hand = (idx + 1) % self.frames.len();
        Ok(evicted)
    }

    /// Increments `key`'s pin count and returns the new count.
    pub fn pin(&mut self, key: &K) -> Result<usize, CacheError> {
        let idx = self.slot_of(key).ok_or(CacheError::NotFound)?;
        let frame = &mut self.frames[idx];
        if frame.pin_count == 0 {
            self.pinned += 1;
        }
        frame.pin_count += 1;
        Ok(frame.pin_count)
    }

    /// Decrements `key`'s pin count and returns the new count.
    pub fn unpin(&mut self, key: &K) -> Result<usize, CacheError> {
        let idx = self.slot_of(key).ok_or(CacheError::NotFound)?;
        let frame = &mut self.frames[idx];
        if frame.pin_count == 0 {
            return Err(CacheError::InvalidState);
        }
        frame.pin_count -= 1;
        if frame.pin_count == 0 {
            self.pinned -= 1;
        }
        Ok(frame.pin_count)
    }

    /// Peeks the frame a sweep would pick, without modifying state.
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        if self.capacity() == 0 || self.index.len() == self.pinned {
            return None;
        }
        self.unpinned_from_hand()
            .find(|(frame, _)| !frame.referenced)
            .or_else(|| self.unpinned_from_hand().next())
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn unpinned_from_hand(&self) -> impl Iterator<Item = (&Frame<K, V>, &Entry<K, V>)> {
        let cap = self.capacity();
        let hand = self.hand;
        let frames = &self.frames;
        (0..cap)
            .map(move |offset| &frames[(hand + offset) % cap])
            .filter(|frame| frame.pin_count == 0)
            .filter_map(|frame| frame.entry.as_ref().map(|entry| (frame, entry)))
    }

    /// Iterates resident entries in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.frames
            .iter()
            .filter_map(|frame| frame.entry.as_ref().map(|entry| (&entry.key, &entry.value)))
    }

    /// Frees every frame, empties the index, and rewinds the hand.
    pub fn clear(&mut self) {
        for frame in &mut self.frames {
            frame.reset();
        }
        self.index.clear();
        self.hand = 0;
        self.pinned = 0;
    }

    fn advance_hand(&mut self) {
        let cap = self.capacity();
        if cap == 0 {
            self.hand = 0;
        } else {
            self.hand = (self.hand + 1) % cap;
        }
    }

    /// Checks frame store, index, hand, and pin tally consistency.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let occupied = self.frames.iter().filter(|f| f.is_occupied()).count();
        if occupied != self.index.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but {} frames are occupied",
                self.index.len(),
                occupied
            )));
        }
        if self.index.len() > self.frames.len() {
            return Err(InvariantError::new("index larger than capacity"));
        }
        if !self.frames.is_empty() && self.hand >= self.frames.len() {
            return Err(InvariantError::new(format!(
                "hand {} out of range for capacity {}",
                self.hand,
                self.frames.len()
            )));
        }
        for (key, &idx) in &self.index {
            let resident = self
                .frames
                .get(idx)
                .and_then(|frame| frame.entry.as_ref())
                .is_some_and(|entry| &entry.key == key);
            if !resident {
                return Err(InvariantError::new(format!(
                    "index points at frame {idx} which does not hold the key"
                )));
            }
        }
        for (idx, frame) in self.frames.iter().enumerate() {
            if !frame.is_occupied() && (frame.referenced || frame.dirty || frame.pin_count > 0) {
                return Err(InvariantError::new(format!(
                    "free frame {idx} carries stale metadata"
                )));
            }
        }
        let pinned = self.frames.iter().filter(|f| f.pin_count > 0).count();
        if pinned != self.pinned {
            return Err(InvariantError::new(format!(
                "pinned tally {} disagrees with {} pinned frames",
                self.pinned, pinned
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frame ring invariant violated: {err}");
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns a debug snapshot of frame occupancy in ring order.
    pub fn debug_snapshot_frames(&self) -> Vec<Option<(&K, FrameMeta)>> {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, frame)| frame.entry.as_ref().map(|entry| (&entry.key, frame.meta(idx))))
            .collect()
    }
}
