/// Point-in-time copy of [`ClockMetrics`](crate::metrics::ClockMetrics)
/// plus gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClockMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clears: u64,

    pub hand_advances: u64,
    pub ref_bit_resets: u64,
    pub pinned_skips: u64, // frames passed over because pin_count > 0
    pub evictions_exhausted: u64,

    pub pin_calls: u64,
    pub unpin_calls: u64,
    pub unpin_underflows: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub pinned_len: usize,
    pub capacity: usize,
}

impl ClockMetricsSnapshot {
    /// Fraction of `get` calls that hit; `0.0` before any lookups.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
