use crate::metrics::traits::{ClockMetricsRecorder, CoreMetricsRecorder};

// ---------------------------------------------------------------------------
// ClockMetrics
// ---------------------------------------------------------------------------

/// Plain counters recorded by [`ClockCache`](crate::policy::clock::ClockCache).
#[derive(Debug, Default, Clone)]
pub struct ClockMetrics {
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
    pub pinned_skips: u64,
    pub evictions_exhausted: u64,
    pub pin_calls: u64,
    pub unpin_calls: u64,
    pub unpin_underflows: u64,
}

impl CoreMetricsRecorder for ClockMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ClockMetricsRecorder for ClockMetrics {
    fn record_hand_advance(&mut self, steps: u64) {
        self.hand_advances += steps;
    }
    fn record_ref_bit_reset(&mut self, count: u64) {
        self.ref_bit_resets += count;
    }
    fn record_pinned_skip(&mut self, count: u64) {
        self.pinned_skips += count;
    }
    fn record_eviction_exhausted(&mut self) {
        self.evictions_exhausted += 1;
    }
    fn record_pin(&mut self) {
        self.pin_calls += 1;
    }
    fn record_unpin(&mut self) {
        self.unpin_calls += 1;
    }
    fn record_unpin_underflow(&mut self) {
        self.unpin_calls += 1;
        self.unpin_underflows += 1;
    }
}
