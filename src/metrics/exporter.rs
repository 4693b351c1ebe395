use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::metrics::snapshot::ClockMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
///
/// # Example
///
/// ```
/// use framecache::metrics::{ClockMetricsSnapshot, MetricsExporter, PrometheusTextExporter};
///
/// let exporter = PrometheusTextExporter::new("bufpool", Vec::new());
/// exporter.export(&ClockMetricsSnapshot { get_hits: 5, ..Default::default() });
///
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("bufpool_get_hits_total 5"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        // Counters are plain text; a panic mid-write cannot corrupt them.
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_sample("counter", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        self.write_sample("gauge", name, value);
    }

    fn write_sample(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.lock();
        let written = writeln!(writer, "# TYPE {} {}", name, kind)
            .and_then(|()| writeln!(writer, "{} {}", name, value));
        if let Err(err) = written {
            warn!(metric = name, error = %err, "metrics_export_write_failed");
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<ClockMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ClockMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evict_calls_total", snapshot.evict_calls),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("clears_total", snapshot.clears),
            ("hand_advances_total", snapshot.hand_advances),
            ("ref_bit_resets_total", snapshot.ref_bit_resets),
            ("pinned_skips_total", snapshot.pinned_skips),
            ("evictions_exhausted_total", snapshot.evictions_exhausted),
            ("pin_calls_total", snapshot.pin_calls),
            ("unpin_calls_total", snapshot.unpin_calls),
            ("unpin_underflows_total", snapshot.unpin_underflows),
        ];
        for (suffix, value) in counters {
            self.write_counter(&self.metric_name(suffix), value);
        }
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len as u64);
        self.write_gauge(&self.metric_name("pinned_len"), snapshot.pinned_len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}
