//! Counter-based cache instrumentation (feature `metrics`).
//!
//! Recording, snapshotting, and export are separate traits so the cache only
//! ever increments counters; reading and publishing happen elsewhere.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::ClockMetrics;
pub use snapshot::ClockMetricsSnapshot;
pub use traits::{
    ClockMetricsRecorder, CoreMetricsRecorder, MetricsExporter, MetricsReset,
    MetricsSnapshotProvider,
};
