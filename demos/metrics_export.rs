//! Export clock cache counters in Prometheus text format.
//!
//! Run with: cargo run --example metrics_export --features metrics

use framecache::metrics::{MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter};
use framecache::prelude::*;

fn main() -> Result<(), CacheError> {
    let mut cache = ClockCache::new(8)?;

    for key in 0..32u64 {
        cache.set(key, key * 2)?;
        if key % 3 == 0 {
            let _ = cache.get(&(key / 2));
        }
    }
    cache.pin(&31)?;
    let _ = cache.unpin(&30);

    let snapshot = cache.snapshot();
    println!("hit rate: {:.2}", snapshot.hit_rate());

    let exporter = PrometheusTextExporter::new("framecache", std::io::stdout());
    exporter.export(&snapshot);

    Ok(())
}
