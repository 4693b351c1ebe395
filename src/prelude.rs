pub use crate::ds::{FrameMeta, FrameRing, Sweep};
pub use crate::error::{CacheError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{ClockMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::clock::ClockCache;
pub use crate::traits::{CoreCache, PinnableCache, ReadOnlyCache};
