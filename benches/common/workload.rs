//! Buffer-pool style workloads for hit-rate benchmarks.
//!
//! A [`KeyStream`] yields page ids from a deterministic distribution and a
//! [`PinPolicy`] decides which pages the simulated caller keeps pinned.
//! [`run_buffer_pool`] drives a [`PinnableCache`] with both and reports hits,
//! misses, and loads rejected because every frame was pinned.

use std::collections::VecDeque;
use std::sync::Arc;

use framecache::CacheError;
use framecache::traits::PinnableCache;

/// Page id distribution.
#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Every page in `[0, pages)` equally likely.
    Uniform,
    /// `hot_prob` of accesses land on the first `hot_fraction` of pages.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Pages `0, 1, 2, ...` wrapping at `pages`.
    Scan,
    /// Skewed popularity; page `i` has weight `1 / (i + 1)^theta`.
    Zipfian { theta: f64 },
}

/// Which pages the simulated caller holds pinned while it runs.
#[derive(Debug, Clone, Copy)]
pub enum PinPolicy {
    /// Release every page right after use.
    Unpinned,
    /// Pages below `pages` stay pinned once loaded, like index roots.
    PinnedHotSet { pages: u64 },
    /// The last `depth` fetched pages stay pinned, like an operator pipeline.
    Window { depth: usize },
}

/// Deterministic page id stream.
#[derive(Debug, Clone)]
pub struct KeyStream {
    pages: u64,
    workload: Workload,
    state: u64,
    cursor: u64,
    // cumulative weights, only for Zipfian
    cdf: Vec<f64>,
}

impl KeyStream {
    pub fn new(pages: u64, workload: Workload, seed: u64) -> Self {
        let pages = pages.max(1);
        let cdf = match workload {
            Workload::Zipfian { theta } => zipf_cdf(pages, theta),
            _ => Vec::new(),
        };
        Self {
            pages,
            workload,
            state: seed,
            cursor: 0,
            cdf,
        }
    }

    pub fn next_page(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.next_u64() % self.pages,
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot = ((self.pages as f64 * hot_fraction.clamp(0.0, 1.0)) as u64)
                    .clamp(1, self.pages);
                let cold = self.pages - hot;
                if cold == 0 || self.next_unit() < hot_prob {
                    self.next_u64() % hot
                } else {
                    hot + self.next_u64() % cold
                }
            },
            Workload::Scan => {
                let page = self.cursor;
                self.cursor = (self.cursor + 1) % self.pages;
                page
            },
            Workload::Zipfian { .. } => {
                let u = self.next_unit();
                let rank = self.cdf.partition_point(|&weight| weight < u) as u64;
                rank.min(self.pages - 1)
            },
        }
    }

    // splitmix64
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn zipf_cdf(pages: u64, theta: f64) -> Vec<f64> {
    let mut acc = 0.0;
    let mut cdf: Vec<f64> = (1..=pages)
        .map(|rank| {
            acc += 1.0 / (rank as f64).powf(theta);
            acc
        })
        .collect();
    for weight in &mut cdf {
        *weight /= acc;
    }
    cdf
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    pub hits: u64,
    pub misses: u64,
    /// Loads refused with `EvictionExhausted`.
    pub exhausted: u64,
}

impl PoolStats {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Drives `cache` as a buffer pool: fetch, load on miss, pin per `policy`.
///
/// Pages come from `load` so the harness does not allocate per miss. Pins
/// still held at the end are released before returning.
pub fn run_buffer_pool<C, V, F>(
    cache: &mut C,
    stream: &mut KeyStream,
    policy: PinPolicy,
    operations: usize,
    load: F,
) -> PoolStats
where
    C: PinnableCache<u64, Arc<V>>,
    F: Fn(u64) -> Arc<V>,
{
    let mut stats = PoolStats::default();
    let mut window: VecDeque<u64> = VecDeque::new();
    let mut hot_pinned: Vec<u64> = Vec::new();

    for _ in 0..operations {
        let page = stream.next_page();
        if cache.get(&page).is_ok() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
            match cache.set(page, load(page)) {
                Ok(()) => {},
                Err(CacheError::EvictionExhausted) => {
                    stats.exhausted += 1;
                    continue;
                },
                Err(_) => continue,
            }
        }

        match policy {
            PinPolicy::Unpinned => {},
            PinPolicy::PinnedHotSet { pages } => {
                if page < pages && cache.pin_count(&page) == Ok(0) && cache.pin(&page).is_ok() {
                    hot_pinned.push(page);
                }
            },
            PinPolicy::Window { depth } => {
                if cache.pin(&page).is_ok() {
                    window.push_back(page);
                }
                while window.len() > depth {
                    if let Some(old) = window.pop_front() {
                        let _ = cache.unpin(&old);
                    }
                }
            },
        }
    }

    for page in window.into_iter().chain(hot_pinned) {
        let _ = cache.unpin(&page);
    }
    stats
}
