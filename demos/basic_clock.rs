//! Example demonstrating the Clock (second-chance) buffer cache with pinning.
//!
//! Frames carry a reference bit, a dirty flag, and a pin count. The clock hand
//! sweeps the frames, clearing reference bits and skipping pinned frames until
//! it finds a victim.
//!
//! Run with: cargo run --example basic_clock

use framecache::prelude::*;

fn show(cache: &ClockCache<u32, String>, keys: &[u32]) {
    for key in keys {
        match cache.frame_meta(key) {
            Ok(meta) => println!(
                "  key {} -> slot {} (ref={}, dirty={}, pins={})",
                key, meta.slot, meta.referenced, meta.dirty, meta.pin_count
            ),
            Err(_) => println!("  key {} -> evicted", key),
        }
    }
}

fn main() -> Result<(), CacheError> {
    println!("=== Clock Cache Example ===\n");

    let mut cache = ClockCache::new(4)?;
    println!("Created clock cache: capacity={}\n", cache.capacity());

    for i in 1..=4 {
        cache.set(i, format!("page-{}", i))?;
    }
    println!("Inserted keys 1-4 into free frames");
    println!("  (New frames start unreferenced and dirty)");
    show(&cache, &[1, 2, 3, 4]);

    println!("\n=== Second Chance ===\n");

    println!("Reading key 1 sets its reference bit...");
    cache.get(&1)?;
    println!("Next victim would be: {:?}", cache.peek_victim().map(|(k, _)| *k));

    println!("\nInserting key 5 (triggers eviction)...");
    cache.set(5, "page-5".to_string())?;
    println!("  Key 1 was referenced: its bit was cleared and the hand moved on");
    show(&cache, &[1, 2, 3, 4, 5]);

    println!("\n=== Pinning ===\n");

    println!("Pinning key 3 twice (nested pins are counted)...");
    cache.pin(&3)?;
    cache.pin(&3)?;
    println!("  pin_count(3) = {}", cache.pin_count(&3)?);

    println!("\nInserting keys 6 and 7...");
    cache.set(6, "page-6".to_string())?;
    cache.set(7, "page-7".to_string())?;
    println!("  Pinned key 3 survives: {}", cache.contains(&3));
    show(&cache, &[1, 3, 4, 5, 6, 7]);

    println!("\n=== Exhaustion ===\n");

    let mut small = ClockCache::new(2)?;
    small.set("a", 1)?;
    small.set("b", 2)?;
    small.pin(&"a")?;
    small.pin(&"b")?;
    match small.set("c", 3) {
        Err(CacheError::EvictionExhausted) => {
            println!("Every frame pinned: insert rejected, cache untouched")
        },
        other => println!("Unexpected result: {:?}", other),
    }
    println!("  len={} pinned={}", small.len(), small.pinned_len());

    println!("\nUnpinning past zero is an error:");
    small.unpin(&"a")?;
    println!("  unpin(a) again -> {:?}", small.unpin(&"a"));

    println!("\n=== Dirty Flag ===\n");

    println!("Updating key 5 in place...");
    cache.set(5, "page-5-v2".to_string())?;
    println!("  is_dirty(5) = {}", cache.is_dirty(&5)?);
    println!("  value = {:?}", cache.peek(&5));
    println!("  Dirty frames stay dirty until they are evicted");

    println!("\n=== Clock Policy Properties ===\n");

    println!("  • O(1) lookups (sets a reference bit)");
    println!("  • Eviction sweep bounded by 2 x capacity visits");
    println!("  • Pinned frames are never chosen as victims");
    println!("  • A failed insert leaves every frame unchanged");

    Ok(())
}
