#![no_main]

use framecache::CacheError;
use framecache::policy::clock::ClockCache;
use libfuzzer_sys::fuzz_target;

// Fuzz eviction under heavy pinning
//
// Pins a fuzzer-chosen subset of a full cache, then drives inserts of fresh
// keys. Pinned keys must never be evicted, and an insert must fail exactly
// when every frame is pinned.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let capacity = (data[0] as usize % 16).max(1);
    let Ok(mut cache) = ClockCache::new(capacity) else {
        return;
    };
    for key in 0..capacity as u32 {
        let _ = cache.set(key, key);
    }

    let mask = u16::from_le_bytes([data[1], data[2]]);
    let pinned: Vec<u32> = (0..capacity as u32)
        .filter(|k| mask & (1u16 << *k) != 0)
        .collect();
    for key in &pinned {
        let _ = cache.pin(key);
    }

    for (i, byte) in data[3..].iter().enumerate() {
        let key = 1_000 + i as u32;
        if byte % 4 == 0 {
            let _ = cache.get(&(*byte as u32 % capacity as u32));
        }

        let result = cache.set(key, *byte as u32);
        if pinned.len() == capacity {
            assert_eq!(result, Err(CacheError::EvictionExhausted));
        } else {
            assert!(result.is_ok());
        }

        for pinned_key in &pinned {
            assert!(cache.contains(pinned_key));
        }
        assert!(cache.check_invariants().is_ok());
    }
});
