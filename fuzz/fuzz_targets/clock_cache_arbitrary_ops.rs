#![no_main]

use framecache::CacheError;
use framecache::policy::clock::ClockCache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on ClockCache
//
// Tests random sequences of set, get, pin, unpin, peek, and clear operations
// and checks the frame invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize % 32).max(1);
    let Ok(mut cache) = ClockCache::new(capacity) else {
        return;
    };

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 7;
        let key = data[idx + 1] as u32 % 64;
        let value = data[idx + 2] as u32;

        match op {
            0 | 1 => {
                let len_before = cache.len();
                let existed = cache.contains(&key);
                match cache.set(key, value) {
                    Ok(()) => {
                        assert_eq!(cache.peek(&key), Some(&value));
                        assert_eq!(cache.is_dirty(&key), Ok(true));
                    },
                    Err(err) => {
                        assert_eq!(err, CacheError::EvictionExhausted);
                        assert!(!existed);
                        assert_eq!(cache.len(), len_before);
                        assert_eq!(cache.pinned_len(), cache.len());
                    },
                }
            },
            2 => {
                let present = cache.contains(&key);
                assert_eq!(cache.get(&key).is_ok(), present);
            },
            3 => {
                let _ = cache.pin(&key);
            },
            4 => {
                let before = cache.pin_count(&key);
                match cache.unpin(&key) {
                    Ok(()) => assert_eq!(cache.pin_count(&key), before.map(|c| c - 1)),
                    Err(CacheError::InvalidState) => assert_eq!(before, Ok(0)),
                    Err(err) => assert_eq!(err, CacheError::NotFound),
                }
            },
            5 => {
                let _ = cache.peek_victim();
                let _ = cache.peek(&key);
            },
            6 => {
                if value == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        assert!(cache.check_invariants().is_ok());

        idx += 3;
    }
});
