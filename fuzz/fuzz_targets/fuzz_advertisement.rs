//! Fuzz target for info-refs advertisement parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(adv) = gitgate_git::Advertisement::parse(data) {
        for r in &adv.refs {
            assert!(r.id.len() == 40 || r.id.len() == 64);
            assert!(!r.name.is_empty());
        }
    }
});
