//! Fuzz target for the sync-prefix scanner and expected-size oracle.
//!
//! # Invariants
//!
//! - Never panics on arbitrary bytes
//! - `junk` never exceeds the buffer
//! - `FrameStart` always points at a real `B5 62` opener

#![no_main]

use libfuzzer_sys::fuzz_target;
use ubxkit_proto::{Scan, expected_size, scan};

fuzz_target!(|data: &[u8]| {
    match scan(data) {
        Scan::FrameStart { junk } => {
            assert!(junk + 1 < data.len());
            assert_eq!(data[junk], 0xB5);
            assert_eq!(data[junk + 1], 0x62);
        }
        Scan::NeedMore { junk, needed } => {
            assert!(junk <= data.len());
            assert!(needed > 0);
        }
    }

    let _ = expected_size(data);
});
