//! Fuzz target for the stream decoder.
//!
//! # Invariants
//!
//! - Never panics on arbitrary bytes
//! - Skip always makes progress (>= 1 byte, <= buffer)
//! - Decoded frames render without panicking

#![no_main]

use libfuzzer_sys::fuzz_target;
use ubxkit_proto::{Decoded, next_record};

fuzz_target!(|data: &[u8]| {
    match next_record(data) {
        Decoded::Frame { consumed, record } => {
            assert!(consumed >= 8);
            assert!(consumed <= data.len());
            let _ = record.to_string();
        }
        Decoded::NeedMore { needed } => assert!(needed > 0),
        Decoded::Skip { consumed } => {
            assert!(consumed >= 1);
            assert!(consumed <= data.len().max(1));
        }
    }
});
