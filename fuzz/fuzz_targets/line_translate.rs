//! Fuzz target for the configuration line translators.
//!
//! # Invariants
//!
//! - Never panics on arbitrary text
//! - Every produced frame passes whole-frame verification

#![no_main]

use libfuzzer_sys::fuzz_target;
use ubxkit_proto::checksum::verify;
use ubxkit_script::translate;

fuzz_target!(|line: &str| {
    if let Ok(Some(frame)) = translate(line) {
        assert!(verify(&frame).is_ok());
    }
});
