//! Fuzz target for the session drain loop.
//!
//! # Invariants
//!
//! - Arbitrary chunk sequences never panic or wedge the session
//! - The receive buffer never exceeds its capacity

#![no_main]

use libfuzzer_sys::fuzz_target;
use ubxkit_session::{RECV_CAPACITY, Session, SessionEvent};

fuzz_target!(|chunks: Vec<Vec<u8>>| {
    let mut session = Session::new();
    let _ = session.handle(SessionEvent::ConnectStarted);
    let _ = session.handle(SessionEvent::Connected);

    for chunk in chunks {
        let _ = session.handle(SessionEvent::Bytes(chunk));
        assert!(session.buffered() <= RECV_CAPACITY);
    }
});
