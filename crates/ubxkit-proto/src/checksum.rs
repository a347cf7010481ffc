//! Fletcher-style checksum and whole-frame verification.
//!
//! Every UBX frame ends in two checksum bytes computed over the four header
//! bytes `class, id, len_lo, len_hi` plus the payload. The accumulator is the
//! 8-bit Fletcher variant: two wrapping sums, the second summing the first.

use crate::{
    errors::{ProtocolError, Result},
    frame::{HEADER_LEN, MIN_FRAME_LEN, SYNC, payload_len},
};

/// Incremental UBX checksum accumulator.
///
/// # Invariants
///
/// Feeding a byte sequence in any partition produces the same result as
/// feeding it whole: `update` is associative over concatenation. The session
/// layer relies on this when checksumming split buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    a: u8,
    b: u8,
}

impl Checksum {
    /// Fresh accumulator, both sums zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { a: 0, b: 0 }
    }

    /// Fold bytes into the accumulator.
    pub fn update(&mut self, bytes: &[u8]) {
        for &x in bytes {
            self.a = self.a.wrapping_add(x);
            self.b = self.b.wrapping_add(self.a);
        }
    }

    /// The `(ck_a, ck_b)` pair in wire order.
    #[must_use]
    pub const fn finish(self) -> [u8; 2] {
        [self.a, self.b]
    }
}

/// Checksum of a complete covered region.
#[must_use]
pub fn checksum(bytes: &[u8]) -> [u8; 2] {
    let mut ck = Checksum::new();
    ck.update(bytes);
    ck.finish()
}

/// Verify a complete frame.
///
/// Succeeds iff the buffer starts with the sync prefix, is at least the
/// minimum framed size, its length field matches the byte count, and the
/// trailing pair equals the checksum of `class..payload`.
///
/// # Errors
///
/// - [`ProtocolError::Incomplete`] if fewer than 8 bytes are present
/// - [`ProtocolError::Malformed`] on sync, length, or checksum mismatch
pub fn verify(frame: &[u8]) -> Result<()> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(ProtocolError::Incomplete { needed: MIN_FRAME_LEN - frame.len() });
    }
    if frame[..2] != SYNC {
        return Err(ProtocolError::Malformed { reason: "missing sync prefix" });
    }

    let count = payload_len(frame);
    let total = MIN_FRAME_LEN + count;
    if frame.len() < total {
        return Err(ProtocolError::Malformed { reason: "length field exceeds buffer" });
    }

    let expect = checksum(&frame[2..HEADER_LEN + count]);
    if expect != frame[HEADER_LEN + count..total] {
        return Err(ProtocolError::Malformed { reason: "checksum mismatch" });
    }
    Ok(())
}
