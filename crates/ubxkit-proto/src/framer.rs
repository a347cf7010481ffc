//! Streaming framer: sync-prefix scanning and the expected-size oracle.
//!
//! The session layer slides a receive buffer past junk until a `B5 62`
//! opener, then asks how large the frame will be before attempting to
//! verify it. Both operations are pure functions of the buffer prefix.

use crate::{
    frame::{HEADER_LEN, MIN_FRAME_LEN, SYNC, payload_len},
    ident::MsgId,
};

/// Outcome of a sync-prefix scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// A `B5 62` opener was found after `junk` disposable bytes.
    FrameStart {
        /// Bytes before the opener, safe to discard.
        junk: usize,
    },
    /// No complete opener yet.
    NeedMore {
        /// Bytes safe to discard.
        junk: usize,
        /// Bytes still required before a header could be complete.
        needed: usize,
    },
}

/// Scan for the next frame opener.
///
/// Everything left of the first `0xB5` is junk. A `0xB5` not followed by
/// `0x62` is itself junk and scanning continues. A `0xB5` as the final byte
/// may be the start of a frame, so it is kept and `needed` accounts for the
/// rest of a header.
#[must_use]
pub fn scan(buf: &[u8]) -> Scan {
    let mut from = 0;
    loop {
        let Some(at) = buf[from..].iter().position(|&b| b == SYNC[0]).map(|p| from + p) else {
            return Scan::NeedMore { junk: buf.len(), needed: HEADER_LEN };
        };
        if at + 1 == buf.len() {
            return Scan::NeedMore { junk: at, needed: HEADER_LEN - 1 };
        }
        if buf[at + 1] == SYNC[1] {
            return Scan::FrameStart { junk: at };
        }
        from = at + 1;
    }
}

/// Total frame size implied by a header.
///
/// Returns 0 or 1 when the first or second sync byte mismatches, telling the
/// caller to drop exactly that many bytes and rescan. Known fixed-size
/// messages override the length field; `RXM-RAW` sizes off its `numSV` byte.
/// With fewer than [`HEADER_LEN`] bytes the default is the minimum framed
/// size, prompting another read before the size is re-evaluated.
#[must_use]
pub fn expected_size(buf: &[u8]) -> usize {
    if buf.first() != Some(&SYNC[0]) {
        return 0;
    }
    if buf.get(1) != Some(&SYNC[1]) {
        return 1;
    }
    if buf.len() < HEADER_LEN {
        return MIN_FRAME_LEN;
    }

    let from_field = MIN_FRAME_LEN + payload_len(buf);
    match MsgId::from_parts(buf[2], buf[3]) {
        Some(MsgId::MonHw) => MIN_FRAME_LEN + 68,
        Some(MsgId::MonHw2) => MIN_FRAME_LEN + 28,
        Some(MsgId::MonRxr) => MIN_FRAME_LEN + 1,
        Some(MsgId::AckAck | MsgId::AckNak | MsgId::CfgMsg) => MIN_FRAME_LEN + 2,
        Some(MsgId::RxmRaw) => {
            // 8 fixed payload bytes plus the per-SV block count at offset 6.
            buf.get(HEADER_LEN + 6)
                .map_or(MIN_FRAME_LEN + 8, |&n| MIN_FRAME_LEN + 8 + usize::from(n))
        },
        Some(MsgId::RxmSfrb) => MIN_FRAME_LEN + 42,
        Some(MsgId::UpdDownl) => MIN_FRAME_LEN + 16,
        _ => from_field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junk_then_frame_start() {
        let buf = [0x00, 0x00, 0xB5, 0x62, 0x0A, 0x04, 0x00, 0x00, 0x0E, 0x34];
        assert_eq!(scan(&buf), Scan::FrameStart { junk: 2 });
    }

    #[test]
    fn no_sync_byte_consumes_everything() {
        let buf = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(scan(&buf), Scan::NeedMore { junk: 4, needed: HEADER_LEN });
    }

    #[test]
    fn lone_trailing_sync_byte_is_kept() {
        let buf = [0x00, 0x11, 0xB5];
        assert_eq!(scan(&buf), Scan::NeedMore { junk: 2, needed: HEADER_LEN - 1 });
    }

    #[test]
    fn false_opener_is_skipped() {
        // 0xB5 followed by a non-0x62 byte, then a real opener.
        let buf = [0xB5, 0x00, 0xB5, 0x62, 0x01, 0x02];
        assert_eq!(scan(&buf), Scan::FrameStart { junk: 2 });
    }

    #[test]
    fn adjacent_sync_bytes() {
        // B5 B5 62: the first B5 is junk, the pair starts at 1.
        let buf = [0xB5, 0xB5, 0x62];
        assert_eq!(scan(&buf), Scan::FrameStart { junk: 1 });
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(scan(&[]), Scan::NeedMore { junk: 0, needed: HEADER_LEN });
    }

    #[test]
    fn expected_size_sync_mismatches() {
        assert_eq!(expected_size(&[0x00, 0x62, 0, 0, 0, 0]), 0);
        assert_eq!(expected_size(&[0xB5, 0x00, 0, 0, 0, 0]), 1);
        assert_eq!(expected_size(&[]), 0);
        assert_eq!(expected_size(&[0xB5]), 1);
    }

    #[test]
    fn expected_size_from_length_field() {
        // MON-VER sizes off the length field.
        let buf = [0xB5, 0x62, 0x0A, 0x04, 0x28, 0x00];
        assert_eq!(expected_size(&buf), 8 + 40);
    }

    #[test]
    fn expected_size_overrides() {
        let hdr = |class: u8, id: u8| [0xB5, 0x62, class, id, 0x00, 0x00];
        assert_eq!(expected_size(&hdr(0x0A, 0x09)), 8 + 68); // MON-HW
        assert_eq!(expected_size(&hdr(0x0A, 0x0B)), 8 + 28); // MON-HW2
        assert_eq!(expected_size(&hdr(0x0A, 0x21)), 8 + 1); // MON-RXR
        assert_eq!(expected_size(&hdr(0x05, 0x01)), 8 + 2); // ACK-ACK
        assert_eq!(expected_size(&hdr(0x05, 0x00)), 8 + 2); // ACK-NAK
        assert_eq!(expected_size(&hdr(0x06, 0x01)), 8 + 2); // CFG-MSG
        assert_eq!(expected_size(&hdr(0x02, 0x11)), 8 + 42); // RXM-SFRB
        assert_eq!(expected_size(&hdr(0x09, 0x01)), 8 + 16); // UPD-DOWNL
    }

    #[test]
    fn expected_size_rxm_raw_counts_svs() {
        let mut buf = [0u8; 16];
        buf[..6].copy_from_slice(&[0xB5, 0x62, 0x02, 0x10, 0x08, 0x00]);
        buf[12] = 3; // numSV
        assert_eq!(expected_size(&buf), 8 + 8 + 3);

        // Header only: the numSV byte is not here yet.
        assert_eq!(expected_size(&buf[..6]), 8 + 8);
    }

    #[test]
    fn scan_never_overconsumes() {
        // junk never exceeds n, and FrameStart points at a real opener.
        let buf = [0xB5, 0x13, 0x00, 0xB5, 0x62];
        match scan(&buf) {
            Scan::FrameStart { junk } => {
                assert!(junk + 1 < buf.len());
                assert_eq!(&buf[junk..junk + 2], &SYNC);
            },
            Scan::NeedMore { junk, .. } => assert!(junk <= buf.len()),
        }
    }
}
