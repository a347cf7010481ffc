//! Stream decoder: verify one frame at the head of a buffer and emit its
//! typed record.
//!
//! [`next_record`] is the inbound counterpart of the encoders. It is
//! stateless between calls; the session layer owns the buffer and compacts
//! it by the reported byte counts.

use crate::{
    checksum::verify,
    frame::{HEADER_LEN, MAX_PAYLOAD, MIN_FRAME_LEN, SYNC, payload_len},
    framer::expected_size,
    ident::MsgId,
    records::Record,
};

/// Outcome of a decode attempt at the head of a buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A well-formed frame was decoded.
    Frame {
        /// Exact frame size; compact the buffer by this much.
        consumed: usize,
        /// The typed payload view.
        record: Record,
    },
    /// A header is present but the frame is incomplete.
    NeedMore {
        /// Exact number of additional bytes required.
        needed: usize,
    },
    /// The bytes do not decode; skip and resynchronize.
    Skip {
        /// Bytes to discard, at least one.
        consumed: usize,
    },
}

/// Decode one frame from the head of `buf`.
///
/// The skip length for undecodable input is the expected size clamped to
/// `[1, buf.len()]`, so a single corrupt sync byte costs exactly one byte of
/// resynchronization and a recognized-but-broken frame is dropped whole.
#[must_use]
pub fn next_record(buf: &[u8]) -> Decoded {
    let n = buf.len();
    if n < HEADER_LEN {
        return Decoded::NeedMore { needed: HEADER_LEN - n };
    }
    // A length field past the protocol maximum can never complete inside a
    // capped receive buffer; drop the opener and resynchronize.
    if buf[..2] == SYNC && payload_len(buf) > MAX_PAYLOAD {
        return Decoded::Skip { consumed: 2 };
    }
    if n < MIN_FRAME_LEN {
        return Decoded::NeedMore { needed: MIN_FRAME_LEN + payload_len(buf) - n };
    }

    let expected = expected_size(buf);
    if expected > n {
        return Decoded::NeedMore { needed: expected - n };
    }
    let skip = expected.clamp(1, n);

    if verify(buf).is_err() {
        return Decoded::Skip { consumed: skip };
    }

    let count = payload_len(buf);
    let payload = &buf[HEADER_LEN..HEADER_LEN + count];
    let Some(msg) = MsgId::from_parts(buf[2], buf[3]) else {
        return Decoded::Skip { consumed: skip };
    };
    match Record::parse(msg, payload) {
        Ok(record) => Decoded::Frame { consumed: MIN_FRAME_LEN + count, record },
        Err(_) => Decoded::Skip { consumed: skip },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode, records::mon};

    const MON_VER_POLL: [u8; 8] = [0xB5, 0x62, 0x0A, 0x04, 0x00, 0x00, 0x0E, 0x34];

    #[test]
    fn decode_mon_ver_poll() {
        assert_eq!(
            next_record(&MON_VER_POLL),
            Decoded::Frame { consumed: 8, record: Record::MonVer(mon::Version::Poll) }
        );
    }

    #[test]
    fn seven_bytes_need_one_more() {
        // The first 7 bytes of an 8-byte frame.
        assert_eq!(next_record(&MON_VER_POLL[..7]), Decoded::NeedMore { needed: 1 });
    }

    #[test]
    fn short_header_accounting() {
        assert_eq!(next_record(&[]), Decoded::NeedMore { needed: 6 });
        assert_eq!(next_record(&MON_VER_POLL[..3]), Decoded::NeedMore { needed: 3 });
        assert_eq!(next_record(&MON_VER_POLL[..6]), Decoded::NeedMore { needed: 2 });
    }

    #[test]
    fn oversized_expectation_waits() {
        // A MON-HW header expects 76 bytes regardless of its length field.
        let buf = [0xB5, 0x62, 0x0A, 0x09, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(next_record(&buf), Decoded::NeedMore { needed: 68 });
    }

    #[test]
    fn corrupt_checksum_skips_expected_size() {
        let mut buf = MON_VER_POLL;
        buf[7] ^= 0x01;
        assert_eq!(next_record(&buf), Decoded::Skip { consumed: 8 });
    }

    #[test]
    fn single_corrupt_sync_byte_skips_one() {
        let mut buf = [0u8; 8];
        buf[0] = 0x13;
        assert_eq!(next_record(&buf), Decoded::Skip { consumed: 1 });
    }

    #[test]
    fn oversized_length_field_is_dropped() {
        // needed must stay bounded by the maximum frame size (a capped
        // buffer could otherwise never satisfy it).
        let buf = [0xB5, 0x62, 0x01, 0x07, 0xFF, 0xFF, 0x00, 0x00];
        assert_eq!(next_record(&buf), Decoded::Skip { consumed: 2 });
    }

    #[test]
    fn second_sync_byte_mismatch_skips_one() {
        let buf = [0xB5, 0x13, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(next_record(&buf), Decoded::Skip { consumed: 1 });
    }

    #[test]
    fn unsupported_identity_skips_whole_frame() {
        // A valid frame for CFG-ANT (in the universe, no record layout).
        let mut buf = [0u8; 12];
        let frame = crate::frame::Frame { class: 0x06, id: 0x13, payload: vec![1, 2] };
        let n = frame.encode_into(&mut buf).map_err(|e| e.to_string());
        assert_eq!(n, Ok(10));
        assert_eq!(next_record(&buf[..10]), Decoded::Skip { consumed: 10 });
    }

    #[test]
    fn unknown_identity_skips_whole_frame() {
        // Well-formed frame with a class outside the universe.
        let frame = crate::frame::Frame { class: 0xF0, id: 0x0D, payload: vec![0xAA] };
        let wire = frame.to_bytes();
        assert_eq!(next_record(&wire), Decoded::Skip { consumed: 9 });
    }

    #[test]
    fn ack_frame_decodes() {
        let mut buf = [0u8; 16];
        let frame = crate::frame::Frame { class: 0x05, id: 0x01, payload: vec![0x06, 0x01] };
        let n = frame.encode_into(&mut buf).map_err(|e| e.to_string());
        assert_eq!(n, Ok(10));
        match next_record(&buf[..10]) {
            Decoded::Frame { consumed, record } => {
                assert_eq!(consumed, 10);
                assert_eq!(record.msg_id(), MsgId::AckAck);
            },
            other => unreachable!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn encoder_output_round_trips() {
        // Everything the encoders emit decodes cleanly.
        let mut buf = [0u8; 64];
        let cases: Vec<usize> = vec![
            encode::poll_version(&mut buf).unwrap_or(0),
        ];
        for n in cases {
            assert!(n >= MIN_FRAME_LEN);
            assert!(matches!(next_record(&buf[..n]), Decoded::Frame { consumed, .. } if consumed == n));
        }
    }
}
