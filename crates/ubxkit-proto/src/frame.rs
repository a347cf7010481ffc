//! Frame layout constants and the owned frame type.
//!
//! A UBX frame is `B5 62, class, id, len (LE u16), payload, ck_a, ck_b`.
//! [`Frame`] is a pure data holder used where a whole frame crosses an API
//! boundary (the text translators, round-trip tests); the streaming decoder
//! works on byte slices and never materializes one.

use crate::{
    checksum::{checksum, verify},
    errors::{ProtocolError, Result},
};

/// The fixed two-byte frame opener.
pub const SYNC: [u8; 2] = [0xB5, 0x62];

/// Bytes before the payload: sync, class, id, length.
pub const HEADER_LEN: usize = 6;

/// Minimum framed size: header plus the two checksum bytes.
pub const MIN_FRAME_LEN: usize = 8;

/// Largest payload the codec handles.
pub const MAX_PAYLOAD: usize = 1200;

/// Largest complete frame the codec handles.
pub const MAX_FRAME_LEN: usize = MIN_FRAME_LEN + MAX_PAYLOAD;

/// Payload length field of a header, little-endian.
///
/// The caller must supply at least [`HEADER_LEN`] bytes.
#[must_use]
pub fn payload_len(buf: &[u8]) -> usize {
    usize::from(buf[4]) | (usize::from(buf[5]) << 8)
}

/// A complete, owned UBX frame.
///
/// # Invariants
///
/// `payload.len()` never exceeds [`MAX_PAYLOAD`]; [`Frame::new`] rejects
/// larger payloads and [`Frame::parse`] verifies the wire invariants
/// (sync prefix, length field, checksum) before constructing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Class code.
    pub class: u8,
    /// Id code within the class.
    pub id: u8,
    /// Payload bytes, without length field or checksum.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a frame from parts.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::BufferTooSmall`] if the payload exceeds
    /// [`MAX_PAYLOAD`].
    pub fn new(class: u8, id: u8, payload: impl Into<Vec<u8>>) -> Result<Self> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD {
            return Err(ProtocolError::BufferTooSmall {
                needed: payload.len(),
                capacity: MAX_PAYLOAD,
            });
        }
        Ok(Self { class, id, payload })
    }

    /// Message identity as `(class << 8) | id`.
    #[must_use]
    pub fn msg_code(&self) -> u16 {
        (u16::from(self.class) << 8) | u16::from(self.id)
    }

    /// Total size on the wire.
    #[must_use]
    pub fn wire_len(&self) -> usize {
        MIN_FRAME_LEN + self.payload.len()
    }

    /// Parse and verify a complete frame from the front of `bytes`.
    ///
    /// Trailing bytes past the framed length are ignored.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Incomplete`] if fewer than 8 bytes are present
    /// - [`ProtocolError::Malformed`] on sync, length, or checksum mismatch
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        verify(bytes)?;
        let count = payload_len(bytes);
        Ok(Self {
            class: bytes[2],
            id: bytes[3],
            payload: bytes[HEADER_LEN..HEADER_LEN + count].to_vec(),
        })
    }

    /// Write the frame into `out`, returning the byte count.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::BufferTooSmall`] if `out` cannot hold the frame.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        let total = self.wire_len();
        if out.len() < total {
            return Err(ProtocolError::BufferTooSmall { needed: total, capacity: out.len() });
        }

        out[..2].copy_from_slice(&SYNC);
        out[2] = self.class;
        out[3] = self.id;
        let count = self.payload.len() as u16;
        out[4..6].copy_from_slice(&count.to_le_bytes());
        out[HEADER_LEN..HEADER_LEN + self.payload.len()].copy_from_slice(&self.payload);

        let ck = checksum(&out[2..HEADER_LEN + self.payload.len()]);
        out[total - 2..total].copy_from_slice(&ck);
        Ok(total)
    }

    /// The frame as a freshly allocated byte vector.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.wire_len()];
        // Cannot fail: the vector is sized to wire_len.
        let _ = self.encode_into(&mut out);
        out
    }
}
