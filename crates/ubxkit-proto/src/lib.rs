//! Byte-accurate codec for the u-blox UBX receiver protocol.
//!
//! The crate is pure and synchronous: encoders write complete frames into
//! caller buffers, the framer and decoder operate on byte slices and report
//! exact consumed/needed counts, and nothing here performs I/O or logging.
//! Transport and session policy live in `ubxkit-session`.
//!
//! Layering, leaves first:
//!
//! - [`checksum`]: the 8-bit Fletcher pair and whole-frame verification
//! - [`ident`]: class codes and the closed [`MsgId`] universe
//! - [`tables`]: sorted mnemonic tables and label lookups
//! - [`frame`] / [`encode`]: frame layout and the per-operation encoders
//! - [`framer`]: sync scanning and the expected-size oracle
//! - [`reader`] / [`records`] / [`decode`]: typed payload views

pub mod checksum;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod frame;
pub mod framer;
pub mod ident;
pub mod reader;
pub mod records;
pub mod tables;

pub use checksum::Checksum;
pub use decode::{Decoded, next_record};
pub use errors::{ProtocolError, Result};
pub use frame::{Frame, MAX_FRAME_LEN, MAX_PAYLOAD};
pub use framer::{Scan, expected_size, scan};
pub use ident::MsgId;
pub use records::Record;
