//! Error types for the UBX codec.
//!
//! The codec reports every failure to its caller and never logs; the session
//! layer decides what is recoverable (skip and resynchronize) and what is
//! terminal.

use thiserror::Error;

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced by the UBX codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// An encoder's output buffer cannot hold the frame.
    #[error("output buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall {
        /// Bytes the operation would write.
        needed: usize,
        /// Capacity of the buffer supplied by the caller.
        capacity: usize,
    },

    /// An argument count or range does not match the operation.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the arguments.
        reason: &'static str,
    },

    /// A mnemonic does not resolve to a class code.
    #[error("unknown UBX class mnemonic: '{mnemonic}'")]
    UnknownClass {
        /// The mnemonic that failed to resolve.
        mnemonic: String,
    },

    /// A mnemonic does not resolve to an id within its class.
    #[error("unknown UBX id mnemonic '{mnemonic}' in class '{class}'")]
    UnknownId {
        /// The class half of the lookup.
        class: String,
        /// The id mnemonic that failed to resolve.
        mnemonic: String,
    },

    /// The class is known but carries no id table yet.
    #[error("UBX class '{class}' has no id table")]
    ClassHasNoTable {
        /// The class whose table is missing.
        class: String,
    },

    /// Bytes do not start with the sync prefix or the checksum mismatches.
    #[error("malformed frame: {reason}")]
    Malformed {
        /// Which framing invariant was violated.
        reason: &'static str,
    },

    /// The frame is valid so far but more bytes are required.
    #[error("incomplete frame: {needed} more bytes required")]
    Incomplete {
        /// Exact number of additional bytes needed.
        needed: usize,
    },

    /// A payload ended before its length-governed layout was satisfied.
    #[error("payload truncated: need {needed} bytes, have {available}")]
    TruncatedPayload {
        /// Bytes the layout requires at this point.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// A well-formed frame carries a class/id the decoder does not know.
    #[error("unsupported UBX message: class {class:#04x}, id {id:#04x}")]
    UnsupportedMessage {
        /// Class code of the frame.
        class: u8,
        /// Id code of the frame.
        id: u8,
    },
}
