//! Error types for the line translators.

use thiserror::Error;
use ubxkit_proto::ProtocolError;

/// Result alias used throughout the translators.
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Errors produced while translating a configuration line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A codec error surfaced during translation (unknown mnemonic, buffer
    /// bounds, argument counts).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The hex form's ` - ` separator is missing.
    #[error("missing hex-line separator in '{line}'")]
    MissingSeparator {
        /// The offending line.
        line: String,
    },

    /// The hex form's embedded class/id bytes disagree with its mnemonic.
    #[error(
        "hex line class/id {found_class:#04x},{found_id:#04x} does not match \
         mnemonic '{mnemonic}'"
    )]
    ClassIdMismatch {
        /// The mnemonic before the separator.
        mnemonic: String,
        /// The class byte embedded in the hex dump.
        found_class: u8,
        /// The id byte embedded in the hex dump.
        found_id: u8,
    },

    /// The hex form's embedded length field disagrees with the byte count.
    #[error("hex line length field {field} does not match {actual} payload bytes")]
    LengthMismatch {
        /// Length claimed by the embedded field.
        field: usize,
        /// Payload bytes actually present.
        actual: usize,
    },

    /// The mnemonic resolves but the operation has no argument grammar.
    #[error("no argument grammar for '{mnemonic}'")]
    Unsupported {
        /// The resolved mnemonic.
        mnemonic: String,
    },
}
