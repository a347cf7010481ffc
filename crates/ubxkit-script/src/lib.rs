//! Line-oriented configuration language for UBX receivers.
//!
//! Translates RTKLIB-style `!UBX CLASS-ID ...` mnemonic lines and
//! `CLASS-ID - hh hh ...` hex-dump lines into byte-accurate UBX frames via
//! the `ubxkit-proto` encoders. The translators are pure: no I/O, no
//! logging, errors to the caller.

mod errors;
mod line;
mod numlist;
mod token;

pub use errors::{Result, ScriptError};
pub use line::{translate, translate_hex, translate_mnemonic};
pub use numlist::{parse_dec_list, parse_hex_list};
