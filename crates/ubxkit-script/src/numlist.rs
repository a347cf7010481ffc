//! Numeric list parsers.
//!
//! Both parsers read a whitespace-separated run of non-negative integers
//! into an output byte buffer, truncating each value to 8 bits. Parsing
//! stops at the first token that does not start with a digit, at end of
//! input, or with an error when the output buffer is exhausted.

use crate::{
    errors::{Result, ScriptError},
    token::tokens,
};
use ubxkit_proto::ProtocolError;

/// Leading numeric prefix of a token in the given radix, wrapping on
/// overflow the way a C scan into a fixed-width integer would.
pub(crate) fn leading_value(token: &str, radix: u32) -> Option<u32> {
    let mut val: u32 = 0;
    let mut any = false;
    for c in token.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        val = val.wrapping_mul(radix).wrapping_add(d);
        any = true;
    }
    any.then_some(val)
}

fn parse_list(input: &str, radix: u32, out: &mut [u8]) -> Result<usize> {
    let mut written = 0;
    for token in tokens(input) {
        let Some(val) = leading_value(token, radix) else { break };
        if written >= out.len() {
            return Err(ScriptError::Protocol(ProtocolError::BufferTooSmall {
                needed: written + 1,
                capacity: out.len(),
            }));
        }
        out[written] = (val & 0xFF) as u8;
        written += 1;
    }
    Ok(written)
}

/// Parse a decimal byte list. Returns the number of bytes written.
pub fn parse_dec_list(input: &str, out: &mut [u8]) -> Result<usize> {
    parse_list(input, 10, out)
}

/// Parse a hexadecimal byte list. Returns the number of bytes written.
pub fn parse_hex_list(input: &str, out: &mut [u8]) -> Result<usize> {
    parse_list(input, 16, out)
}
