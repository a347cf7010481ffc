//! Line translation: mnemonic and hex forms to UBX frames.
//!
//! Two syntaxes are accepted:
//!
//! - `!UBX CLASS-ID arg1 arg2 ...` — the RTKLIB mnemonic form; decimal
//!   arguments, per-operation grammar
//! - `CLASS-ID - hh hh hh ...` — a hex dump of `class, id, lenLo, lenHi,
//!   payload` with the sync prefix and checksum supplied by the translator
//!
//! Lines that begin with neither form are silently ignored; recognized lines
//! with bad arguments are errors.

use crate::{
    errors::{Result, ScriptError},
    numlist::{leading_value, parse_dec_list, parse_hex_list},
    token::{is_separator, rest_after, tokens, trim},
};
use ubxkit_proto::{
    MAX_FRAME_LEN, MAX_PAYLOAD, MsgId, ProtocolError,
    checksum::checksum,
    encode::{self, GnssBlock, PortConfig},
    frame::SYNC,
    tables,
};

/// The mnemonic-form command prefix.
const UBX_PREFIX: &str = "!UBX";

/// The hex-form separator between mnemonic and bytes.
const HEX_SEPARATOR: &str = " - ";

fn dec(token: &str) -> Option<u32> {
    leading_value(token, 10)
}

/// Next strictly-decimal token, or an argument error.
fn need_dec<'a>(
    it: &mut impl Iterator<Item = &'a str>,
    reason: &'static str,
) -> Result<u32> {
    it.next()
        .and_then(dec)
        .ok_or(ScriptError::Protocol(ProtocolError::InvalidArgument { reason }))
}

/// Translate one configuration line.
///
/// Returns `Ok(None)` for lines that are not commands (comments, prose,
/// unrecognized mnemonics in the hex form). Returns an error only for lines
/// that were recognized as commands but carry bad arguments.
pub fn translate(line: &str) -> Result<Option<Vec<u8>>> {
    let t = trim(line);
    if is_mnemonic_line(t) {
        return translate_mnemonic(t).map(Some);
    }

    match translate_hex(t) {
        Ok(frame) => Ok(Some(frame)),
        // Not a hex command line at all: ignore silently.
        Err(
            ScriptError::MissingSeparator { .. }
            | ScriptError::Protocol(
                ProtocolError::UnknownClass { .. }
                | ProtocolError::UnknownId { .. }
                | ProtocolError::ClassHasNoTable { .. },
            ),
        ) => Ok(None),
        Err(other) => Err(other),
    }
}

fn is_mnemonic_line(line: &str) -> bool {
    line.strip_prefix(UBX_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(is_separator))
}

/// Translate a hex-form line: `CLASS-ID - hh hh ...`.
///
/// The embedded class, id, and length field are cross-checked against the
/// mnemonic and the parsed byte count before the checksum is appended.
pub fn translate_hex(line: &str) -> Result<Vec<u8>> {
    let t = trim(line);
    let sep = t
        .find(HEX_SEPARATOR)
        .ok_or_else(|| ScriptError::MissingSeparator { line: t.to_owned() })?;
    let mnemonic = trim(&t[..sep]);
    let (class, id) = tables::msg_code(mnemonic)?;

    let mut buf = [0u8; MAX_FRAME_LEN];
    buf[..2].copy_from_slice(&SYNC);
    let n = parse_hex_list(&t[sep + HEX_SEPARATOR.len()..], &mut buf[2..MAX_FRAME_LEN - 2])?;
    if n < 4 {
        return Err(ScriptError::Protocol(ProtocolError::InvalidArgument {
            reason: "hex line needs class, id and length bytes",
        }));
    }

    let field = usize::from(buf[4]) | (usize::from(buf[5]) << 8);
    if field + 4 != n {
        return Err(ScriptError::LengthMismatch { field, actual: n - 4 });
    }
    if buf[2] != class || buf[3] != id {
        return Err(ScriptError::ClassIdMismatch {
            mnemonic: mnemonic.to_owned(),
            found_class: buf[2],
            found_id: buf[3],
        });
    }

    let ck = checksum(&buf[2..2 + n]);
    buf[2 + n..4 + n].copy_from_slice(&ck);
    Ok(buf[..n + 4].to_vec())
}

/// Translate a mnemonic-form line: `!UBX CLASS-ID arg1 arg2 ...`.
pub fn translate_mnemonic(line: &str) -> Result<Vec<u8>> {
    let t = trim(line);
    let rest = t.strip_prefix(UBX_PREFIX).filter(|r| r.is_empty() || r.starts_with(is_separator));
    let Some(rest) = rest else {
        return Err(ScriptError::Protocol(ProtocolError::InvalidArgument {
            reason: "mnemonic line must start with !UBX",
        }));
    };

    let mnemonic = tokens(rest).next().unwrap_or("");
    let (class, id) = tables::msg_code(mnemonic)?;
    let args = rest_after(rest, 1);

    let mut buf = [0u8; MAX_FRAME_LEN];
    let n = match MsgId::from_parts(class, id) {
        Some(MsgId::MonVer) => encode::poll_version(&mut buf)?,
        Some(MsgId::MonHw) => encode::poll_hw(&mut buf)?,
        Some(MsgId::MonHw2) => encode::poll_hw2(&mut buf)?,
        Some(MsgId::UpdDownl) => upd_downl_args(args, &mut buf)?,
        Some(MsgId::CfgBds) => cfg_bds_args(args, &mut buf)?,
        Some(MsgId::CfgCfg) => cfg_cfg_args(args, &mut buf)?,
        Some(MsgId::CfgMsg) => cfg_msg_args(args, &mut buf)?,
        Some(MsgId::CfgPrt) => cfg_prt_args(args, &mut buf)?,
        Some(MsgId::CfgRate) => cfg_rate_args(args, &mut buf)?,
        Some(MsgId::CfgGnss) => cfg_gnss_args(args, &mut buf)?,
        _ => return Err(ScriptError::Unsupported { mnemonic: mnemonic.to_owned() }),
    };
    Ok(buf[..n].to_vec())
}

fn upd_downl_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    let mut it = tokens(args);
    let start_addr = need_dec(&mut it, "UPD-DOWNL takes two leading decimals")?;
    let flags = need_dec(&mut it, "UPD-DOWNL takes two leading decimals")?;

    let mut data = [0u8; MAX_PAYLOAD - 8];
    let len = parse_dec_list(rest_after(args, 2), &mut data)?;
    Ok(encode::upd_downl(buf, start_addr, flags, &data[..len])?)
}

fn cfg_bds_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    let mut it = tokens(args);
    let mut words = [0u32; 6];
    for word in &mut words {
        *word = need_dec(&mut it, "CFG-BDS takes six decimals")?;
    }
    Ok(encode::set_bds(buf, &words)?)
}

fn cfg_cfg_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    let mut it = tokens(args);
    let clear = need_dec(&mut it, "CFG-CFG takes four decimals")?;
    let save = need_dec(&mut it, "CFG-CFG takes four decimals")?;
    let load = need_dec(&mut it, "CFG-CFG takes four decimals")?;
    let device_mask = need_dec(&mut it, "CFG-CFG takes four decimals")?;
    Ok(encode::set_cfg(buf, clear, save, load, (device_mask & 0xFF) as u8)?)
}

fn cfg_msg_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    // Tokens beyond the eighth are ignored; non-numeric tokens read as zero.
    let vals: Vec<u8> =
        tokens(args).take(8).map(|t| (dec(t).unwrap_or(0) & 0xFF) as u8).collect();
    if vals.len() < 2 {
        return Err(ScriptError::Protocol(ProtocolError::InvalidArgument {
            reason: "CFG-MSG takes a message class and id",
        }));
    }
    Ok(encode::set_msg_rates(buf, vals[0], vals[1], &vals[2..])?)
}

fn cfg_prt_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    let toks: Vec<&str> = tokens(args).collect();
    if toks.is_empty() {
        return Ok(encode::poll_port(buf, None)?);
    }
    // A non-numeric first token polls the current port, like an absent one.
    let Some(port_id) = dec(toks[0]) else {
        return Ok(encode::poll_port(buf, None)?);
    };
    if toks.len() < 6 {
        return Ok(encode::poll_port(buf, Some((port_id & 0xFF) as u8))?);
    }

    let val = |i: usize| dec(toks[i]).unwrap_or(0);
    let cfg = PortConfig {
        port_id: (port_id & 0xFF) as u8,
        tx_ready: (val(1) & 0xFFFF) as u16,
        mode: val(2),
        baud_rate: val(3),
        in_proto_mask: (val(4) & 0xFFFF) as u16,
        out_proto_mask: (val(5) & 0xFFFF) as u16,
    };
    Ok(encode::set_port(buf, &cfg)?)
}

fn cfg_rate_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    let toks: Vec<&str> = tokens(args).collect();
    if toks.len() < 3 {
        return Ok(encode::poll_rate(buf)?);
    }
    let val = |i: usize| (dec(toks[i]).unwrap_or(0) & 0xFFFF) as u16;
    Ok(encode::set_rate(buf, val(0), val(1), val(2))?)
}

fn cfg_gnss_args(args: &str, buf: &mut [u8]) -> Result<usize> {
    let mut it = tokens(args);
    let msg_ver = need_dec(&mut it, "CFG-GNSS takes four leading decimals")?;
    let num_trk_hw = need_dec(&mut it, "CFG-GNSS takes four leading decimals")?;
    let num_trk_use = need_dec(&mut it, "CFG-GNSS takes four leading decimals")?;
    let num_blocks = need_dec(&mut it, "CFG-GNSS takes four leading decimals")?;
    if num_blocks > u32::from(u8::MAX) {
        return Err(ScriptError::Protocol(ProtocolError::InvalidArgument {
            reason: "CFG-GNSS takes at most 255 blocks",
        }));
    }

    let mut blocks = Vec::with_capacity(num_blocks as usize);
    for _ in 0..num_blocks {
        let gnss_id = need_dec(&mut it, "CFG-GNSS block takes five decimals")?;
        let res_trk_ch = need_dec(&mut it, "CFG-GNSS block takes five decimals")?;
        let max_trk_ch = need_dec(&mut it, "CFG-GNSS block takes five decimals")?;
        let _reserved = need_dec(&mut it, "CFG-GNSS block takes five decimals")?;
        let flags = need_dec(&mut it, "CFG-GNSS block takes five decimals")?;
        blocks.push(GnssBlock {
            gnss_id: (gnss_id & 0xFF) as u8,
            res_trk_ch: (res_trk_ch & 0xFF) as u8,
            max_trk_ch: (max_trk_ch & 0xFF) as u8,
            flags,
        });
    }
    Ok(encode::set_gnss(
        buf,
        (msg_ver & 0xFF) as u8,
        (num_trk_hw & 0xFF) as u8,
        (num_trk_use & 0xFF) as u8,
        &blocks,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_command_lines_are_ignored() {
        assert_eq!(translate(""), Ok(None));
        assert_eq!(translate("# comment"), Ok(None));
        assert_eq!(translate("hello world"), Ok(None));
        assert_eq!(translate("no separator here"), Ok(None));
        // Unknown mnemonic before a hex separator: not a recognized command.
        assert_eq!(translate("FOO-BAR - 01 02 00 00"), Ok(None));
    }

    #[test]
    fn mnemonic_lines_with_bad_args_error() {
        assert!(translate("!UBX CFG-BDS 1 2").is_err());
        assert!(translate("!UBX NOPE-NOPE").is_err());
        assert!(translate("!UBX UPD-DOWNL 1").is_err());
        assert!(translate("!UBX CFG-MSG 3").is_err());
    }

    #[test]
    fn prefix_must_be_a_whole_token() {
        assert_eq!(translate("!UBXX MON-VER"), Ok(None));
        assert!(translate("!UBX MON-VER").is_ok_and(|f| f.is_some()));
        assert!(translate("!UBX\tMON-VER").is_ok_and(|f| f.is_some()));
    }

    #[test]
    fn mnemonic_without_table_entry_is_unsupported() {
        // Resolves in the tables but has no argument grammar.
        assert_eq!(
            translate_mnemonic("!UBX CFG-NAV5"),
            Err(ScriptError::Unsupported { mnemonic: "CFG-NAV5".to_owned() })
        );
    }

    #[test]
    fn hex_line_class_mismatch() {
        // Mnemonic says CFG-RATE, bytes say CFG-PRT.
        let r = translate_hex("CFG-RATE - 06 00 00 00");
        assert!(matches!(r, Err(ScriptError::ClassIdMismatch { .. })));
    }

    #[test]
    fn hex_line_length_mismatch() {
        let r = translate_hex("CFG-RATE - 06 08 02 00 01");
        assert_eq!(r, Err(ScriptError::LengthMismatch { field: 2, actual: 1 }));
    }

    #[test]
    fn hex_line_too_short() {
        assert!(matches!(
            translate_hex("CFG-RATE - 06 08"),
            Err(ScriptError::Protocol(ProtocolError::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn cfg_gnss_rejects_absurd_block_counts() {
        assert!(matches!(
            translate_mnemonic("!UBX CFG-GNSS 0 0 0 4294967295"),
            Err(ScriptError::Protocol(ProtocolError::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn cfg_prt_non_numeric_port_polls_all() {
        let frame = translate_mnemonic("!UBX CFG-PRT x");
        assert_eq!(
            frame,
            Ok(vec![0xB5, 0x62, 0x06, 0x00, 0x00, 0x00, 0x06, 0x18])
        );
    }
}
