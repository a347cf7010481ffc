//! Frame encoders for the supported poll and set operations.
//!
//! Every encoder writes a complete frame (sync prefix, class, id,
//! little-endian length, payload, checksum) into a caller-supplied buffer
//! and returns the byte count. Encoders never allocate.

use crate::{
    checksum::checksum,
    errors::{ProtocolError, Result},
    frame::{HEADER_LEN, MAX_PAYLOAD, MIN_FRAME_LEN, SYNC},
    ident::MsgId,
};

/// One CFG-GNSS configuration block.
///
/// Serialized as 8 bytes: `gnssId, resTrkCh, maxTrkCh, 0, flags (LE u32)`.
/// The reserved byte is always written as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GnssBlock {
    /// GNSS id (0 GPS, 1 SBAS, 2 Galileo, 3 BeiDou, 5 QZSS, 6 GLONASS).
    pub gnss_id: u8,
    /// Number of reserved (minimum) tracking channels.
    pub res_trk_ch: u8,
    /// Maximum number of tracking channels.
    pub max_trk_ch: u8,
    /// Bitfield: enable flag and signal configuration mask.
    pub flags: u32,
}

/// CFG-PRT "set" arguments: the 20-byte port configuration.
///
/// The mode and baud-rate words double as reserved fields for ports that do
/// not use them (USB, SPI, I2C); the encoder writes them verbatim either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    /// Port id (0 I2C, 1 UART1, 2 UART2, 3 USB, 4 SPI).
    pub port_id: u8,
    /// TX-ready pin configuration.
    pub tx_ready: u16,
    /// UART mode bitfield.
    pub mode: u32,
    /// UART baud rate in bits/s.
    pub baud_rate: u32,
    /// Input protocol mask.
    pub in_proto_mask: u16,
    /// Output protocol mask.
    pub out_proto_mask: u16,
}

/// Write one frame, filling the payload through `fill`.
fn write_frame(
    out: &mut [u8],
    msg: MsgId,
    payload_len: usize,
    fill: impl FnOnce(&mut [u8]),
) -> Result<usize> {
    debug_assert!(payload_len <= MAX_PAYLOAD);
    let total = MIN_FRAME_LEN + payload_len;
    if out.len() < total {
        return Err(ProtocolError::BufferTooSmall { needed: total, capacity: out.len() });
    }

    out[..2].copy_from_slice(&SYNC);
    out[2] = msg.class();
    out[3] = msg.id();
    out[4..6].copy_from_slice(&(payload_len as u16).to_le_bytes());
    fill(&mut out[HEADER_LEN..HEADER_LEN + payload_len]);

    let ck = checksum(&out[2..HEADER_LEN + payload_len]);
    out[HEADER_LEN + payload_len..total].copy_from_slice(&ck);
    Ok(total)
}

/// Poll the receiver/software version (MON-VER).
pub fn poll_version(out: &mut [u8]) -> Result<usize> {
    write_frame(out, MsgId::MonVer, 0, |_| {})
}

/// Poll the hardware status (MON-HW).
pub fn poll_hw(out: &mut [u8]) -> Result<usize> {
    write_frame(out, MsgId::MonHw, 0, |_| {})
}

/// Poll the extended hardware status (MON-HW2).
pub fn poll_hw2(out: &mut [u8]) -> Result<usize> {
    write_frame(out, MsgId::MonHw2, 0, |_| {})
}

/// Set per-port message rates (CFG-MSG).
///
/// `rates` holds either a single rate for the current port or one rate per
/// port for all six I/O targets.
///
/// # Errors
///
/// [`ProtocolError::InvalidArgument`] unless `rates.len()` is 1 or 6.
pub fn set_msg_rates(out: &mut [u8], msg_class: u8, msg_id: u8, rates: &[u8]) -> Result<usize> {
    if rates.len() != 1 && rates.len() != 6 {
        return Err(ProtocolError::InvalidArgument { reason: "CFG-MSG takes 1 or 6 rates" });
    }
    write_frame(out, MsgId::CfgMsg, 2 + rates.len(), |p| {
        p[0] = msg_class;
        p[1] = msg_id;
        p[2..].copy_from_slice(rates);
    })
}

/// Poll the configuration of one I/O port, or of the current port when
/// `port` is `None` (CFG-PRT).
pub fn poll_port(out: &mut [u8], port: Option<u8>) -> Result<usize> {
    match port {
        None => write_frame(out, MsgId::CfgPrt, 0, |_| {}),
        Some(port_id) => write_frame(out, MsgId::CfgPrt, 1, |p| p[0] = port_id),
    }
}

/// Set an I/O port configuration (CFG-PRT).
pub fn set_port(out: &mut [u8], cfg: &PortConfig) -> Result<usize> {
    write_frame(out, MsgId::CfgPrt, 20, |p| {
        p[0] = cfg.port_id;
        p[1] = 0; // reserved0
        p[2..4].copy_from_slice(&cfg.tx_ready.to_le_bytes());
        p[4..8].copy_from_slice(&cfg.mode.to_le_bytes());
        p[8..12].copy_from_slice(&cfg.baud_rate.to_le_bytes());
        p[12..14].copy_from_slice(&cfg.in_proto_mask.to_le_bytes());
        p[14..16].copy_from_slice(&cfg.out_proto_mask.to_le_bytes());
        p[16..20].fill(0); // reserved4, reserved5
    })
}

/// Poll the navigation/measurement rate settings (CFG-RATE).
pub fn poll_rate(out: &mut [u8]) -> Result<usize> {
    write_frame(out, MsgId::CfgRate, 0, |_| {})
}

/// Set the navigation/measurement rates (CFG-RATE).
pub fn set_rate(out: &mut [u8], meas_rate: u16, nav_rate: u16, time_ref: u16) -> Result<usize> {
    write_frame(out, MsgId::CfgRate, 6, |p| {
        p[0..2].copy_from_slice(&meas_rate.to_le_bytes());
        p[2..4].copy_from_slice(&nav_rate.to_le_bytes());
        p[4..6].copy_from_slice(&time_ref.to_le_bytes());
    })
}

/// Clear, save, and load configuration sections (CFG-CFG).
///
/// The optional trailing device mask byte is written only when non-zero,
/// giving the 12- or 13-byte payload form.
pub fn set_cfg(out: &mut [u8], clear: u32, save: u32, load: u32, device_mask: u8) -> Result<usize> {
    let payload_len = if device_mask == 0 { 12 } else { 13 };
    write_frame(out, MsgId::CfgCfg, payload_len, |p| {
        p[0..4].copy_from_slice(&clear.to_le_bytes());
        p[4..8].copy_from_slice(&save.to_le_bytes());
        p[8..12].copy_from_slice(&load.to_le_bytes());
        if device_mask != 0 {
            p[12] = device_mask;
        }
    })
}

/// Write the six CFG-BDS configuration words.
pub fn set_bds(out: &mut [u8], words: &[u32; 6]) -> Result<usize> {
    write_frame(out, MsgId::CfgBds, 24, |p| {
        for (chunk, word) in p.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    })
}

/// Set the GNSS system configuration (CFG-GNSS).
///
/// # Errors
///
/// - [`ProtocolError::InvalidArgument`] when more than 255 blocks are given
/// - [`ProtocolError::BufferTooSmall`] when the blocks exceed the maximum
///   payload
pub fn set_gnss(
    out: &mut [u8],
    msg_ver: u8,
    num_trk_hw: u8,
    num_trk_use: u8,
    blocks: &[GnssBlock],
) -> Result<usize> {
    if blocks.len() > usize::from(u8::MAX) {
        return Err(ProtocolError::InvalidArgument { reason: "CFG-GNSS takes at most 255 blocks" });
    }
    let payload_len = 4 + 8 * blocks.len();
    if payload_len > MAX_PAYLOAD {
        return Err(ProtocolError::BufferTooSmall {
            needed: MIN_FRAME_LEN + payload_len,
            capacity: out.len(),
        });
    }
    write_frame(out, MsgId::CfgGnss, payload_len, |p| {
        p[0] = msg_ver;
        p[1] = num_trk_hw;
        p[2] = num_trk_use;
        p[3] = blocks.len() as u8;
        for (chunk, block) in p[4..].chunks_exact_mut(8).zip(blocks) {
            chunk[0] = block.gnss_id;
            chunk[1] = block.res_trk_ch;
            chunk[2] = block.max_trk_ch;
            chunk[3] = 0; // reserved1
            chunk[4..8].copy_from_slice(&block.flags.to_le_bytes());
        }
    })
}

/// Download data to receiver memory (UPD-DOWNL).
///
/// # Errors
///
/// [`ProtocolError::BufferTooSmall`] when `data` would exceed the maximum
/// payload.
pub fn upd_downl(out: &mut [u8], start_addr: u32, flags: u32, data: &[u8]) -> Result<usize> {
    let payload_len = 8 + data.len();
    if payload_len > MAX_PAYLOAD {
        return Err(ProtocolError::BufferTooSmall {
            needed: MIN_FRAME_LEN + payload_len,
            capacity: out.len(),
        });
    }
    write_frame(out, MsgId::UpdDownl, payload_len, |p| {
        p[0..4].copy_from_slice(&start_addr.to_le_bytes());
        p[4..8].copy_from_slice(&flags.to_le_bytes());
        p[8..].copy_from_slice(data);
    })
}
