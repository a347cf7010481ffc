//! Typed views of CFG-class payloads.
//!
//! CFG messages follow the poll/set convention: an empty (or port-selecting
//! one-byte) payload polls the current configuration, a populated payload of
//! the type-specific length carries it.

use std::fmt;

use crate::{
    encode::GnssBlock,
    errors::Result,
    reader::Reader,
    tables::{mnemonic_for, port_label},
};

/// CFG-MSG: message rate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgRate {
    /// Two-byte payload: poll the rate of one message.
    Poll {
        /// Class of the message whose rate is polled.
        msg_class: u8,
        /// Id of the message whose rate is polled.
        msg_id: u8,
    },
    /// Longer payload: per-port rates.
    Rates {
        /// Class of the configured message.
        msg_class: u8,
        /// Id of the configured message.
        msg_id: u8,
        /// One rate byte per I/O port.
        rates: Vec<u8>,
    },
}

impl MsgRate {
    /// Parse a CFG-MSG payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let msg_class = r.u8()?;
        let msg_id = r.u8()?;
        if r.remaining() == 0 {
            return Ok(Self::Poll { msg_class, msg_id });
        }
        let rates = r.take(r.remaining())?.to_vec();
        Ok(Self::Rates { msg_class, msg_id, rates })
    }
}

impl fmt::Display for MsgRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, msg_class, msg_id) = match self {
            Self::Poll { msg_class, msg_id } => {
                ("Poll a message configuration", *msg_class, *msg_id)
            },
            Self::Rates { msg_class, msg_id, .. } => ("Set Message Rate(s)", *msg_class, *msg_id),
        };
        write!(f, "\n\t(type): {kind}")?;
        write!(f, "\n\tmsgClass: {msg_class:02X}")?;
        write!(f, "\n\tmsgID: {msg_id:02X}")?;
        write!(f, "\n\t(classid) {}", mnemonic_for(msg_class, msg_id))?;
        if let Self::Rates { rates, .. } = self {
            for (i, rate) in rates.iter().enumerate() {
                let state = if *rate == 0 { "OFF" } else { "ON" };
                write!(f, "\n\tout[{i}]: {rate:02X} ({}:{state})", port_label(i as u8))?;
            }
        }
        Ok(())
    }
}

/// CFG-PRT: I/O port configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    /// Empty payload: poll the currently used port.
    PollAll,
    /// One-byte payload: poll a specific port.
    Poll {
        /// Port whose configuration is requested.
        port_id: u8,
    },
    /// Twenty-byte payload: a full port configuration.
    Report(PortReport),
}

/// The populated CFG-PRT payload.
///
/// For USB ports the mode word is reserved; for non-UART ports the baud-rate
/// word is reserved. The parser records the raw words either way and
/// [`Port`]'s display labels them per port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortReport {
    /// Port id the configuration applies to.
    pub port_id: u8,
    /// TX-ready pin configuration.
    pub tx_ready: u16,
    /// Mode word (reserved for USB).
    pub mode: u32,
    /// Baud rate (reserved for non-UART ports).
    pub baud_rate: u32,
    /// Input protocol mask.
    pub in_proto_mask: u16,
    /// Output protocol mask.
    pub out_proto_mask: u16,
}

impl Port {
    /// Parse a CFG-PRT payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Ok(Self::PollAll);
        }
        let mut r = Reader::new(payload);
        let port_id = r.u8()?;
        if r.remaining() == 0 {
            return Ok(Self::Poll { port_id });
        }
        r.skip(1)?; // reserved0
        let tx_ready = r.u16()?;
        let mode = r.u32()?;
        let baud_rate = r.u32()?;
        let in_proto_mask = r.u16()?;
        let out_proto_mask = r.u16()?;
        r.skip(4)?; // reserved4, reserved5
        Ok(Self::Report(PortReport {
            port_id,
            tx_ready,
            mode,
            baud_rate,
            in_proto_mask,
            out_proto_mask,
        }))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PollAll => {
                write!(f, "\n\t(type): Polls the configuration of the used I/O Port")
            },
            Self::Poll { port_id } => {
                write!(f, "\n\t(type): Polls the configuration for one I/O Port")?;
                write!(f, "\n\tPortID: {} (0x{port_id:02X})", port_label(*port_id))
            },
            Self::Report(v) => {
                write!(f, "\n\t(type): Gotten/Set Port Configuration")?;
                write!(f, "\n\tPortID: {} (0x{:02X})", port_label(v.port_id), v.port_id)?;
                write!(f, "\n\ttxReady: {:04X}", v.tx_ready)?;
                if v.port_id == 3 {
                    write!(f, "\n\treserved2: {:08X}", v.mode)?;
                } else {
                    write!(f, "\n\tmode: {:08X}", v.mode)?;
                }
                if v.port_id == 1 || v.port_id == 2 {
                    write!(f, "\n\tbaudRate: {}(0x{:08X})", v.baud_rate, v.baud_rate)?;
                } else {
                    write!(f, "\n\treserved3: {:08X}", v.baud_rate)?;
                }
                write!(f, "\n\tinPortoMask: {:04X}", v.in_proto_mask)?;
                write!(f, "\n\toutPortoMask: {:04X}", v.out_proto_mask)
            },
        }
    }
}

/// CFG-RATE: navigation/measurement rate settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    /// Empty payload: a poll request.
    Poll,
    /// The six-byte settings payload.
    Report {
        /// Measurement interval in milliseconds.
        meas_rate: u16,
        /// Navigation solutions per measurement.
        nav_rate: u16,
        /// Time system the measurements are aligned to.
        time_ref: u16,
    },
}

impl Rate {
    /// Parse a CFG-RATE payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Ok(Self::Poll);
        }
        let mut r = Reader::new(payload);
        Ok(Self::Report { meas_rate: r.u16()?, nav_rate: r.u16()?, time_ref: r.u16()? })
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poll => write!(f, "\n\t(type): Poll Navigation/Measurement Rate Settings"),
            Self::Report { meas_rate, nav_rate, time_ref } => {
                write!(f, "\n\t(type): Navigation/Measurement Rate Settings")?;
                write!(f, "\n\tmeasRate: {meas_rate}(0x{meas_rate:04X})")?;
                write!(f, "\n\tnavRate: {nav_rate}(0x{nav_rate:04X})")?;
                write!(f, "\n\ttimeRef: {time_ref}(0x{time_ref:04X})")
            },
        }
    }
}

/// CFG-GNSS: GNSS system configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gnss {
    /// Message version.
    pub msg_ver: u8,
    /// Number of tracking channels in hardware.
    pub num_trk_hw: u8,
    /// Number of tracking channels in use.
    pub num_trk_use: u8,
    /// Per-system configuration blocks.
    pub blocks: Vec<GnssBlock>,
}

impl Gnss {
    /// Parse a CFG-GNSS payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let msg_ver = r.u8()?;
        let num_trk_hw = r.u8()?;
        let num_trk_use = r.u8()?;
        let count = r.u8()?;
        let mut blocks = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let gnss_id = r.u8()?;
            let res_trk_ch = r.u8()?;
            let max_trk_ch = r.u8()?;
            r.skip(1)?; // reserved1
            let flags = r.u32()?;
            blocks.push(GnssBlock { gnss_id, res_trk_ch, max_trk_ch, flags });
        }
        Ok(Self { msg_ver, num_trk_hw, num_trk_use, blocks })
    }
}

impl fmt::Display for Gnss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tmsgVer: {:02X}", self.msg_ver)?;
        write!(f, "\n\tnumTrkChHw: {}", self.num_trk_hw)?;
        write!(f, "\n\tnumTrkChUse: {}", self.num_trk_use)?;
        write!(f, "\n\tnumConfigBlocks: {}", self.blocks.len())?;
        for (i, b) in self.blocks.iter().enumerate() {
            let enabled = if b.flags & 0x01 == 0 { "Disabled" } else { "Enabled" };
            let sig_cfg = (b.flags >> 16) & 0xFF;
            write!(f, "\n\t[{i}]\tgnssId: {}", b.gnss_id)?;
            write!(f, "\n\t\tresTrkCh: {}", b.res_trk_ch)?;
            write!(f, "\n\t\tmaxTrkCh: {}", b.max_trk_ch)?;
            write!(f, "\n\t\tflags: {:08X} ({enabled},sigCfgMask={sig_cfg:02X})", b.flags)?;
        }
        Ok(())
    }
}

/// CFG-BDS: the six BeiDou configuration words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bds {
    /// The raw 32-bit words in payload order.
    pub words: [u32; 6],
}

impl Bds {
    /// Parse a CFG-BDS payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let mut words = [0u32; 6];
        for word in &mut words {
            *word = r.u32()?;
        }
        Ok(Self { words })
    }
}

impl fmt::Display for Bds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            write!(f, "\n\tX4_{}: {word:08X}", i + 1)?;
        }
        Ok(())
    }
}
