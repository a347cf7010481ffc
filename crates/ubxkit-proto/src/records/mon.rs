//! Typed views of MON-class payloads.

use std::fmt;

use crate::{errors::Result, reader::Reader};

/// Extract a fixed-width, NUL-padded ASCII field.
fn fixed_str(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// MON-VER: receiver/software version strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// Empty payload: a poll request.
    Poll,
    /// Populated payload: the version report.
    Report(VersionReport),
}

/// The populated MON-VER payload.
///
/// Fixed 30/10 byte software and hardware strings, an optional 30-byte ROM
/// string, then zero or more 30-byte extension strings bounded by the length
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReport {
    /// Software version, NUL-padded ASCII.
    pub sw_version: String,
    /// Hardware version, NUL-padded ASCII.
    pub hw_version: String,
    /// ROM version when the payload carries one.
    pub rom_version: Option<String>,
    /// Extension package strings.
    pub extensions: Vec<String>,
}

impl Version {
    /// Parse a MON-VER payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Ok(Self::Poll);
        }
        let mut r = Reader::new(payload);
        let sw_version = fixed_str(r.take(30)?);
        let hw_version = fixed_str(r.take(10)?);
        let rom_version = if r.remaining() >= 30 { Some(fixed_str(r.take(30)?)) } else { None };
        let mut extensions = Vec::new();
        while r.remaining() >= 30 {
            extensions.push(fixed_str(r.take(30)?));
        }
        Ok(Self::Report(VersionReport { sw_version, hw_version, rom_version, extensions }))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poll => write!(f, "\n\t(type): Poll Receiver/Software Version"),
            Self::Report(v) => {
                write!(f, "\n\t(type): Receiver/Software Version")?;
                write!(f, "\n\tswVersion: {}", v.sw_version)?;
                write!(f, "\n\thwVersion: {}", v.hw_version)?;
                if let Some(rom) = &v.rom_version {
                    write!(f, "\n\tromVersion: {rom}")?;
                }
                for (i, ext) in v.extensions.iter().enumerate() {
                    write!(f, "\n\textPackageVer[{i}]: {ext}")?;
                }
                Ok(())
            },
        }
    }
}

/// MON-HW: hardware status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwStatus {
    /// Empty payload: a poll request.
    Poll,
    /// The 68-byte status report.
    Report(HwReport),
}

/// The populated MON-HW payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HwReport {
    /// Mask of pins set as peripheral/PIO.
    pub pin_sel: u32,
    /// Mask of pins set as bank A/B.
    pub pin_bank: u32,
    /// Mask of pins set as input/output.
    pub pin_dir: u32,
    /// Mask of pins value low/high.
    pub pin_val: u32,
    /// Noise level as measured by the GPS core.
    pub noise_per_ms: u16,
    /// AGC monitor counter.
    pub agc_cnt: u16,
    /// Antenna supervisor state.
    pub a_status: u8,
    /// Antenna power status.
    pub a_power: u8,
    /// Status flags.
    pub flags: u8,
    /// Mask of pins that are used by the virtual pin manager.
    pub used_mask: u32,
    /// Virtual pin mapping.
    pub vp: [u8; 25],
    /// CW jamming indicator.
    pub jam_ind: u8,
    /// Mask of pins value using the PIO irq.
    pub pin_irq: u32,
    /// Mask of pins value using the PIO pull high resistor.
    pub pull_h: u32,
    /// Mask of pins value using the PIO pull low resistor.
    pub pull_l: u32,
}

impl HwStatus {
    /// Parse a MON-HW payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Ok(Self::Poll);
        }
        let mut r = Reader::new(payload);
        let pin_sel = r.u32()?;
        let pin_bank = r.u32()?;
        let pin_dir = r.u32()?;
        let pin_val = r.u32()?;
        let noise_per_ms = r.u16()?;
        let agc_cnt = r.u16()?;
        let a_status = r.u8()?;
        let a_power = r.u8()?;
        let flags = r.u8()?;
        r.skip(1)?; // reserved1
        let used_mask = r.u32()?;
        let mut vp = [0u8; 25];
        vp.copy_from_slice(r.take(25)?);
        let jam_ind = r.u8()?;
        r.skip(2)?; // reserved3
        let pin_irq = r.u32()?;
        let pull_h = r.u32()?;
        let pull_l = r.u32()?;
        Ok(Self::Report(HwReport {
            pin_sel,
            pin_bank,
            pin_dir,
            pin_val,
            noise_per_ms,
            agc_cnt,
            a_status,
            a_power,
            flags,
            used_mask,
            vp,
            jam_ind,
            pin_irq,
            pull_h,
            pull_l,
        }))
    }
}

impl fmt::Display for HwStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poll => write!(f, "\n\t(type): Poll Hardware Status"),
            Self::Report(v) => {
                write!(f, "\n\t(type): Hardware Status")?;
                write!(f, "\n\tpinSel: {:08X}", v.pin_sel)?;
                write!(f, "\n\tpinBank: {:08X}", v.pin_bank)?;
                write!(f, "\n\tpinDir: {:08X}", v.pin_dir)?;
                write!(f, "\n\tpinVal: {:08X}", v.pin_val)?;
                write!(f, "\n\tnoisePerMS: {:04X}", v.noise_per_ms)?;
                write!(f, "\n\tagcCnt: {:04X}", v.agc_cnt)?;
                write!(f, "\n\taStatus: {:02X}", v.a_status)?;
                write!(f, "\n\taPower: {:02X}", v.a_power)?;
                write!(f, "\n\tflags: {:02X}", v.flags)?;
                write!(f, "\n\tusedMask: {:08X}", v.used_mask)?;
                write!(f, "\n\tVP:")?;
                for b in v.vp {
                    write!(f, " {b:02X}")?;
                }
                write!(f, "\n\tjamInd: {:02X}", v.jam_ind)?;
                write!(f, "\n\tpinIrq: {:08X}", v.pin_irq)?;
                write!(f, "\n\tpullH: {:08X}", v.pull_h)?;
                write!(f, "\n\tpullL: {:08X}", v.pull_l)
            },
        }
    }
}

/// MON-HW2: extended hardware status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwStatus2 {
    /// Empty payload: a poll request.
    Poll,
    /// The 28-byte status report.
    Report(HwReport2),
}

/// The populated MON-HW2 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwReport2 {
    /// Imbalance of the I-part of the complex signal, signed.
    pub ofs_i: i8,
    /// Magnitude of the I-part.
    pub mag_i: u8,
    /// Imbalance of the Q-part, signed.
    pub ofs_q: i8,
    /// Magnitude of the Q-part.
    pub mag_q: u8,
    /// Source of the low-level configuration.
    pub cfg_source: u8,
    /// Low-level configuration word.
    pub low_lev_cfg: u32,
    /// POST status word.
    pub post_status: u32,
}

impl HwStatus2 {
    /// Parse a MON-HW2 payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Ok(Self::Poll);
        }
        let mut r = Reader::new(payload);
        let ofs_i = r.i8()?;
        let mag_i = r.u8()?;
        let ofs_q = r.i8()?;
        let mag_q = r.u8()?;
        let cfg_source = r.u8()?;
        r.skip(3)?; // reserved0
        let low_lev_cfg = r.u32()?;
        r.skip(8)?; // reserved1
        let post_status = r.u32()?;
        Ok(Self::Report(HwReport2 {
            ofs_i,
            mag_i,
            ofs_q,
            mag_q,
            cfg_source,
            low_lev_cfg,
            post_status,
        }))
    }
}

impl fmt::Display for HwStatus2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poll => write!(f, "\n\t(type): Poll Extended Hardware Status"),
            Self::Report(v) => {
                write!(f, "\n\t(type): Extended Hardware Status")?;
                write!(f, "\n\tofsI: {}", v.ofs_i)?;
                write!(f, "\n\tmagI: {}", v.mag_i)?;
                write!(f, "\n\tofsQ: {}", v.ofs_q)?;
                write!(f, "\n\tmagQ: {}", v.mag_q)?;
                write!(f, "\n\tcfgSource: {}", v.cfg_source)?;
                write!(f, "\n\tlowLevCfg: {:08X}", v.low_lev_cfg)?;
                write!(f, "\n\tpostStatus: {:08X}", v.post_status)
            },
        }
    }
}
