//! Typed views of the undocumented TRK-class payloads.
//!
//! These messages are not in the public protocol description; layouts follow
//! what the receivers actually emit. Repeating records are strided by a
//! type-dependent constant and run to the end of the payload; a trailing
//! partial record is ignored.

use std::fmt;

use crate::{errors::Result, reader::Reader, tables::gnss_label};

/// Satellite PRN numbers from this value up are SBAS.
const MIN_PRN_SBAS: u8 = 120;

/// One TRK-D5 channel record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackChannel {
    /// Transmission time in the GPS week.
    pub ts: f64,
    /// Accumulated Doppler range.
    pub adr: f64,
    /// Doppler frequency.
    pub dop: f32,
    /// Signal-to-noise ratio.
    pub snr: u16,
    /// Quality indicator (low three bits).
    pub quality: u8,
    /// GNSS id; inferred from the PRN for the pre-type-6 layouts.
    pub gnss_id: u8,
    /// Satellite id (PRN/slot number).
    pub sv_id: u8,
    /// GLONASS frequency id; only present in the type-6 layout.
    pub freq_id: Option<u8>,
    /// Channel flags.
    pub flags: u8,
}

/// TRK-D5: tracking status dump.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackData {
    /// Layout discriminator from the first payload byte.
    pub kind: u8,
    /// Channel records.
    pub channels: Vec<TrackChannel>,
}

impl TrackData {
    /// Parse a TRK-D5 payload.
    ///
    /// Type 3 starts records at offset 80 with a 56-byte stride, type 6 at
    /// 80 with a 64-byte stride, anything else at 72 with a 56-byte stride.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let kind = r.u8()?;
        let (start, stride) = match kind {
            3 => (80, 56),
            6 => (80, 64),
            _ => (72, 56),
        };
        let mut r = Reader::new(payload);
        r.skip(start.min(payload.len()))?;

        let mut channels = Vec::new();
        while r.remaining() >= stride {
            let rec = r.take(stride)?;
            let mut fields = Reader::new(rec);
            let ts = fields.f64()?;
            let adr = fields.f64()?;
            let dop = fields.f32()?;
            let snr = u16::from_le_bytes([rec[32], rec[33]]);
            let quality = rec[41] & 0x07;
            let flags = rec[54];
            let (gnss_id, sv_id, freq_id) = if kind == 6 {
                (rec[56], rec[57], Some(rec[59]))
            } else {
                let sv_id = rec[34];
                let gnss_id = if sv_id < MIN_PRN_SBAS { 0 } else { 1 };
                (gnss_id, sv_id, None)
            };
            channels.push(TrackChannel {
                ts,
                adr,
                dop,
                snr,
                quality,
                gnss_id,
                sv_id,
                freq_id,
                flags,
            });
        }
        Ok(Self { kind, channels })
    }
}

impl fmt::Display for TrackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\ttype: {}", self.kind)?;
        for (i, ch) in self.channels.iter().enumerate() {
            write!(f, "\n\t[{i}]\tts: {:.6}", ch.ts)?;
            write!(f, "\n\t\tadr: {:.6}", ch.adr)?;
            write!(f, "\n\t\tdop: {:.6}", ch.dop)?;
            write!(f, "\n\t\tsnr: {:04X}", ch.snr)?;
            write!(f, "\n\t\tqi={:02X}", ch.quality)?;
            write!(f, "\n\t\tgnssId={}", gnss_label(ch.gnss_id))?;
            write!(f, "\n\t\tsvId={}", ch.sv_id)?;
            if let Some(freq_id) = ch.freq_id {
                write!(f, "\n\t\tfreqId={freq_id}")?;
            }
            write!(f, "\n\t\tflags={:02X}", ch.flags)?;
        }
        Ok(())
    }
}

/// One TRK-MEAS channel record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasChannel {
    /// Channel number.
    pub channel: u8,
    /// Quality indicator (0 idle .. 7 code/carrier lock).
    pub quality: u8,
    /// Measurement quality indicator.
    pub mes_qi: u8,
    /// GNSS id.
    pub gnss_id: u8,
    /// Satellite id (PRN/slot number).
    pub sv_id: u8,
    /// GLONASS frequency channel number + 7.
    pub fcn: u8,
    /// Tracking/lock status (bit 3: half-cycle).
    pub status: u8,
    /// Code lock count.
    pub lock1: u8,
    /// Carrier lock count.
    pub lock2: u8,
    /// Carrier-to-noise ratio in 2^-8 dBHz.
    pub cno: u16,
    /// Transmission time in the GPS week, 2^-32 ms.
    pub tx_tow: f64,
    /// Accumulated Doppler range, 2^-32 cycles.
    pub adr: f64,
    /// Doppler frequency, 2^-32 × 10 Hz.
    pub dop: f32,
}

/// TRK-MEAS: per-channel tracking measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMeas {
    /// Number of channels reported in the header.
    pub nch: u16,
    /// Channel records (at 56-byte stride from payload offset 104).
    pub channels: Vec<MeasChannel>,
}

impl ChannelMeas {
    /// Parse a TRK-MEAS payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        r.skip(2)?;
        let nch = r.u16()?;
        r.skip(100)?;

        let mut channels = Vec::new();
        while r.remaining() >= 56 {
            let rec = r.take(56)?;
            let mut fields = Reader::new(&rec[24..44]);
            let tx_tow = fields.f64()?;
            let adr = fields.f64()?;
            let dop = fields.f32()?;
            channels.push(MeasChannel {
                channel: rec[0],
                quality: rec[1],
                mes_qi: rec[2],
                gnss_id: rec[4],
                sv_id: rec[5],
                fcn: rec[7],
                status: rec[8],
                lock1: rec[16],
                lock2: rec[17],
                cno: u16::from_le_bytes([rec[20], rec[21]]),
                tx_tow,
                adr,
                dop,
            });
        }
        Ok(Self { nch, channels })
    }
}

impl fmt::Display for ChannelMeas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tnch: {} (number of channels)", self.nch)?;
        for (i, ch) in self.channels.iter().enumerate() {
            write!(f, "\n\t[{i}]:\t# {}", ch.channel)?;
            write!(f, "\n\t\tqi={:02X}", ch.quality)?;
            write!(f, "\n\t\tmesQI: {:02X}", ch.mes_qi)?;
            write!(f, "\n\t\tgnss: {}", gnss_label(ch.gnss_id))?;
            write!(f, "\n\t\tsvid: {:02X} (satellite ID (PRN/slot number))", ch.sv_id)?;
            write!(f, "\n\t\tfcn: {:02X} (GLO frequency channel number+7)", ch.fcn)?;
            write!(f, "\n\t\tstatus: {:02X} (tracking/lock status (bit3: half-cycle))", ch.status)?;
            write!(f, "\n\t\tlock1: {:02X} (code lock count)", ch.lock1)?;
            write!(f, "\n\t\tlock2: {:02X} (carrier lock count)", ch.lock2)?;
            write!(f, "\n\t\tcno: {:04X} (C/N0 (2^-8 dBHz))", ch.cno)?;
            write!(f, "\n\t\ttxTow: {:.6} (transmission time in gps week (2^-32 ms))", ch.tx_tow)?;
            write!(f, "\n\t\tadr: {:.6} (accumulated Doppler range (2^-32 cycle))", ch.adr)?;
            write!(f, "\n\t\tdop: {:.6} (Doppler frequency (2^-32x10 Hz))", ch.dop)?;
        }
        Ok(())
    }
}

/// TRK-SFRBX: subframe buffer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSubframe {
    /// GNSS id.
    pub gnss_id: u8,
    /// Satellite id (PRN/slot number).
    pub sv_id: u8,
    /// GLONASS frequency channel number + 7.
    pub fcn: u8,
}

impl TrackSubframe {
    /// Parse a TRK-SFRBX payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        r.skip(1)?;
        let gnss_id = r.u8()?;
        let sv_id = r.u8()?;
        r.skip(1)?;
        let fcn = r.u8()?;
        Ok(Self { gnss_id, sv_id, fcn })
    }
}

impl fmt::Display for TrackSubframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tgnss: {}", gnss_label(self.gnss_id))?;
        write!(f, "\n\tsvid: {:02X} (satellite ID (PRN/slot number))", self.sv_id)?;
        write!(f, "\n\tfcn: {:02X} (GLO frequency channel number+7)", self.fcn)
    }
}
