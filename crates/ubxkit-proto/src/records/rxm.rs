//! Typed views of RXM-class payloads.
//!
//! The raw-measurement messages repeat a fixed-size block whose count is
//! taken from a header byte; parsing is governed by that count, never by the
//! buffer size.

use std::fmt;

use crate::{errors::Result, reader::Reader};

/// One RXM-RAW satellite measurement (24 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurement {
    /// Carrier phase, cycles.
    pub cp_mes: f64,
    /// Pseudorange, metres.
    pub pr_mes: f64,
    /// Doppler, Hz.
    pub do_mes: f32,
    /// Space vehicle number.
    pub sv: u8,
    /// Measurement quality indicator, signed.
    pub mes_qi: i8,
    /// Carrier-to-noise ratio, dbHz, signed.
    pub cno: i8,
    /// Loss-of-lock indicator.
    pub lli: u8,
}

/// RXM-RAW: raw measurement data.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    /// Measurement time of week, milliseconds, signed.
    pub itow: i32,
    /// Measurement GPS week, signed.
    pub week: i16,
    /// Per-satellite measurements; the count came from `numSV`.
    pub measurements: Vec<RawMeasurement>,
}

impl Raw {
    /// Parse an RXM-RAW payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let itow = r.i32()?;
        let week = r.i16()?;
        let num_sv = r.u8()?;
        r.skip(1)?; // reserved1
        let mut measurements = Vec::with_capacity(usize::from(num_sv));
        for _ in 0..num_sv {
            measurements.push(RawMeasurement {
                cp_mes: r.f64()?,
                pr_mes: r.f64()?,
                do_mes: r.f32()?,
                sv: r.u8()?,
                mes_qi: r.i8()?,
                cno: r.i8()?,
                lli: r.u8()?,
            });
        }
        Ok(Self { itow, week, measurements })
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tiTOW: {}", self.itow)?;
        write!(f, "\n\tweek: {}", self.week)?;
        write!(f, "\n\tnumSV: {:02X}", self.measurements.len())?;
        for (i, m) in self.measurements.iter().enumerate() {
            write!(f, "\n\t[{i}]\tcpMes: {:.6}", m.cp_mes)?;
            write!(f, "\n\t\tprMes: {:.6}", m.pr_mes)?;
            write!(f, "\n\t\tdoMes: {:.6}", m.do_mes)?;
            write!(f, "\n\t\tsv: {:02X}", m.sv)?;
            write!(f, "\n\t\tmesQI: {}", m.mes_qi)?;
            write!(f, "\n\t\tcno: {}", m.cno)?;
            write!(f, "\n\t\tlli: {:02X}", m.lli)?;
        }
        Ok(())
    }
}

/// RXM-SFRB: subframe buffer, fixed ten-word form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subframe {
    /// Tracking channel.
    pub chn: u8,
    /// Satellite id.
    pub svid: u8,
    /// The ten raw subframe words.
    pub words: [u32; 10],
}

impl Subframe {
    /// Parse an RXM-SFRB payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let chn = r.u8()?;
        let svid = r.u8()?;
        let mut words = [0u32; 10];
        for word in &mut words {
            *word = r.u32()?;
        }
        Ok(Self { chn, svid, words })
    }
}

impl fmt::Display for Subframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tchn: {:02X}", self.chn)?;
        write!(f, "\n\tsvid: {:02X}", self.svid)?;
        for (i, word) in self.words.iter().enumerate() {
            write!(f, "\n\tdwrd[{i}]: {word}")?;
        }
        Ok(())
    }
}

/// RXM-SFRBX: subframe buffer, variable-length form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubframeX {
    /// GNSS id.
    pub gnss_id: u8,
    /// Satellite id.
    pub sv_id: u8,
    /// GLONASS frequency slot.
    pub freq_id: u8,
    /// Message version.
    pub version: u8,
    /// Raw data words; the count came from `numWords`.
    pub words: Vec<u32>,
}

impl SubframeX {
    /// Parse an RXM-SFRBX payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let gnss_id = r.u8()?;
        let sv_id = r.u8()?;
        r.skip(1)?; // reserved1
        let freq_id = r.u8()?;
        let num_words = r.u8()?;
        r.skip(1)?; // reserved2
        let version = r.u8()?;
        r.skip(1)?; // reserved3
        let mut words = Vec::with_capacity(usize::from(num_words));
        for _ in 0..num_words {
            words.push(r.u32()?);
        }
        Ok(Self { gnss_id, sv_id, freq_id, version, words })
    }
}

impl fmt::Display for SubframeX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tgnssId: {:02X}", self.gnss_id)?;
        write!(f, "\n\tsvId: {:02X}", self.sv_id)?;
        write!(f, "\n\tfreqId: {:02X}", self.freq_id)?;
        write!(f, "\n\tnumWords: {:02X}", self.words.len())?;
        write!(f, "\n\tversion: {:02X}", self.version)?;
        for (i, word) in self.words.iter().enumerate() {
            write!(f, "\n\tdwrd[{i}]: {word:08X}")?;
        }
        Ok(())
    }
}

/// One RXM-RAWX measurement (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawXMeasurement {
    /// Pseudorange, metres.
    pub pr_mes: f64,
    /// Carrier phase, cycles.
    pub cp_mes: f64,
    /// Doppler, Hz.
    pub do_mes: f32,
    /// GNSS id.
    pub gnss_id: u8,
    /// Satellite id.
    pub sv_id: u8,
    /// GLONASS frequency slot.
    pub freq_id: u8,
    /// Carrier lock time, milliseconds.
    pub locktime: u16,
    /// Carrier-to-noise ratio, dbHz.
    pub cno: u8,
    /// Estimated pseudorange standard deviation.
    pub pr_stdev: u8,
    /// Estimated carrier-phase standard deviation.
    pub cp_stdev: u8,
    /// Estimated Doppler standard deviation.
    pub do_stdev: u8,
    /// Tracking status bitfield.
    pub trk_stat: u8,
}

/// RXM-RAWX: multi-GNSS raw measurement data.
#[derive(Debug, Clone, PartialEq)]
pub struct RawX {
    /// Receiver time of week, seconds.
    pub rcv_tow: f64,
    /// Receiver GPS week.
    pub week: u16,
    /// Leap seconds, signed.
    pub leap_s: i8,
    /// Receiver tracking status.
    pub rec_stat: u8,
    /// Per-measurement records; the count came from `numMeas`.
    pub measurements: Vec<RawXMeasurement>,
}

impl RawX {
    /// Parse an RXM-RAWX payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let rcv_tow = r.f64()?;
        let week = r.u16()?;
        let leap_s = r.i8()?;
        let num_meas = r.u8()?;
        let rec_stat = r.u8()?;
        r.skip(3)?; // reserved1
        let mut measurements = Vec::with_capacity(usize::from(num_meas));
        for _ in 0..num_meas {
            let pr_mes = r.f64()?;
            let cp_mes = r.f64()?;
            let do_mes = r.f32()?;
            let gnss_id = r.u8()?;
            let sv_id = r.u8()?;
            r.skip(1)?; // reserved2
            let freq_id = r.u8()?;
            let locktime = r.u16()?;
            let cno = r.u8()?;
            let pr_stdev = r.u8()?;
            let cp_stdev = r.u8()?;
            let do_stdev = r.u8()?;
            let trk_stat = r.u8()?;
            r.skip(1)?; // reserved3
            measurements.push(RawXMeasurement {
                pr_mes,
                cp_mes,
                do_mes,
                gnss_id,
                sv_id,
                freq_id,
                locktime,
                cno,
                pr_stdev,
                cp_stdev,
                do_stdev,
                trk_stat,
            });
        }
        Ok(Self { rcv_tow, week, leap_s, rec_stat, measurements })
    }
}

impl fmt::Display for RawX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\trcvTow: {:.6}", self.rcv_tow)?;
        write!(f, "\n\tweek: {}", self.week)?;
        write!(f, "\n\tleapS: {}", self.leap_s)?;
        write!(f, "\n\tnumMeas: {:02X}", self.measurements.len())?;
        write!(f, "\n\trecStat: {:02X}", self.rec_stat)?;
        for (i, m) in self.measurements.iter().enumerate() {
            write!(f, "\n\t[{i}]\tprMes: {:.6}", m.pr_mes)?;
            write!(f, "\n\t\tcpMes: {:.6}", m.cp_mes)?;
            write!(f, "\n\t\tdoMes: {:.6}", m.do_mes)?;
            write!(f, "\n\t\tgnssId: {:02X}", m.gnss_id)?;
            write!(f, "\n\t\tsvId: {:02X}", m.sv_id)?;
            write!(f, "\n\t\tfreqId: {:02X}", m.freq_id)?;
            write!(f, "\n\t\tlocktime: {:04X}", m.locktime)?;
            write!(f, "\n\t\tcno: {:02X}", m.cno)?;
            write!(f, "\n\t\tprStdev: {:02X}", m.pr_stdev)?;
            write!(f, "\n\t\tcpStdev: {:02X}", m.cp_stdev)?;
            write!(f, "\n\t\tdoStdev: {:02X}", m.do_stdev)?;
            write!(f, "\n\t\ttrkStat: {:02X}", m.trk_stat)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_payload(num_sv: u8) -> Vec<u8> {
        let mut payload = vec![0u8; 8 + 24 * usize::from(num_sv)];
        payload[0..4].copy_from_slice(&100_000i32.to_le_bytes());
        payload[4..6].copy_from_slice(&1999i16.to_le_bytes());
        payload[6] = num_sv;
        for i in 0..usize::from(num_sv) {
            let at = 8 + 24 * i;
            payload[at..at + 8].copy_from_slice(&(i as f64 * 1.5).to_le_bytes());
            payload[at + 20] = i as u8 + 1; // sv
        }
        payload
    }

    #[test]
    fn raw_empty_measurement_set() {
        // numSV = 0 still parses: the frame is just the fixed header.
        let Ok(v) = Raw::parse(&raw_payload(0)) else { unreachable!("well-formed payload") };
        assert_eq!(v.itow, 100_000);
        assert_eq!(v.week, 1999);
        assert!(v.measurements.is_empty());
    }

    #[test]
    fn raw_measurement_walk() {
        let Ok(v) = Raw::parse(&raw_payload(3)) else { unreachable!("well-formed payload") };
        assert_eq!(v.measurements.len(), 3);
        assert_eq!(v.measurements[2].cp_mes, 3.0);
        assert_eq!(v.measurements[1].sv, 2);
    }

    #[test]
    fn raw_count_governs_parse() {
        let mut payload = raw_payload(2);
        payload.truncate(8 + 24); // one measurement short
        assert!(Raw::parse(&payload).is_err());
    }

    #[test]
    fn sfrb_fixed_words() {
        let mut payload = vec![0u8; 42];
        payload[0] = 4;
        payload[1] = 17;
        payload[2..6].copy_from_slice(&0x0001_0203u32.to_le_bytes());
        let Ok(v) = Subframe::parse(&payload) else { unreachable!("well-formed payload") };
        assert_eq!(v.chn, 4);
        assert_eq!(v.svid, 17);
        assert_eq!(v.words[0], 0x0001_0203);
    }

    #[test]
    fn sfrbx_variable_words() {
        let mut payload = vec![0u8; 8 + 4 * 4];
        payload[0] = 6; // GLONASS
        payload[1] = 3;
        payload[3] = 9; // freqId
        payload[4] = 4; // numWords
        payload[6] = 2; // version
        let Ok(v) = SubframeX::parse(&payload) else { unreachable!("well-formed payload") };
        assert_eq!(v.gnss_id, 6);
        assert_eq!(v.freq_id, 9);
        assert_eq!(v.words.len(), 4);
    }

    #[test]
    fn rawx_measurement_walk() {
        let mut payload = vec![0u8; 16 + 32];
        payload[0..8].copy_from_slice(&414_000.5f64.to_le_bytes());
        payload[8..10].copy_from_slice(&2100u16.to_le_bytes());
        payload[10] = 0x12; // leapS = 18
        payload[11] = 1; // numMeas
        payload[16..24].copy_from_slice(&21_000_000.25f64.to_le_bytes());
        payload[36] = 2; // gnssId
        payload[37] = 11; // svId
        let Ok(v) = RawX::parse(&payload) else { unreachable!("well-formed payload") };
        assert_eq!(v.rcv_tow, 414_000.5);
        assert_eq!(v.leap_s, 18);
        assert_eq!(v.measurements[0].pr_mes, 21_000_000.25);
        assert_eq!(v.measurements[0].gnss_id, 2);
        assert_eq!(v.measurements[0].sv_id, 11);
    }
}
