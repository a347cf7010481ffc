//! Typed views of NAV-class payloads.

use std::fmt;

use crate::{errors::Result, reader::Reader};

/// NAV-TIMEGPS: GPS time solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsTime {
    /// GPS time of week, milliseconds.
    pub itow: u32,
    /// Fractional remainder of the time of week, nanoseconds, signed.
    pub ftow: i32,
    /// GPS week number, signed.
    pub week: i16,
    /// Leap seconds (GPS-UTC), signed.
    pub leap_s: i8,
    /// Validity flags.
    pub valid: u8,
    /// Time accuracy estimate, nanoseconds.
    pub t_acc: u32,
}

impl GpsTime {
    /// Parse a NAV-TIMEGPS payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        Ok(Self {
            itow: r.u32()?,
            ftow: r.i32()?,
            week: r.i16()?,
            leap_s: r.i8()?,
            valid: r.u8()?,
            t_acc: r.u32()?,
        })
    }
}

impl fmt::Display for GpsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tiTOW: {:08X}", self.itow)?;
        write!(f, "\n\tfTOW: {}", self.ftow)?;
        write!(f, "\n\tweek: {}", self.week)?;
        write!(f, "\n\tleapS: {}", self.leap_s)?;
        write!(f, "\n\tvalid: {:02X}", self.valid)?;
        write!(f, "\n\ttAcc: {:08X}", self.t_acc)
    }
}

/// NAV-CLOCK: clock solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// GPS time of week, milliseconds.
    pub itow: u32,
    /// Clock bias, nanoseconds, signed.
    pub clk_bias: i32,
    /// Clock drift, nanoseconds per second, signed.
    pub clk_drift: i32,
    /// Time accuracy estimate, nanoseconds.
    pub t_acc: u32,
    /// Frequency accuracy estimate, ps/s.
    pub f_acc: u32,
}

impl Clock {
    /// Parse a NAV-CLOCK payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        Ok(Self {
            itow: r.u32()?,
            clk_bias: r.i32()?,
            clk_drift: r.i32()?,
            t_acc: r.u32()?,
            f_acc: r.u32()?,
        })
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tiTOW: {:08X}", self.itow)?;
        write!(f, "\n\tclkB: {}", self.clk_bias)?;
        write!(f, "\n\tclkD: {}", self.clk_drift)?;
        write!(f, "\n\ttAcc: {:08X}", self.t_acc)?;
        write!(f, "\n\tfAcc: {:08X}", self.f_acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gps_time_signed_fields() {
        let mut payload = [0u8; 16];
        payload[0..4].copy_from_slice(&123_456u32.to_le_bytes());
        payload[4..8].copy_from_slice(&(-250_000i32).to_le_bytes());
        payload[8..10].copy_from_slice(&2012i16.to_le_bytes());
        payload[10] = 18; // leapS
        payload[11] = 0x07; // valid
        payload[12..16].copy_from_slice(&25u32.to_le_bytes());

        let Ok(v) = GpsTime::parse(&payload) else { unreachable!("well-formed payload") };
        assert_eq!(v.itow, 123_456);
        assert_eq!(v.ftow, -250_000);
        assert_eq!(v.week, 2012);
        assert_eq!(v.leap_s, 18);
        assert_eq!(v.t_acc, 25);
    }

    #[test]
    fn clock_negative_bias() {
        let mut payload = [0u8; 20];
        payload[4..8].copy_from_slice(&(-42i32).to_le_bytes());
        payload[8..12].copy_from_slice(&7i32.to_le_bytes());
        let Ok(v) = Clock::parse(&payload) else { unreachable!("well-formed payload") };
        assert_eq!(v.clk_bias, -42);
        assert_eq!(v.clk_drift, 7);
    }

    #[test]
    fn short_payload_is_rejected() {
        assert!(GpsTime::parse(&[0u8; 15]).is_err());
        assert!(Clock::parse(&[0u8; 19]).is_err());
    }
}
