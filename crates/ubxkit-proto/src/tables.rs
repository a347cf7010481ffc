//! Mnemonic name tables and code lookups.
//!
//! The class table and each per-class id table are sorted by mnemonic at
//! compile time so lookup is a binary search. [`tables_are_sorted`] is the
//! startup self-test backing that assumption; the unit tests enforce it and
//! the absence of duplicates.

use crate::{
    errors::{ProtocolError, Result},
    ident::class,
};

type Entry = (&'static str, u8);

/// Class mnemonics, sorted.
const CLASSES: &[Entry] = &[
    ("ACK", class::ACK),
    ("AID", class::AID),
    ("CFG", class::CFG),
    ("ESF", class::ESF),
    ("HNR", class::HNR),
    ("INF", class::INF),
    ("LOG", class::LOG),
    ("MGA", class::MGA),
    ("MON", class::MON),
    ("NAV", class::NAV),
    ("RXM", class::RXM),
    ("SEC", class::SEC),
    ("TIM", class::TIM),
    ("TRK", class::TRK),
    ("UPD", class::UPD),
];

const IDS_CFG: &[Entry] = &[
    ("ANT", 0x13),
    ("BATCH", 0x93),
    ("BDS", 0x4A),
    ("CFG", 0x09),
    ("DAT", 0x06),
    ("DGNSS", 0x70),
    ("DYNSEED", 0x85),
    ("EKF", 0x12),
    ("ESFGWT", 0x29),
    ("ESRC", 0x60),
    ("FIXSEED", 0x84),
    ("FXN", 0x0E),
    ("GEOFENCE", 0x69),
    ("GNSS", 0x3E),
    ("HNR", 0x5C),
    ("INF", 0x02),
    ("ITFM", 0x39),
    ("LOGFILTER", 0x47),
    ("MSG", 0x01),
    ("NAV5", 0x24),
    ("NAVX5", 0x23),
    ("NMEA", 0x17),
    ("NVS", 0x22),
    ("ODO", 0x1E),
    ("PM", 0x32),
    ("PM2", 0x3B),
    ("PMS", 0x86),
    ("PRT", 0x00),
    ("PWR", 0x57),
    ("RATE", 0x08),
    ("RINV", 0x34),
    ("RST", 0x04),
    ("RXM", 0x11),
    ("SBAS", 0x16),
    ("SMGR", 0x62),
    ("TMODE", 0x1D),
    ("TMODE2", 0x3D),
    ("TMODE3", 0x71),
    ("TP", 0x07),
    ("TP5", 0x31),
    ("USB", 0x1B),
];

const IDS_MON: &[Entry] = &[
    ("HW", 0x09),
    ("HW2", 0x0B),
    ("IO", 0x02),
    ("MSGPP", 0x06),
    ("RXBUF", 0x07),
    ("RXR", 0x21),
    ("TXBUF", 0x08),
    ("VER", 0x04),
];

const IDS_NAV: &[Entry] = &[
    ("CLOCK", 0x22),
    ("PVT", 0x07),
    ("SOL", 0x06),
    ("STATUS", 0x03),
    ("SVINFO", 0x30),
    ("TIMEBDS", 0x24),
    ("TIMEGAL", 0x25),
    ("TIMEGLO", 0x23),
    ("TIMEGPS", 0x20),
    ("TIMELS", 0x26),
    ("TIMEUTC", 0x21),
    ("VELNED", 0x12),
];

const IDS_TIM: &[Entry] = &[
    ("DOSC", 0x11),
    ("FCHG", 0x16),
    ("HOC", 0x17),
    ("SMEAS", 0x13),
    ("SVIN", 0x04),
    ("TM2", 0x03),
    ("TOS", 0x12),
    ("TP", 0x01),
    ("VCOCAL", 0x15),
    ("VRFY", 0x06),
];

const IDS_TRK: &[Entry] = &[
    ("D2", 0x06),
    ("D5", 0x0A),
    ("MEAS", 0x10),
    ("SFRB", 0x02),
    ("SFRBX", 0x0F),
];

const IDS_UPD: &[Entry] = &[
    ("DOWNL", 0x01),
    ("EXEC", 0x03),
    ("MEMCPY", 0x04),
    ("SOS", 0x14),
    ("UPLOAD", 0x02),
];

/// Label returned for combinations no table knows.
pub const UNKNOWN_UBX_ID: &str = "UNKNOWN_UBX_ID";

fn id_table(class_code: u8) -> Option<&'static [Entry]> {
    match class_code {
        class::CFG => Some(IDS_CFG),
        class::MON => Some(IDS_MON),
        class::NAV => Some(IDS_NAV),
        class::TIM => Some(IDS_TIM),
        class::TRK => Some(IDS_TRK),
        class::UPD => Some(IDS_UPD),
        _ => None,
    }
}

fn search(table: &[Entry], mnemonic: &str) -> Option<u8> {
    table
        .binary_search_by(|&(name, _)| name.cmp(mnemonic))
        .ok()
        .map(|idx| table[idx].1)
}

fn class_name(code: u8) -> Option<&'static str> {
    CLASSES.iter().find(|&&(_, c)| c == code).map(|&(name, _)| name)
}

/// Resolve a class mnemonic to its code.
///
/// # Errors
///
/// [`ProtocolError::UnknownClass`] if the mnemonic is not in the table.
pub fn class_code(mnemonic: &str) -> Result<u8> {
    search(CLASSES, mnemonic)
        .ok_or_else(|| ProtocolError::UnknownClass { mnemonic: mnemonic.to_owned() })
}

/// Resolve an id mnemonic within a class.
///
/// # Errors
///
/// - [`ProtocolError::ClassHasNoTable`] when the class carries no id table
/// - [`ProtocolError::UnknownId`] when the mnemonic is not in the table
pub fn id_code(class_code: u8, mnemonic: &str) -> Result<u8> {
    let table = id_table(class_code).ok_or_else(|| ProtocolError::ClassHasNoTable {
        class: class_name(class_code).map_or_else(|| format!("{class_code:#04x}"), String::from),
    })?;
    search(table, mnemonic).ok_or_else(|| ProtocolError::UnknownId {
        class: class_name(class_code).map_or_else(|| format!("{class_code:#04x}"), String::from),
        mnemonic: mnemonic.to_owned(),
    })
}

/// Resolve a `CLASS-ID` mnemonic to its `(class, id)` codes.
///
/// Splits at the first `-`; both halves must resolve.
///
/// # Errors
///
/// - [`ProtocolError::UnknownClass`] when there is no `-` or the class half
///   is unknown
/// - [`ProtocolError::ClassHasNoTable`] / [`ProtocolError::UnknownId`] from
///   the id half
pub fn msg_code(mnemonic: &str) -> Result<(u8, u8)> {
    let (cls, id) = mnemonic
        .split_once('-')
        .ok_or_else(|| ProtocolError::UnknownClass { mnemonic: mnemonic.to_owned() })?;
    let cls = class_code(cls)?;
    Ok((cls, id_code(cls, id)?))
}

/// The `CLASS-ID` mnemonic for a code pair. Total.
///
/// Returns [`UNKNOWN_UBX_ID`] when either half is outside the tables.
#[must_use]
pub fn mnemonic_for(class_code: u8, id: u8) -> String {
    let label = class_name(class_code).and_then(|cls| {
        id_table(class_code)?
            .iter()
            .find(|&&(_, code)| code == id)
            .map(|&(name, _)| format!("{cls}-{name}"))
    });
    label.unwrap_or_else(|| UNKNOWN_UBX_ID.to_owned())
}

/// Human label for an I/O port id. Total.
#[must_use]
pub fn port_label(port_id: u8) -> &'static str {
    match port_id {
        0 => "I2C",
        1 => "UART1",
        2 => "UART2",
        3 => "USB",
        4 => "SPI",
        _ => "UNKNOWN_PORT_ID",
    }
}

/// Human label for a GNSS id. Total.
#[must_use]
pub fn gnss_label(gnss_id: u8) -> &'static str {
    match gnss_id {
        0 => "GPS",
        1 => "SBS",
        2 => "GAL",
        3 => "CMP",
        5 => "QZS",
        6 => "GLO",
        _ => "UNKNOWN_GNSS",
    }
}

/// Startup self-test: every table is strictly sorted by mnemonic.
///
/// Strict ordering also rules out duplicate mnemonics.
#[must_use]
pub fn tables_are_sorted() -> bool {
    fn is_sorted(table: &[Entry]) -> bool {
        table.windows(2).all(|w| w[0].0 < w[1].0)
    }
    is_sorted(CLASSES) && CLASSES.iter().filter_map(|&(_, c)| id_table(c)).all(is_sorted)
}
