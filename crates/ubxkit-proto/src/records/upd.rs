//! Typed views of UPD-class (firmware update) payloads.

use std::fmt;

use crate::{errors::Result, reader::Reader};

fn downl_flags_label(flags: u32) -> &'static str {
    match flags {
        0 => "Download",
        1 => "Download ACK",
        _ => "Download NACK",
    }
}

fn upload_flags_label(flags: u32) -> &'static str {
    match flags {
        0 => "Upload",
        1 => "Upload ACK",
        _ => "Upload NACK",
    }
}

/// UPD-DOWNL: download data to receiver memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Destination address in the receiver.
    pub start_addr: u32,
    /// Command/acknowledge flags.
    pub flags: u32,
    /// The data block.
    pub data: Vec<u8>,
}

impl Download {
    /// Parse a UPD-DOWNL payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let start_addr = r.u32()?;
        let flags = r.u32()?;
        let data = r.take(r.remaining())?.to_vec();
        Ok(Self { start_addr, flags, data })
    }
}

impl fmt::Display for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tStartAddr: {:08X}", self.start_addr)?;
        write!(f, "\n\tFlags: {:08X} ({})", self.flags, downl_flags_label(self.flags))?;
        for (i, b) in self.data.iter().enumerate() {
            write!(f, "\n\tdata[{i}]: {b:02X}")?;
        }
        Ok(())
    }
}

/// UPD-UPLOAD: read data from receiver memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Source address in the receiver.
    pub start_addr: u32,
    /// Number of bytes requested.
    pub size: u32,
    /// Command/acknowledge flags.
    pub flags: u32,
    /// Returned data, empty in the request form.
    pub data: Vec<u8>,
}

impl Upload {
    /// Parse a UPD-UPLOAD payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let start_addr = r.u32()?;
        let size = r.u32()?;
        let flags = r.u32()?;
        let data = r.take(r.remaining())?.to_vec();
        Ok(Self { start_addr, size, flags, data })
    }
}

impl fmt::Display for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tStartAddr: {:08X}", self.start_addr)?;
        write!(f, "\n\tSize: {}", self.size)?;
        write!(f, "\n\tFlags: {:08X} ({})", self.flags, upload_flags_label(self.flags))?;
        for (i, b) in self.data.iter().enumerate() {
            write!(f, "\n\tdata[{i}]: {b:02X}")?;
        }
        Ok(())
    }
}

/// UPD-EXEC: execute code at an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exec {
    /// Entry address.
    pub start_addr: u32,
    /// Execution flags.
    pub flags: u32,
}

impl Exec {
    /// Parse a UPD-EXEC payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        Ok(Self { start_addr: r.u32()?, flags: r.u32()? })
    }
}

impl fmt::Display for Exec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tStartAddr: {:08X}", self.start_addr)?;
        let e = if self.flags & 0x01 == 0 { "Do not Execute" } else { "Execution," };
        let a = if self.flags & 0x02 == 0 { "" } else { "ACK," };
        let n = if self.flags & 0x04 == 0 { "" } else { "NACK," };
        let irq =
            if self.flags & 0x08 == 0 { "IRQs and FIQ disabled" } else { "IRQs and FIQ enabled," };
        let rst = if self.flags & 0x10 == 0 { "" } else { "Reset after execution" };
        write!(f, "\n\tFlags: {:08X} ({e}{a}{n}{irq}{rst})", self.flags)
    }
}

/// UPD-MEMCPY: copy a memory block inside the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemCopy {
    /// Source address.
    pub start_addr: u32,
    /// Destination address.
    pub dest_addr: u32,
    /// Number of bytes to copy.
    pub size: u32,
    /// Copy flags.
    pub flags: u32,
}

impl MemCopy {
    /// Parse a UPD-MEMCPY payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        Ok(Self { start_addr: r.u32()?, dest_addr: r.u32()?, size: r.u32()?, flags: r.u32()? })
    }
}

impl fmt::Display for MemCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tStartAddr: {:08X}", self.start_addr)?;
        write!(f, "\n\tDestAddr: {:08X}", self.dest_addr)?;
        write!(f, "\n\tSize: {:08X}", self.size)?;
        let c = if self.flags & 0x01 == 0 { "Do not Copy" } else { "Copy," };
        let a = if self.flags & 0x02 == 0 { "" } else { "ACK," };
        let n = if self.flags & 0x04 == 0 { "" } else { "NACK," };
        write!(f, "\n\tFlags: {:08X} ({c}{a}{n})", self.flags)
    }
}

/// UPD-SOS: backup file restore commands and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sos {
    /// Empty payload: poll the backup restore status.
    Poll,
    /// Command 0: create a backup file in flash.
    CreateBackup,
    /// Command 1: clear the backup file.
    ClearBackup,
    /// Command 2: backup creation acknowledge.
    BackupAck {
        /// 1 = acknowledged, 0 = not acknowledged.
        response: u8,
    },
    /// Command 3: system restored from backup.
    RestoreStatus {
        /// 0 unknown, 1 failed, 2 restored, 3 no backup present.
        response: u8,
    },
    /// A command byte outside the documented set.
    Other {
        /// The raw command byte.
        cmd: u8,
    },
}

impl Sos {
    /// Parse a UPD-SOS payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Ok(Self::Poll);
        }
        let mut r = Reader::new(payload);
        let cmd = r.u8()?;
        r.skip(3)?; // reserved
        Ok(match cmd {
            0 => Self::CreateBackup,
            1 => Self::ClearBackup,
            2 => Self::BackupAck { response: r.u8()? },
            3 => Self::RestoreStatus { response: r.u8()? },
            _ => Self::Other { cmd },
        })
    }
}

impl fmt::Display for Sos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poll => write!(f, "\n\t(type): Poll Backup File Restore Status"),
            Self::CreateBackup => write!(f, "\n\t(type): Create Backup File in Flash"),
            Self::ClearBackup => write!(f, "\n\t(type): Clear Backup in Flash"),
            Self::BackupAck { response } => {
                let label = if *response == 1 { "Acknowledged" } else { "Not Acknowledged" };
                write!(f, "\n\t(type): Backup File Creation Acknowledge")?;
                write!(f, "\n\tresponse: {response:02X}({label})")
            },
            Self::RestoreStatus { response } => {
                let label = match response {
                    1 => "Failed restoring from backup file",
                    2 => "Restored from backup file",
                    3 => "Not restored (no backup)",
                    _ => "Unknown",
                };
                write!(f, "\n\t(type): System Restored from Backup")?;
                write!(f, "\n\tresponse: {response:02X}({label})")
            },
            Self::Other { cmd } => write!(f, "\n\tcmd: {cmd:02X}"),
        }
    }
}
