//! Message identity: class codes and the closed class/id universe.
//!
//! A UBX message is identified by two 8-bit codes packed as
//! `(class << 8) | id`. [`MsgId`] enumerates every combination the codec
//! encodes or decodes; frames outside the set route to the decoder's
//! unsupported arm, which still computes a defined skip length.

/// Class codes of the UBX protocol.
pub mod class {
    /// Navigation results.
    pub const NAV: u8 = 0x01;
    /// Receiver manager messages (raw measurements, subframes).
    pub const RXM: u8 = 0x02;
    /// Undocumented tracking output.
    pub const TRK: u8 = 0x03;
    /// Informational text messages.
    pub const INF: u8 = 0x04;
    /// Acknowledge / not-acknowledge replies.
    pub const ACK: u8 = 0x05;
    /// Configuration input messages.
    pub const CFG: u8 = 0x06;
    /// Firmware update messages.
    pub const UPD: u8 = 0x09;
    /// Monitoring messages.
    pub const MON: u8 = 0x0A;
    /// AssistNow aiding messages.
    pub const AID: u8 = 0x0B;
    /// Timing messages.
    pub const TIM: u8 = 0x0D;
    /// External sensor fusion.
    pub const ESF: u8 = 0x10;
    /// Multiple GNSS assistance.
    pub const MGA: u8 = 0x13;
    /// Logging messages.
    pub const LOG: u8 = 0x21;
    /// Security feature messages.
    pub const SEC: u8 = 0x27;
    /// High-rate navigation results.
    pub const HNR: u8 = 0x28;
}

macro_rules! msg_ids {
    ($($variant:ident = ($class:path, $id:literal, $name:literal),)*) => {
        /// A message identity in the closed universe of supported class/id
        /// pairs.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MsgId {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl MsgId {
            /// Every supported identity, in declaration order.
            pub const ALL: &'static [MsgId] = &[$(MsgId::$variant,)*];

            /// Resolve a `(class, id)` pair. `None` outside the universe.
            #[must_use]
            pub const fn from_parts(class: u8, id: u8) -> Option<Self> {
                match (class, id) {
                    $(($class, $id) => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Class code of this message.
            #[must_use]
            pub const fn class(self) -> u8 {
                match self {
                    $(Self::$variant => $class,)*
                }
            }

            /// Id code of this message.
            #[must_use]
            pub const fn id(self) -> u8 {
                match self {
                    $(Self::$variant => $id,)*
                }
            }

            /// The `CLASS-ID` mnemonic.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

msg_ids! {
    AckAck = (class::ACK, 0x01, "ACK-ACK"),
    AckNak = (class::ACK, 0x00, "ACK-NAK"),

    CfgAnt = (class::CFG, 0x13, "CFG-ANT"),
    CfgBatch = (class::CFG, 0x93, "CFG-BATCH"),
    CfgBds = (class::CFG, 0x4A, "CFG-BDS"),
    CfgCfg = (class::CFG, 0x09, "CFG-CFG"),
    CfgDat = (class::CFG, 0x06, "CFG-DAT"),
    CfgDgnss = (class::CFG, 0x70, "CFG-DGNSS"),
    CfgDynseed = (class::CFG, 0x85, "CFG-DYNSEED"),
    CfgEkf = (class::CFG, 0x12, "CFG-EKF"),
    CfgEsfgwt = (class::CFG, 0x29, "CFG-ESFGWT"),
    CfgEsrc = (class::CFG, 0x60, "CFG-ESRC"),
    CfgFixseed = (class::CFG, 0x84, "CFG-FIXSEED"),
    CfgFxn = (class::CFG, 0x0E, "CFG-FXN"),
    CfgGeofence = (class::CFG, 0x69, "CFG-GEOFENCE"),
    CfgGnss = (class::CFG, 0x3E, "CFG-GNSS"),
    CfgHnr = (class::CFG, 0x5C, "CFG-HNR"),
    CfgInf = (class::CFG, 0x02, "CFG-INF"),
    CfgItfm = (class::CFG, 0x39, "CFG-ITFM"),
    CfgLogfilter = (class::CFG, 0x47, "CFG-LOGFILTER"),
    CfgMsg = (class::CFG, 0x01, "CFG-MSG"),
    CfgNav5 = (class::CFG, 0x24, "CFG-NAV5"),
    CfgNavx5 = (class::CFG, 0x23, "CFG-NAVX5"),
    CfgNmea = (class::CFG, 0x17, "CFG-NMEA"),
    CfgNvs = (class::CFG, 0x22, "CFG-NVS"),
    CfgOdo = (class::CFG, 0x1E, "CFG-ODO"),
    CfgPm = (class::CFG, 0x32, "CFG-PM"),
    CfgPm2 = (class::CFG, 0x3B, "CFG-PM2"),
    CfgPms = (class::CFG, 0x86, "CFG-PMS"),
    CfgPrt = (class::CFG, 0x00, "CFG-PRT"),
    CfgPwr = (class::CFG, 0x57, "CFG-PWR"),
    CfgRate = (class::CFG, 0x08, "CFG-RATE"),
    CfgRinv = (class::CFG, 0x34, "CFG-RINV"),
    CfgRst = (class::CFG, 0x04, "CFG-RST"),
    CfgRxm = (class::CFG, 0x11, "CFG-RXM"),
    CfgSbas = (class::CFG, 0x16, "CFG-SBAS"),
    CfgSmgr = (class::CFG, 0x62, "CFG-SMGR"),
    CfgTmode = (class::CFG, 0x1D, "CFG-TMODE"),
    CfgTmode2 = (class::CFG, 0x3D, "CFG-TMODE2"),
    CfgTmode3 = (class::CFG, 0x71, "CFG-TMODE3"),
    CfgTp = (class::CFG, 0x07, "CFG-TP"),
    CfgTp5 = (class::CFG, 0x31, "CFG-TP5"),
    CfgUsb = (class::CFG, 0x1B, "CFG-USB"),

    MonHw = (class::MON, 0x09, "MON-HW"),
    MonHw2 = (class::MON, 0x0B, "MON-HW2"),
    MonIo = (class::MON, 0x02, "MON-IO"),
    MonMsgpp = (class::MON, 0x06, "MON-MSGPP"),
    MonRxbuf = (class::MON, 0x07, "MON-RXBUF"),
    MonRxr = (class::MON, 0x21, "MON-RXR"),
    MonTxbuf = (class::MON, 0x08, "MON-TXBUF"),
    MonVer = (class::MON, 0x04, "MON-VER"),

    NavClock = (class::NAV, 0x22, "NAV-CLOCK"),
    NavPvt = (class::NAV, 0x07, "NAV-PVT"),
    NavSol = (class::NAV, 0x06, "NAV-SOL"),
    NavStatus = (class::NAV, 0x03, "NAV-STATUS"),
    NavSvinfo = (class::NAV, 0x30, "NAV-SVINFO"),
    NavTimegps = (class::NAV, 0x20, "NAV-TIMEGPS"),
    NavVelned = (class::NAV, 0x12, "NAV-VELNED"),

    RxmRaw = (class::RXM, 0x10, "RXM-RAW"),
    RxmRawx = (class::RXM, 0x15, "RXM-RAWX"),
    RxmSfrb = (class::RXM, 0x11, "RXM-SFRB"),
    RxmSfrbx = (class::RXM, 0x13, "RXM-SFRBX"),

    TimDosc = (class::TIM, 0x11, "TIM-DOSC"),
    TimFchg = (class::TIM, 0x16, "TIM-FCHG"),
    TimHoc = (class::TIM, 0x17, "TIM-HOC"),
    TimSmeas = (class::TIM, 0x13, "TIM-SMEAS"),
    TimSvin = (class::TIM, 0x04, "TIM-SVIN"),
    TimTm2 = (class::TIM, 0x03, "TIM-TM2"),
    TimTos = (class::TIM, 0x12, "TIM-TOS"),
    TimTp = (class::TIM, 0x01, "TIM-TP"),
    TimVcocal = (class::TIM, 0x15, "TIM-VCOCAL"),
    TimVrfy = (class::TIM, 0x06, "TIM-VRFY"),

    TrkD2 = (class::TRK, 0x06, "TRK-D2"),
    TrkD5 = (class::TRK, 0x0A, "TRK-D5"),
    TrkMeas = (class::TRK, 0x10, "TRK-MEAS"),
    TrkSfrb = (class::TRK, 0x02, "TRK-SFRB"),
    TrkSfrbx = (class::TRK, 0x0F, "TRK-SFRBX"),

    UpdDownl = (class::UPD, 0x01, "UPD-DOWNL"),
    UpdExec = (class::UPD, 0x03, "UPD-EXEC"),
    UpdMemcpy = (class::UPD, 0x04, "UPD-MEMCPY"),
    UpdSos = (class::UPD, 0x14, "UPD-SOS"),
    UpdUpload = (class::UPD, 0x02, "UPD-UPLOAD"),
}

impl MsgId {
    /// The packed 16-bit identity, `(class << 8) | id`.
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        ((self.class() as u16) << 8) | self.id() as u16
    }

    /// Resolve a packed 16-bit identity.
    #[must_use]
    pub const fn from_u16(code: u16) -> Option<Self> {
        Self::from_parts((code >> 8) as u8, (code & 0xFF) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_round_trip() {
        for &msg in MsgId::ALL {
            assert_eq!(MsgId::from_parts(msg.class(), msg.id()), Some(msg));
            assert_eq!(MsgId::from_u16(msg.to_u16()), Some(msg));
        }
    }

    #[test]
    fn identities_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &msg in MsgId::ALL {
            assert!(seen.insert(msg.to_u16()), "duplicate identity {}", msg.name());
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(MsgId::MonVer.to_u16(), 0x0A04);
        assert_eq!(MsgId::AckAck.to_u16(), 0x0501);
        assert_eq!(MsgId::AckNak.to_u16(), 0x0500);
        assert_eq!(MsgId::RxmRaw.to_u16(), 0x0210);
        assert_eq!(MsgId::UpdSos.to_u16(), 0x0914);
        assert_eq!(MsgId::from_parts(0x06, 0x4A), Some(MsgId::CfgBds));
        assert_eq!(MsgId::from_parts(0xF5, 0x05), None);
    }

    #[test]
    fn names_match_codes() {
        assert_eq!(MsgId::CfgTmode2.name(), "CFG-TMODE2");
        assert_eq!(MsgId::TrkSfrbx.name(), "TRK-SFRBX");
    }
}
