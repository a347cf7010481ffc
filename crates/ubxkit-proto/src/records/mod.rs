//! Typed records decoded from verified frames.
//!
//! [`Record`] is the decoder's output: one variant per supported message,
//! each carrying the typed payload view from its class module. Frame headers
//! identify the payload type, so parsing dispatches on [`MsgId`] and unknown
//! identities never reach a record parser.

pub mod cfg;
pub mod mon;
pub mod nav;
pub mod rxm;
pub mod trk;
pub mod upd;

use std::fmt;

use crate::{
    errors::{ProtocolError, Result},
    ident::MsgId,
    reader::Reader,
};

/// ACK-ACK / ACK-NAK payload: the class/id of the referenced message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Class of the acknowledged message.
    pub msg_class: u8,
    /// Id of the acknowledged message.
    pub msg_id: u8,
}

impl Acknowledgement {
    /// Parse an ACK-ACK or ACK-NAK payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        Ok(Self { msg_class: r.u8()?, msg_id: r.u8()? })
    }
}

impl fmt::Display for Acknowledgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tclsID: {:02X}", self.msg_class)?;
        write!(f, "\n\tmsgID: {:02X}", self.msg_id)
    }
}

/// A decoded frame payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// MON-VER.
    MonVer(mon::Version),
    /// MON-HW.
    MonHw(mon::HwStatus),
    /// MON-HW2.
    MonHw2(mon::HwStatus2),
    /// ACK-ACK.
    AckAck(Acknowledgement),
    /// ACK-NAK.
    AckNak(Acknowledgement),
    /// UPD-DOWNL.
    UpdDownl(upd::Download),
    /// UPD-UPLOAD.
    UpdUpload(upd::Upload),
    /// UPD-EXEC.
    UpdExec(upd::Exec),
    /// UPD-MEMCPY.
    UpdMemcpy(upd::MemCopy),
    /// UPD-SOS.
    UpdSos(upd::Sos),
    /// CFG-BDS.
    CfgBds(cfg::Bds),
    /// CFG-GNSS.
    CfgGnss(cfg::Gnss),
    /// CFG-MSG.
    CfgMsg(cfg::MsgRate),
    /// CFG-PRT.
    CfgPrt(cfg::Port),
    /// CFG-RATE.
    CfgRate(cfg::Rate),
    /// NAV-TIMEGPS.
    NavTimegps(nav::GpsTime),
    /// NAV-CLOCK.
    NavClock(nav::Clock),
    /// RXM-RAW.
    RxmRaw(rxm::Raw),
    /// RXM-SFRB.
    RxmSfrb(rxm::Subframe),
    /// RXM-SFRBX.
    RxmSfrbx(rxm::SubframeX),
    /// RXM-RAWX.
    RxmRawx(rxm::RawX),
    /// TRK-D5.
    TrkD5(trk::TrackData),
    /// TRK-MEAS.
    TrkMeas(trk::ChannelMeas),
    /// TRK-SFRBX.
    TrkSfrbx(trk::TrackSubframe),
}

impl Record {
    /// Parse the payload of a verified frame.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::UnsupportedMessage`] when the identity is in the
    ///   universe but the decoder carries no payload layout for it
    /// - [`ProtocolError::TruncatedPayload`] when the payload ends before
    ///   its layout
    pub fn parse(msg: MsgId, payload: &[u8]) -> Result<Self> {
        Ok(match msg {
            MsgId::MonVer => Self::MonVer(mon::Version::parse(payload)?),
            MsgId::MonHw => Self::MonHw(mon::HwStatus::parse(payload)?),
            MsgId::MonHw2 => Self::MonHw2(mon::HwStatus2::parse(payload)?),
            MsgId::AckAck => Self::AckAck(Acknowledgement::parse(payload)?),
            MsgId::AckNak => Self::AckNak(Acknowledgement::parse(payload)?),
            MsgId::UpdDownl => Self::UpdDownl(upd::Download::parse(payload)?),
            MsgId::UpdUpload => Self::UpdUpload(upd::Upload::parse(payload)?),
            MsgId::UpdExec => Self::UpdExec(upd::Exec::parse(payload)?),
            MsgId::UpdMemcpy => Self::UpdMemcpy(upd::MemCopy::parse(payload)?),
            MsgId::UpdSos => Self::UpdSos(upd::Sos::parse(payload)?),
            MsgId::CfgBds => Self::CfgBds(cfg::Bds::parse(payload)?),
            MsgId::CfgGnss => Self::CfgGnss(cfg::Gnss::parse(payload)?),
            MsgId::CfgMsg => Self::CfgMsg(cfg::MsgRate::parse(payload)?),
            MsgId::CfgPrt => Self::CfgPrt(cfg::Port::parse(payload)?),
            MsgId::CfgRate => Self::CfgRate(cfg::Rate::parse(payload)?),
            MsgId::NavTimegps => Self::NavTimegps(nav::GpsTime::parse(payload)?),
            MsgId::NavClock => Self::NavClock(nav::Clock::parse(payload)?),
            MsgId::RxmRaw => Self::RxmRaw(rxm::Raw::parse(payload)?),
            MsgId::RxmSfrb => Self::RxmSfrb(rxm::Subframe::parse(payload)?),
            MsgId::RxmSfrbx => Self::RxmSfrbx(rxm::SubframeX::parse(payload)?),
            MsgId::RxmRawx => Self::RxmRawx(rxm::RawX::parse(payload)?),
            MsgId::TrkD5 => Self::TrkD5(trk::TrackData::parse(payload)?),
            MsgId::TrkMeas => Self::TrkMeas(trk::ChannelMeas::parse(payload)?),
            MsgId::TrkSfrbx => Self::TrkSfrbx(trk::TrackSubframe::parse(payload)?),
            other => {
                return Err(ProtocolError::UnsupportedMessage {
                    class: other.class(),
                    id: other.id(),
                });
            },
        })
    }

    /// Identity of the message this record was decoded from.
    #[must_use]
    pub const fn msg_id(&self) -> MsgId {
        match self {
            Self::MonVer(_) => MsgId::MonVer,
            Self::MonHw(_) => MsgId::MonHw,
            Self::MonHw2(_) => MsgId::MonHw2,
            Self::AckAck(_) => MsgId::AckAck,
            Self::AckNak(_) => MsgId::AckNak,
            Self::UpdDownl(_) => MsgId::UpdDownl,
            Self::UpdUpload(_) => MsgId::UpdUpload,
            Self::UpdExec(_) => MsgId::UpdExec,
            Self::UpdMemcpy(_) => MsgId::UpdMemcpy,
            Self::UpdSos(_) => MsgId::UpdSos,
            Self::CfgBds(_) => MsgId::CfgBds,
            Self::CfgGnss(_) => MsgId::CfgGnss,
            Self::CfgMsg(_) => MsgId::CfgMsg,
            Self::CfgPrt(_) => MsgId::CfgPrt,
            Self::CfgRate(_) => MsgId::CfgRate,
            Self::NavTimegps(_) => MsgId::NavTimegps,
            Self::NavClock(_) => MsgId::NavClock,
            Self::RxmRaw(_) => MsgId::RxmRaw,
            Self::RxmSfrb(_) => MsgId::RxmSfrb,
            Self::RxmSfrbx(_) => MsgId::RxmSfrbx,
            Self::RxmRawx(_) => MsgId::RxmRawx,
            Self::TrkD5(_) => MsgId::TrkD5,
            Self::TrkMeas(_) => MsgId::TrkMeas,
            Self::TrkSfrbx(_) => MsgId::TrkSfrbx,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ublox {}:", self.msg_id().name())?;
        match self {
            Self::MonVer(v) => v.fmt(f),
            Self::MonHw(v) => v.fmt(f),
            Self::MonHw2(v) => v.fmt(f),
            Self::AckAck(v) | Self::AckNak(v) => v.fmt(f),
            Self::UpdDownl(v) => v.fmt(f),
            Self::UpdUpload(v) => v.fmt(f),
            Self::UpdExec(v) => v.fmt(f),
            Self::UpdMemcpy(v) => v.fmt(f),
            Self::UpdSos(v) => v.fmt(f),
            Self::CfgBds(v) => v.fmt(f),
            Self::CfgGnss(v) => v.fmt(f),
            Self::CfgMsg(v) => v.fmt(f),
            Self::CfgPrt(v) => v.fmt(f),
            Self::CfgRate(v) => v.fmt(f),
            Self::NavTimegps(v) => v.fmt(f),
            Self::NavClock(v) => v.fmt(f),
            Self::RxmRaw(v) => v.fmt(f),
            Self::RxmSfrb(v) => v.fmt(f),
            Self::RxmSfrbx(v) => v.fmt(f),
            Self::RxmRawx(v) => v.fmt(f),
            Self::TrkD5(v) => v.fmt(f),
            Self::TrkMeas(v) => v.fmt(f),
            Self::TrkSfrbx(v) => v.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_payloads() {
        assert_eq!(
            Record::parse(MsgId::AckAck, &[0x06, 0x01]),
            Ok(Record::AckAck(Acknowledgement { msg_class: 0x06, msg_id: 0x01 }))
        );
        assert_eq!(
            Record::parse(MsgId::AckNak, &[0x06, 0x00]),
            Ok(Record::AckNak(Acknowledgement { msg_class: 0x06, msg_id: 0x00 }))
        );
    }

    #[test]
    fn universe_members_without_layouts_are_unsupported() {
        for msg in [MsgId::CfgAnt, MsgId::NavPvt, MsgId::TimTm2, MsgId::MonIo, MsgId::TrkD2] {
            assert_eq!(
                Record::parse(msg, &[]),
                Err(ProtocolError::UnsupportedMessage { class: msg.class(), id: msg.id() }),
                "{}",
                msg.name()
            );
        }
    }

    #[test]
    fn display_leads_with_mnemonic() {
        let record = Record::AckAck(Acknowledgement { msg_class: 0x06, msg_id: 0x01 });
        let text = record.to_string();
        assert!(text.starts_with("ublox ACK-ACK:"));
        assert!(text.contains("clsID: 06"));
    }
}
