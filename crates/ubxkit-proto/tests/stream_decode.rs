//! Decoding a realistic mixed capture: UBX frames interleaved with NMEA
//! sentences and line noise, the way a receiver's serial port actually
//! looks when both protocols are enabled.

use ubxkit_proto::{Decoded, Frame, MsgId, Record, Scan, next_record, records, scan};

const ACK_ACK: [u8; 10] = [0xB5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x01, 0x0F, 0x38];
const CFG_RATE_REPORT: [u8; 14] = [
    0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0xE8, 0x03, 0x01, 0x00, 0x01, 0x00, 0x01, 0x39,
];

fn drain(stream: &[u8]) -> (Vec<Record>, usize) {
    let mut at = 0;
    let mut out = Vec::new();
    loop {
        match scan(&stream[at..]) {
            Scan::NeedMore { junk, .. } => {
                at += junk;
                return (out, at);
            },
            Scan::FrameStart { junk } => at += junk,
        }
        match next_record(&stream[at..]) {
            Decoded::Frame { consumed, record } => {
                at += consumed;
                out.push(record);
            },
            Decoded::NeedMore { .. } => return (out, at),
            Decoded::Skip { consumed } => at += consumed,
        }
    }
}

#[test]
fn nmea_interleaved_capture() {
    let mut stream = Vec::new();
    stream.extend_from_slice(b"$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M*76\r\n");
    stream.extend_from_slice(&ACK_ACK);
    stream.extend_from_slice(b"$GPGSV,4,1,14*75\r\n");
    stream.extend_from_slice(&CFG_RATE_REPORT);
    stream.extend_from_slice(b"garbage tail");

    let (records, consumed) = drain(&stream);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].msg_id(), MsgId::AckAck);
    assert_eq!(records[1].msg_id(), MsgId::CfgRate);
    assert_eq!(consumed, stream.len());
}

#[test]
fn cfg_rate_report_fields() {
    let (records, _) = drain(&CFG_RATE_REPORT);
    let [Record::CfgRate(records::cfg::Rate::Report { meas_rate, nav_rate, time_ref })] =
        records.as_slice()
    else {
        unreachable!("expected one CFG-RATE report");
    };
    assert_eq!(*meas_rate, 1000);
    assert_eq!(*nav_rate, 1);
    assert_eq!(*time_ref, 1);
}

#[test]
fn corrupted_frame_between_good_ones() {
    let mut corrupt = ACK_ACK;
    corrupt[8] ^= 0xFF; // break the checksum

    let mut stream = Vec::new();
    stream.extend_from_slice(&corrupt);
    stream.extend_from_slice(&ACK_ACK);

    let (records, consumed) = drain(&stream);
    assert_eq!(records.len(), 1);
    assert_eq!(consumed, stream.len());
}

#[test]
fn version_report_renders() {
    let mut payload = vec![0u8; 100];
    payload[..22].copy_from_slice(b"ROM CORE 3.01 (107888)");
    payload[30..38].copy_from_slice(b"00080000");
    payload[40..53].copy_from_slice(b"ROM BASE 2.01");
    payload[70..79].copy_from_slice(b"FWVER=SPG");
    let frame = Frame::new(0x0A, 0x04, payload);
    let Ok(frame) = frame else { unreachable!("payload fits") };

    let (records, _) = drain(&frame.to_bytes());
    let [record] = records.as_slice() else { unreachable!("one frame in") };
    let text = record.to_string();
    assert!(text.starts_with("ublox MON-VER:"));
    assert!(text.contains("swVersion: ROM CORE 3.01 (107888)"));
    assert!(text.contains("hwVersion: 00080000"));
    assert!(text.contains("romVersion: ROM BASE 2.01"));
    assert!(text.contains("extPackageVer[0]: FWVER=SPG"));
}

#[test]
fn gnss_config_renders_labels() {
    let payload = [
        0x00, 0x20, 0x20, 0x02, // msgVer, trkHw, trkUse, two blocks
        0x00, 0x08, 0x10, 0x00, 0x01, 0x00, 0x01, 0x00, // GPS enabled
        0x06, 0x08, 0x0E, 0x00, 0x00, 0x00, 0x01, 0x00, // GLONASS disabled
    ];
    let frame = Frame::new(0x06, 0x3E, payload.to_vec());
    let Ok(frame) = frame else { unreachable!("payload fits") };

    let (records, _) = drain(&frame.to_bytes());
    let [record] = records.as_slice() else { unreachable!("one frame in") };
    let text = record.to_string();
    assert!(text.contains("numConfigBlocks: 2"));
    assert!(text.contains("Enabled,sigCfgMask=01"));
    assert!(text.contains("Disabled,sigCfgMask=01"));
}
