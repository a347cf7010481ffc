//! Offline decoding of a binary UBX capture.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use ubxkit_proto::{Decoded, Scan, next_record, scan};

/// Decode a capture from `path` (`-` reads stdin) and print every record.
///
/// Junk and undecodable spans are skipped with a log line; a trailing
/// incomplete frame is reported, not an error.
pub fn run(path: &str) -> io::Result<()> {
    let bytes = if path == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(Path::new(path))?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut at = 0usize;
    let mut frames = 0usize;

    while at < bytes.len() {
        match scan(&bytes[at..]) {
            Scan::NeedMore { junk, .. } => {
                if junk > 0 {
                    tracing::debug!(offset = at, bytes = junk, "skipping junk");
                }
                break;
            },
            Scan::FrameStart { junk } => {
                if junk > 0 {
                    tracing::debug!(offset = at, bytes = junk, "skipping junk");
                }
                at += junk;
            },
        }

        match next_record(&bytes[at..]) {
            Decoded::Frame { consumed, record } => {
                writeln!(out, "{record}")?;
                at += consumed;
                frames += 1;
            },
            Decoded::NeedMore { needed } => {
                tracing::warn!(
                    offset = at,
                    needed,
                    "capture ends mid-frame"
                );
                break;
            },
            Decoded::Skip { consumed } => {
                tracing::debug!(offset = at, bytes = consumed, "skipping undecodable span");
                at += consumed;
            },
        }
    }

    tracing::info!(frames, total_bytes = bytes.len(), "capture decoded");
    Ok(())
}
