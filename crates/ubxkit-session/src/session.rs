//! The session state machine.
//!
//! `Session` is Sans-IO: the caller owns the transport and the script file,
//! feeds events in, and executes the returned actions (write these bytes,
//! deliver this record, close). All mutable state lives in this explicit
//! value; nothing is process-global.
//!
//! ```text
//!     [Idle] --connect--> [Connecting] --ok--> [Active]
//!                                       \--fail--> [Failed]
//!     [Active] --chunk--> [Active]      (drain loop)
//!     [Active] --resp >= req post-EOF--> [Draining] --flushed--> [Closed]
//!     [Active] --timeout--> [Failed]
//! ```

use ubxkit_proto::{Decoded, Record, Scan, next_record, scan};
use ubxkit_script::translate;

use crate::{
    buffer::RecvBuffer,
    error::{Result, SessionError},
};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Created, not yet connecting.
    #[default]
    Idle,
    /// Transport connect in flight.
    Connecting,
    /// Connected; script lines flow out, frames flow in.
    Active,
    /// Script finished and every request answered; flushing out.
    Draining,
    /// Orderly shutdown completed.
    Closed,
    /// Transport failure or timeout.
    Failed,
}

impl SessionState {
    /// Whether the session has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }
}

/// Events the caller feeds into the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The transport connect was initiated.
    ConnectStarted,
    /// The transport connected.
    Connected,
    /// The transport connect failed.
    ConnectFailed,
    /// One line of the configuration script.
    Line {
        /// One-based line number, for error reporting.
        line_no: usize,
        /// The raw line text.
        text: String,
    },
    /// The script iterator reached end-of-file.
    ScriptEnd,
    /// A chunk of bytes arrived from the transport.
    Bytes(Vec<u8>),
    /// The transport reported end-of-stream.
    Eof,
    /// The idle supervisor fired.
    Timeout,
}

/// Actions the session asks the caller to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Write this frame to the transport.
    Send(Vec<u8>),
    /// A frame was decoded; hand the record to the sink.
    Deliver(Record),
    /// Flush and close the transport; the session is draining.
    Close,
}

/// One receiver conversation: receive buffer, request accounting, lifecycle.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    buf: RecvBuffer,
    requests_sent: u64,
    responses_seen: u64,
    script_done: bool,
}

impl Session {
    /// A fresh idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Script lines successfully encoded and handed to the transport.
    #[must_use]
    pub const fn requests_sent(&self) -> u64 {
        self.requests_sent
    }

    /// Well-formed frames consumed from the receive stream.
    #[must_use]
    pub const fn responses_seen(&self) -> u64 {
        self.responses_seen
    }

    /// Bytes waiting in the receive buffer.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.filled()
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidState`] when the event is not legal in the
    ///   current state
    /// - [`SessionError::Line`] when a recognized script line fails to
    ///   translate; the session stays usable and the caller decides whether
    ///   to continue
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>> {
        match event {
            SessionEvent::ConnectStarted => {
                self.require(SessionState::Idle, "connect")?;
                self.state = SessionState::Connecting;
                Ok(Vec::new())
            },
            SessionEvent::Connected => {
                self.require(SessionState::Connecting, "complete connect")?;
                self.state = SessionState::Active;
                Ok(Vec::new())
            },
            SessionEvent::ConnectFailed => {
                self.require(SessionState::Connecting, "fail connect")?;
                self.state = SessionState::Failed;
                Ok(Vec::new())
            },
            SessionEvent::Line { line_no, text } => {
                self.require(SessionState::Active, "submit a script line")?;
                match translate(&text) {
                    Ok(Some(frame)) => {
                        self.requests_sent += 1;
                        tracing::debug!(line_no, bytes = frame.len(), "script line encoded");
                        Ok(vec![SessionAction::Send(frame)])
                    },
                    Ok(None) => {
                        tracing::trace!(line_no, "line ignored");
                        Ok(Vec::new())
                    },
                    Err(source) => Err(SessionError::Line { line_no, source }),
                }
            },
            SessionEvent::ScriptEnd => {
                self.require(SessionState::Active, "finish the script")?;
                self.script_done = true;
                let mut actions = Vec::new();
                self.check_drained(&mut actions);
                Ok(actions)
            },
            SessionEvent::Bytes(chunk) => {
                if !matches!(self.state, SessionState::Active | SessionState::Draining) {
                    return Err(SessionError::InvalidState {
                        state: self.state,
                        operation: "receive bytes",
                    });
                }
                let stored = self.buf.extend_truncating(&chunk);
                if stored < chunk.len() {
                    tracing::warn!(dropped = chunk.len() - stored, "receive buffer full");
                }
                let mut actions = Vec::new();
                self.drain(&mut actions);
                self.check_drained(&mut actions);
                Ok(actions)
            },
            SessionEvent::Eof => {
                self.state = if self.state == SessionState::Draining {
                    SessionState::Closed
                } else {
                    SessionState::Failed
                };
                Ok(Vec::new())
            },
            SessionEvent::Timeout => {
                self.state = SessionState::Failed;
                Ok(Vec::new())
            },
        }
    }

    fn require(&self, state: SessionState, operation: &'static str) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(SessionError::InvalidState { state: self.state, operation })
        }
    }

    /// Advance-to-header then verify-frame until the buffer stalls.
    fn drain(&mut self, actions: &mut Vec<SessionAction>) {
        loop {
            match scan(self.buf.as_slice()) {
                Scan::NeedMore { junk, .. } => {
                    self.buf.compact(junk);
                    return;
                },
                Scan::FrameStart { junk } => self.buf.compact(junk),
            }

            match next_record(self.buf.as_slice()) {
                Decoded::Frame { consumed, record } => {
                    self.buf.compact(consumed);
                    self.responses_seen += 1;
                    actions.push(SessionAction::Deliver(record));
                },
                Decoded::NeedMore { .. } => return,
                Decoded::Skip { consumed } => {
                    tracing::debug!(consumed, "skipping undecodable bytes");
                    self.buf.compact(consumed);
                },
            }
        }
    }

    /// Move to Draining once the script is done and every request answered.
    fn check_drained(&mut self, actions: &mut Vec<SessionAction>) {
        if self.state == SessionState::Active
            && self.script_done
            && self.responses_seen >= self.requests_sent
        {
            self.state = SessionState::Draining;
            actions.push(SessionAction::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_session() -> Session {
        let mut s = Session::new();
        let r = s.handle(SessionEvent::ConnectStarted);
        assert_eq!(r, Ok(Vec::new()));
        let r = s.handle(SessionEvent::Connected);
        assert_eq!(r, Ok(Vec::new()));
        s
    }

    #[test]
    fn connect_lifecycle() {
        let s = active_session();
        assert_eq!(s.state(), SessionState::Active);
    }

    #[test]
    fn connect_failure() {
        let mut s = Session::new();
        let _ = s.handle(SessionEvent::ConnectStarted);
        let r = s.handle(SessionEvent::ConnectFailed);
        assert_eq!(r, Ok(Vec::new()));
        assert_eq!(s.state(), SessionState::Failed);
    }

    #[test]
    fn events_out_of_order_are_rejected() {
        let mut s = Session::new();
        assert!(matches!(
            s.handle(SessionEvent::Connected),
            Err(SessionError::InvalidState { .. })
        ));
        assert!(matches!(
            s.handle(SessionEvent::Bytes(vec![0u8])),
            Err(SessionError::InvalidState { .. })
        ));
    }

    #[test]
    fn lines_count_requests() {
        let mut s = active_session();

        let r = s.handle(SessionEvent::Line { line_no: 1, text: "!UBX MON-VER".into() });
        assert!(matches!(r.as_deref(), Ok([SessionAction::Send(_)])));
        assert_eq!(s.requests_sent(), 1);

        // Ignored lines do not count.
        let r = s.handle(SessionEvent::Line { line_no: 2, text: "# comment".into() });
        assert_eq!(r, Ok(Vec::new()));
        assert_eq!(s.requests_sent(), 1);

        // Failing lines surface and do not count.
        let r = s.handle(SessionEvent::Line { line_no: 3, text: "!UBX CFG-BDS 1".into() });
        assert!(matches!(r, Err(SessionError::Line { line_no: 3, .. })));
        assert_eq!(s.requests_sent(), 1);
    }

    #[test]
    fn junk_prefix_then_frame() {
        // Two junk bytes, then a complete MON-VER poll frame.
        let mut s = active_session();
        let chunk = vec![0x00, 0x00, 0xB5, 0x62, 0x0A, 0x04, 0x00, 0x00, 0x0E, 0x34];
        let r = s.handle(SessionEvent::Bytes(chunk));
        assert!(matches!(r.as_deref(), Ok([SessionAction::Deliver(_)])));
        assert_eq!(s.responses_seen(), 1);
        assert_eq!(s.buffered(), 0);
    }

    #[test]
    fn split_frame_across_chunks() {
        let mut s = active_session();
        let frame = [0xB5, 0x62, 0x0A, 0x04, 0x00, 0x00, 0x0E, 0x34];

        let r = s.handle(SessionEvent::Bytes(frame[..7].to_vec()));
        assert_eq!(r, Ok(Vec::new()));
        assert_eq!(s.buffered(), 7);

        let r = s.handle(SessionEvent::Bytes(frame[7..].to_vec()));
        assert!(matches!(r.as_deref(), Ok([SessionAction::Deliver(_)])));
        assert_eq!(s.buffered(), 0);
    }

    #[test]
    fn corrupt_sync_resynchronizes() {
        let mut s = active_session();
        // A corrupted opener (B5 13) followed by a good frame.
        let mut bytes = vec![0xB5, 0x13];
        bytes.extend_from_slice(&[0xB5, 0x62, 0x0A, 0x04, 0x00, 0x00, 0x0E, 0x34]);
        let r = s.handle(SessionEvent::Bytes(bytes));
        assert!(matches!(r.as_deref(), Ok([SessionAction::Deliver(_)])));
        assert_eq!(s.responses_seen(), 1);
    }

    #[test]
    fn drains_to_close_after_script_end() {
        let mut s = active_session();
        let r = s.handle(SessionEvent::Line { line_no: 1, text: "!UBX MON-VER".into() });
        assert!(r.is_ok());
        let r = s.handle(SessionEvent::ScriptEnd);
        assert_eq!(r, Ok(Vec::new())); // one request still outstanding

        // The answer arrives; the session closes.
        let frame = vec![0xB5, 0x62, 0x0A, 0x04, 0x00, 0x00, 0x0E, 0x34];
        let r = s.handle(SessionEvent::Bytes(frame));
        match r.as_deref() {
            Ok([SessionAction::Deliver(_), SessionAction::Close]) => {},
            other => unreachable!("expected deliver+close, got {other:?}"),
        }
        assert_eq!(s.state(), SessionState::Draining);

        let r = s.handle(SessionEvent::Eof);
        assert_eq!(r, Ok(Vec::new()));
        assert_eq!(s.state(), SessionState::Closed);
    }

    #[test]
    fn empty_script_closes_immediately() {
        let mut s = active_session();
        let r = s.handle(SessionEvent::ScriptEnd);
        assert_eq!(r.as_deref(), Ok([SessionAction::Close].as_slice()));
        assert_eq!(s.state(), SessionState::Draining);
    }

    #[test]
    fn timeout_fails_the_session() {
        let mut s = active_session();
        let r = s.handle(SessionEvent::Timeout);
        assert_eq!(r, Ok(Vec::new()));
        assert_eq!(s.state(), SessionState::Failed);
    }

    #[test]
    fn premature_eof_fails_the_session() {
        let mut s = active_session();
        let r = s.handle(SessionEvent::Eof);
        assert_eq!(r, Ok(Vec::new()));
        assert_eq!(s.state(), SessionState::Failed);
    }
}
