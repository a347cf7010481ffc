//! Script execution over a live receiver connection.
//!
//! Drives the Sans-IO [`Session`] from the edges: script lines in, frames
//! out to the TCP transport, received chunks back in, decoded records to
//! stdout. The idle timeout and Ctrl-C both quiesce the loop; the session,
//! transport, and timer are all owned here and released on every exit path.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
    time::Duration,
};

use thiserror::Error;
use tokio::time::Instant;
use ubxkit_session::{
    Session, SessionAction, SessionEvent, SessionState,
    transport::{self, ConnectedTransport, TransportError},
};

/// How an execution run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every request was answered and the session closed in order.
    Done,
    /// The idle timeout fired first.
    TimedOut,
}

/// Errors terminating an execution run.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Connecting or talking to the receiver failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Reading the script or writing records failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The transport dropped before the conversation finished.
    #[error("connection lost before the session drained")]
    ConnectionLost,
}

/// Connect to `addr`, run the script, and decode responses until the
/// session drains, the timeout fires, or the user interrupts.
pub async fn run(
    addr: &str,
    script: Option<&Path>,
    timeout_secs: u64,
) -> Result<Outcome, ExecError> {
    let mut session = Session::new();
    let _ = session.handle(SessionEvent::ConnectStarted);

    let mut link = match transport::connect(addr).await {
        Ok(link) => link,
        Err(e) => {
            let _ = session.handle(SessionEvent::ConnectFailed);
            return Err(e.into());
        },
    };
    let _ = session.handle(SessionEvent::Connected);
    tracing::info!(addr, "connected");

    send_script(&mut session, &link, script).await?;
    let mut actions = session.handle(SessionEvent::ScriptEnd).unwrap_or_default();
    tracing::info!(requests = session.requests_sent(), "script transmitted");

    let deadline = (timeout_secs > 0).then(|| Instant::now() + Duration::from_secs(timeout_secs));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        if execute(&mut out, actions.drain(..))? {
            // The session asked to close: orderly shutdown.
            drop(link);
            let _ = session.handle(SessionEvent::Eof);
            tracing::info!(responses = session.responses_seen(), "session drained");
            return Ok(Outcome::Done);
        }

        let received = tokio::select! {
            received = link.from_device.recv() => received,
            () = idle_sleep(deadline) => {
                let _ = session.handle(SessionEvent::Timeout);
                tracing::warn!(timeout_secs, "idle timeout");
                return Ok(Outcome::TimedOut);
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted; closing session");
                return Ok(Outcome::Done);
            },
        };

        match received {
            Some(chunk) => {
                actions = session
                    .handle(SessionEvent::Bytes(chunk.to_vec()))
                    .unwrap_or_default();
            },
            None => {
                let _ = session.handle(SessionEvent::Eof);
                return if session.state() == SessionState::Closed {
                    Ok(Outcome::Done)
                } else {
                    Err(ExecError::ConnectionLost)
                };
            },
        }
    }
}

/// Sleep until the fixed deadline, or forever when no timeout is set.
async fn idle_sleep(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Feed the script file line-by-line into the session.
async fn send_script(
    session: &mut Session,
    link: &ConnectedTransport,
    script: Option<&Path>,
) -> Result<(), ExecError> {
    let Some(path) = script else { return Ok(()) };

    let reader = BufReader::new(File::open(path)?);
    for (idx, line) in reader.lines().enumerate() {
        let text = line?;
        let line_no = idx + 1;
        match session.handle(SessionEvent::Line { line_no, text }) {
            Ok(actions) => {
                for action in actions {
                    if let SessionAction::Send(frame) = action {
                        link.to_device
                            .send(frame)
                            .await
                            .map_err(|e| TransportError::Stream(e.to_string()))?;
                    }
                }
            },
            // A bad line is reported and skipped; the rest of the script runs.
            Err(e) => tracing::warn!("{e}"),
        }
    }
    Ok(())
}

/// Execute drain-loop actions; returns true when the session asked to close.
fn execute(
    out: &mut impl Write,
    actions: impl Iterator<Item = SessionAction>,
) -> Result<bool, ExecError> {
    let mut close = false;
    for action in actions {
        match action {
            SessionAction::Deliver(record) => writeln!(out, "{record}")?,
            SessionAction::Close => close = true,
            SessionAction::Send(_) => {},
        }
    }
    Ok(close)
}
