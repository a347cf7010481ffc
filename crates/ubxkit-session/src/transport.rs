//! TCP transport for the session driver.
//!
//! A thin layer that bridges a [`tokio::net::TcpStream`] to channels of raw
//! bytes. Protocol logic stays in the Sans-IO [`crate::Session`]; this
//! module only moves chunks.

use bytes::Bytes;
use thiserror::Error;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    sync::mpsc,
};

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Handle to a connected receiver.
///
/// Frames go out through `to_device`; received chunks arrive on
/// `from_device` in stream order. A closed `from_device` means the peer hit
/// end-of-stream. Dropping the handle aborts the I/O task and releases the
/// socket.
pub struct ConnectedTransport {
    /// Frame bytes to write to the receiver.
    pub to_device: mpsc::Sender<Vec<u8>>,
    /// Chunks read from the receiver.
    pub from_device: mpsc::Receiver<Bytes>,
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedTransport {
    /// Stop the connection task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for ConnectedTransport {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// Connect to a receiver over TCP.
///
/// # Errors
///
/// [`TransportError::Connection`] when the address does not resolve or the
/// connect fails.
pub async fn connect(addr: &str) -> Result<ConnectedTransport, TransportError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| TransportError::Connection(format!("connect {addr} failed: {e}")))?;

    let (to_device_tx, to_device_rx) = mpsc::channel::<Vec<u8>>(32);
    let (from_device_tx, from_device_rx) = mpsc::channel::<Bytes>(32);

    let handle = tokio::spawn(run_connection(stream, to_device_rx, from_device_tx));

    Ok(ConnectedTransport {
        to_device: to_device_tx,
        from_device: from_device_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    stream: TcpStream,
    mut to_device: mpsc::Receiver<Vec<u8>>,
    from_device: mpsc::Sender<Bytes>,
) {
    let (mut reader, mut writer) = stream.into_split();
    let mut read_buf = [0u8; 2048];
    loop {
        tokio::select! {
            outgoing = to_device.recv() => {
                let Some(frame) = outgoing else { break };
                if let Err(e) = writer.write_all(&frame).await {
                    tracing::warn!("transport write failed: {e}");
                    break;
                }
            },
            incoming = reader.read(&mut read_buf) => {
                match incoming {
                    Ok(0) => break, // end of stream
                    Ok(n) => {
                        if from_device.send(Bytes::copy_from_slice(&read_buf[..n])).await.is_err() {
                            break; // session side went away
                        }
                    },
                    Err(e) => {
                        tracing::warn!("transport read failed: {e}");
                        break;
                    },
                }
            },
        }
    }
    // Closing from_device signals Eof to the session loop.
    let _ = writer.shutdown().await;
}
