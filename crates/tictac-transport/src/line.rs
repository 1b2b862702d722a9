//! Newline-framed TCP transport using Tokio.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Framing limits for line connections.
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Longest line (in bytes, excluding the terminator) a peer may send.
    ///
    /// Default: 1024. A peer that exceeds it gets
    /// [`TransportError::LineTooLong`] from `recv`.
    pub max_line_len: usize,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self { max_line_len: 1024 }
    }
}

/// A TCP [`Transport`] that yields [`LineConnection`]s.
pub struct LineTransport {
    listener: TcpListener,
    config: LineConfig,
}

impl LineTransport {
    /// Binds a new line transport to the given address.
    pub async fn bind(
        addr: &str,
        config: LineConfig,
    ) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "line transport listening");
        Ok(Self { listener, config })
    }

    /// Returns the address the listener is actually bound to.
    ///
    /// Useful after binding to port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Transport for LineTransport {
    type Connection = LineConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        // Prompts are small and interactive; don't let Nagle hold them.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(%addr, error = %e, "set_nodelay failed");
        }

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, %addr, "accepted TCP connection");

        let (read_half, write_half) = stream.into_split();
        Ok(LineConnection {
            id,
            peer: addr,
            reader: Mutex::new(BufReader::new(read_half)),
            writer: Mutex::new(write_half),
            max_line_len: self.config.max_line_len,
        })
    }
}

/// A single newline-framed TCP connection.
///
/// The read and write halves sit behind separate locks, so a task parked
/// in [`recv`](Connection::recv) never delays a concurrent `send`.
pub struct LineConnection {
    id: ConnectionId,
    peer: SocketAddr,
    reader: Mutex<BufReader<OwnedReadHalf>>,
    writer: Mutex<OwnedWriteHalf>,
    max_line_len: usize,
}

impl LineConnection {
    /// Returns the remote peer's address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Connection for LineConnection {
    type Error = TransportError;

    async fn send(&self, text: &str) -> Result<(), Self::Error> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(text.as_bytes())
            .await
            .map_err(TransportError::SendFailed)?;
        writer
            .write_all(b"\n")
            .await
            .map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv(&self) -> Result<Option<String>, Self::Error> {
        let mut reader = self.reader.lock().await;

        // Room for the payload plus "\r\n".
        let limit = self.max_line_len as u64 + 2;
        let mut buf = Vec::new();
        let n = (&mut *reader)
            .take(limit)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(TransportError::ReceiveFailed)?;

        if n == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if n as u64 == limit {
            return Err(TransportError::LineTooLong(self.max_line_len));
        }
        // Otherwise the peer closed mid-line: hand back what we got.

        if buf.len() > self.max_line_len {
            return Err(TransportError::LineTooLong(self.max_line_len));
        }

        // Stray non-UTF-8 bytes become U+FFFD; the line still reaches the
        // parser, which rejects it like any other bad command.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
