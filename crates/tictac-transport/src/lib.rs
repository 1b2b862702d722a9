//! Transport abstraction layer for the tic-tac-toe server.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! "something that accepts peers" and "something that exchanges text
//! lines with one peer". The only implementation is the newline-framed TCP
//! transport in [`line`](LineTransport).
//!
//! # Framing
//!
//! Every message is one UTF-8 line. Outgoing text gets a `\n` appended;
//! incoming lines have their trailing `\n` (and an optional `\r`) stripped.
//! A single outgoing message may itself contain embedded newlines (a board
//! rendering, for example) — the peer simply sees several lines.

#![allow(async_fn_in_trait)]

mod error;
mod line;

pub use error::TransportError;
pub use line::{LineConfig, LineConnection, LineTransport};

use std::fmt;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;
}

/// A single connection that exchanges text lines with a remote peer.
///
/// `send` and `recv` take `&self` so that one task can block in `recv`
/// while another task writes to the same connection.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one message to the remote peer, followed by a newline.
    async fn send(&self, text: &str) -> Result<(), Self::Error>;

    /// Receives the next line from the remote peer, without its line
    /// terminator.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<String>, Self::Error>;

    /// Flushes and shuts down the write side of the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
