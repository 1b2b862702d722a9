//! `TicTacServer` builder and server loop.
//!
//! This is the entry point for running the server. It ties together all
//! the layers: transport → protocol → session → match.

use std::sync::Arc;

use tictac_game::{Heuristic, MoveStrategy};
use tictac_match::MatchCoordinator;
use tictac_session::SessionRegistry;
use tictac_transport::{LineConfig, LineTransport, Transport};
use tokio::sync::Mutex;

use crate::TicTacError;
use crate::handler::handle_connection;

/// Everything connection tasks share, behind one lock.
///
/// Sessions and matches change together (a join touches the queue, the
/// game table, and two sessions), so they live under the same mutex.
pub(crate) struct Hub {
    pub(crate) sessions: SessionRegistry,
    pub(crate) coordinator: MatchCoordinator,
}

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks.
pub(crate) struct ServerState {
    pub(crate) hub: Mutex<Hub>,
}

/// Builder for configuring and starting a server.
///
/// # Example
///
/// ```rust,ignore
/// use tictac::prelude::*;
///
/// let server = TicTacServer::builder()
///     .bind("0.0.0.0:5000")
///     .max_line_len(256)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct TicTacServerBuilder {
    bind_addr: String,
    line_config: LineConfig,
    strategy: Option<Box<dyn MoveStrategy>>,
}

impl TicTacServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            line_config: LineConfig::default(),
            strategy: None,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the longest line a client may send.
    pub fn max_line_len(mut self, max_line_len: usize) -> Self {
        self.line_config.max_line_len = max_line_len;
        self
    }

    /// Replaces the scripted opponent. Defaults to [`Heuristic`].
    pub fn strategy(mut self, strategy: Box<dyn MoveStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<TicTacServer, TicTacError> {
        let transport =
            LineTransport::bind(&self.bind_addr, self.line_config).await?;

        let strategy = self
            .strategy
            .unwrap_or_else(|| Box::new(Heuristic::new()));
        let state = Arc::new(ServerState {
            hub: Mutex::new(Hub {
                sessions: SessionRegistry::new(),
                coordinator: MatchCoordinator::new(strategy),
            }),
        });

        Ok(TicTacServer { transport, state })
    }
}

impl Default for TicTacServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound tic-tac-toe server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TicTacServer {
    transport: LineTransport,
    state: Arc<ServerState>,
}

impl TicTacServer {
    /// Creates a new builder.
    pub fn builder() -> TicTacServerBuilder {
        TicTacServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Spawns a handler task for each accepted connection. Runs until the
    /// process is terminated; a failed accept is logged and skipped.
    pub async fn run(mut self) -> Result<(), TicTacError> {
        match self.local_addr() {
            Ok(addr) => tracing::info!(%addr, "tic-tac-toe server running"),
            Err(_) => tracing::info!("tic-tac-toe server running"),
        }

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
