//! Per-connection handler: registration, command loop, and teardown.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Send the greeting, read lines until a free username arrives
//!   2. Loop: read a line → parse a `Command` → run it under the hub lock
//!   3. On EOF, read error, or `exit`: leave the queue/match, drop the
//!      session, flush, close
//!
//! Nothing is ever written to the socket while the hub lock is held. All
//! output goes through the session's outbox and a separate writer task
//! drains it onto the wire.

use std::sync::Arc;

use tictac_game::{AI_NAME, CELLS};
use tictac_match::{JoinOutcome, MatchError};
use tictac_protocol::{Command, Mode, PlayerName, text};
use tictac_session::{Outbox, SessionError};
use tictac_transport::{Connection, LineConnection};
use tokio::sync::mpsc;

use crate::TicTacError;
use crate::server::{Hub, ServerState};

/// Drop guard that tears down a player's session when the handler exits.
///
/// The normal path calls [`release`](Self::release), which runs teardown
/// in place. If the handler unwinds instead, `Drop` still gets the player
/// out of the queue, their match, and the registry. Since `Drop` is
/// synchronous, it spawns a fire-and-forget task for the async lock.
struct SessionGuard {
    player: Option<PlayerName>,
    state: Arc<ServerState>,
}

impl SessionGuard {
    fn new(player: PlayerName, state: Arc<ServerState>) -> Self {
        Self {
            player: Some(player),
            state,
        }
    }

    /// Runs teardown now and disarms the guard.
    async fn release(mut self) {
        if let Some(player) = self.player.take() {
            teardown(&self.state, &player).await;
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(player) = self.player.take() else {
            return;
        };
        let state = Arc::clone(&self.state);
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    teardown(&state, &player).await;
                });
            }
            Err(_) => {
                tracing::warn!(%player, "no runtime; session not torn down");
            }
        }
    }
}

/// Takes `player` out of the queue and any match, then drops the session.
///
/// Both steps run in one critical section, so nobody can be paired with a
/// player who is halfway out.
async fn teardown(state: &ServerState, player: &PlayerName) {
    let mut hub = state.hub.lock().await;
    let Hub {
        sessions,
        coordinator,
    } = &mut *hub;
    if let Err(e) = coordinator.leave(sessions, player) {
        tracing::debug!(%player, error = %e, "leave failed during teardown");
    }
    sessions.remove(player);
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: LineConnection,
    state: Arc<ServerState>,
) -> Result<(), TicTacError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(
        %conn_id,
        peer = %conn.peer_addr(),
        "handling new connection"
    );

    let (outbox, outgoing) = mpsc::unbounded_channel();
    let writer = tokio::spawn(pump_outbox(Arc::clone(&conn), outgoing));

    // --- Step 1: Registration ---
    reply(&outbox, text::GREETING);
    let player = match register(&conn, &state, &outbox).await {
        Ok(Some(player)) => player,
        Ok(None) => {
            tracing::debug!(%conn_id, "peer left before registering");
            finish(&conn, outbox, writer).await;
            return Ok(());
        }
        Err(e) => {
            finish(&conn, outbox, writer).await;
            return Err(e);
        }
    };
    tracing::info!(%conn_id, %player, "player registered");
    let guard = SessionGuard::new(player.clone(), Arc::clone(&state));

    // --- Step 2: Command loop ---
    let exited = command_loop(&conn, &state, &player, &outbox).await;

    // --- Step 3: Teardown ---
    guard.release().await;
    if exited {
        reply(&outbox, text::GOODBYE);
    }
    finish(&conn, outbox, writer).await;
    Ok(())
}

/// Reads lines until one is a free username, then registers it.
///
/// Returns `Ok(None)` if the peer hangs up first.
async fn register(
    conn: &LineConnection,
    state: &ServerState,
    outbox: &Outbox,
) -> Result<Option<PlayerName>, TicTacError> {
    loop {
        let Some(line) = conn.recv().await? else {
            return Ok(None);
        };
        let name = line.trim();
        if name.is_empty() || name == AI_NAME {
            reply(outbox, text::NAME_TAKEN);
            continue;
        }

        let player = PlayerName::new(name);
        let mut guard = state.hub.lock().await;
        let hub = &mut *guard;
        let registered = hub
            .sessions
            .register(player.clone(), outbox.clone())
            .map(|_| ());
        match registered {
            Ok(()) => {
                hub.coordinator.enroll(&player);
                hub.sessions.send(&player, &text::welcome(&player));
                hub.sessions.send(&player, text::HELP);
                return Ok(Some(player));
            }
            Err(SessionError::NameTaken(_)) => {
                tracing::debug!(%player, "username taken");
                reply(outbox, text::NAME_TAKEN);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Reads and runs commands until the peer leaves.
///
/// Returns `true` if the player sent `exit`, `false` on EOF or a
/// transport error.
async fn command_loop(
    conn: &LineConnection,
    state: &ServerState,
    player: &PlayerName,
    outbox: &Outbox,
) -> bool {
    loop {
        let line = match conn.recv().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!(%player, "connection closed cleanly");
                return false;
            }
            Err(e) => {
                tracing::debug!(%player, error = %e, "recv error");
                return false;
            }
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                reply(outbox, text::error_line(&e));
                continue;
            }
        };
        tracing::debug!(%player, ?command, "command received");

        if command == Command::Exit {
            tracing::info!(%player, "player exiting");
            return true;
        }

        let mut hub = state.hub.lock().await;
        if let Err(e) = execute(&mut hub, player, command) {
            tracing::debug!(%player, error = %e, "command rejected");
            hub.sessions.send(player, &text::error_line(&e));
        }
    }
}

/// Runs one command against the hub. The caller holds the lock.
fn execute(
    hub: &mut Hub,
    player: &PlayerName,
    command: Command,
) -> Result<(), MatchError> {
    let Hub {
        sessions,
        coordinator,
    } = hub;

    match command {
        Command::Join(Mode::Ai) => {
            coordinator.start_scripted_match(sessions, player)?;
        }
        Command::Join(Mode::TwoPlayer) => {
            let outcome =
                coordinator.start_two_player_match(sessions, player)?;
            if outcome == JoinOutcome::Waiting {
                sessions.send(player, text::WAITING);
            }
        }
        Command::Move(position) => {
            // Position 0 maps out of range rather than underflowing.
            let cell = position.checked_sub(1).unwrap_or(CELLS);
            coordinator.play(sessions, player, cell)?;
        }
        Command::Leaderboard => {
            sessions.send(player, &coordinator.leaderboard());
        }
        // Handled by the loop before taking the lock.
        Command::Exit => {}
    }
    Ok(())
}

/// Queues `line` for this connection, bypassing the registry.
///
/// A closed outbox means the writer already stopped on a socket error;
/// the recv side will notice on its next read.
fn reply(outbox: &Outbox, line: impl Into<String>) {
    if outbox.send(line.into()).is_err() {
        tracing::trace!("outbox closed; reply dropped");
    }
}

/// Writes everything queued for this connection, in order.
///
/// Ends when every sender is gone (the session was removed and the
/// handler finished) or the socket fails.
async fn pump_outbox(
    conn: Arc<LineConnection>,
    mut outgoing: mpsc::UnboundedReceiver<String>,
) {
    while let Some(text) = outgoing.recv().await {
        if let Err(e) = conn.send(&text).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "send failed");
            break;
        }
    }
}

/// Drops our sender, waits for the writer to flush, and closes the socket.
async fn finish(
    conn: &LineConnection,
    outbox: Outbox,
    writer: tokio::task::JoinHandle<()>,
) {
    drop(outbox);
    if let Err(e) = writer.await {
        tracing::debug!(error = %e, "writer task failed");
    }
    if let Err(e) = conn.close().await {
        tracing::debug!(conn_id = %conn.id(), error = %e, "close failed");
    }
}
