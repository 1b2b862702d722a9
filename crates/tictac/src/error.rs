//! Unified error type for the tic-tac-toe server.

use tictac_session::SessionError;
use tictac_transport::TransportError;

/// Errors that end a server or a connection task.
///
/// Rejected commands never get here: they are reported to the client as
/// `Error: ...` lines and the connection carries on.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TicTacError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A session-level error during registration.
    #[error(transparent)]
    Session(#[from] SessionError),
}
