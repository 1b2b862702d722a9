//! Error types for the session layer.

use tictac_protocol::PlayerName;

/// Errors that can occur during session management.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Another live connection already registered this username.
    /// Names are only reserved while their session is live.
    #[error("username {0} already taken")]
    NameTaken(PlayerName),

    /// No live session exists for the given player.
    /// This happens when the player was never registered, or their
    /// connection already closed.
    #[error("session not found for player {0}")]
    NotFound(PlayerName),
}
