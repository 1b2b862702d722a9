//! Session types: the server's record of one connected player.
//!
//! A session tracks:
//! - WHO the player is (`PlayerName`)
//! - HOW to reach them (an [`Outbox`])
//! - WHERE they are playing (an optional `MatchId`)

use tictac_protocol::{MatchId, PlayerName};
use tokio::sync::mpsc;

/// The sending end of a connection's outbound queue.
///
/// Each connection task owns the receiving end and writes whatever
/// arrives to the socket. Sending into an unbounded channel never
/// waits, so code holding the server lock can notify any player without
/// suspending on a slow peer.
pub type Outbox = mpsc::UnboundedSender<String>;

/// A single player's live session.
///
/// Created on successful registration, destroyed when the connection
/// closes. Only the [`SessionRegistry`](crate::SessionRegistry) creates or
/// mutates sessions.
#[derive(Debug, Clone)]
pub struct Session {
    /// The registered username.
    pub player: PlayerName,

    /// The match this player is currently in, if any.
    pub current_match: Option<MatchId>,

    outbox: Outbox,
}

impl Session {
    pub(crate) fn new(player: PlayerName, outbox: Outbox) -> Self {
        Self {
            player,
            current_match: None,
            outbox,
        }
    }

    /// Queues `text` for delivery to this player.
    ///
    /// Returns `false` if the connection's writer is already gone; the
    /// text is dropped in that case.
    pub fn send(&self, text: impl Into<String>) -> bool {
        self.outbox.send(text.into()).is_ok()
    }
}
