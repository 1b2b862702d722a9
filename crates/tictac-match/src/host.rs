//! The capability the coordinator needs from whoever owns the sessions.
//!
//! The coordinator never touches connections directly. Everything it
//! does to players goes through these five calls, which keeps it
//! testable against any registry and keeps the registry free of game
//! rules.

use tictac_protocol::{MatchId, PlayerName};
use tictac_session::SessionRegistry;

/// Session-side operations on a match.
pub trait MatchHost {
    /// Associates `player` with `match_id` and puts them on the match's
    /// broadcast list. Returns `false` if the player is not online.
    fn associate(&mut self, match_id: MatchId, player: &PlayerName) -> bool;

    /// Sends `text` to every player associated with `match_id`.
    fn broadcast(&self, match_id: MatchId, text: &str);

    /// Sends `reason` to every member, clears their association, and
    /// drops the broadcast list.
    fn end_match(&mut self, match_id: MatchId, reason: &str);

    /// Takes `player` out of `match_id` and returns who is left.
    fn remove_participant(
        &mut self,
        match_id: MatchId,
        player: &PlayerName,
    ) -> Vec<PlayerName>;

    /// The match `player` is currently in, if any.
    fn current_match(&self, player: &PlayerName) -> Option<MatchId>;
}

impl MatchHost for SessionRegistry {
    fn associate(&mut self, match_id: MatchId, player: &PlayerName) -> bool {
        if self.set_match(player, match_id).is_err() {
            return false;
        }
        self.add_to_match(match_id, player);
        true
    }

    fn broadcast(&self, match_id: MatchId, text: &str) {
        SessionRegistry::broadcast(self, match_id, text);
    }

    fn end_match(&mut self, match_id: MatchId, reason: &str) {
        SessionRegistry::broadcast(self, match_id, reason);
        for player in self.close_match(match_id) {
            // Only clear players still pointing at this match.
            if self.current_match(&player) == Some(match_id) {
                release(self, match_id, &player);
            }
        }
    }

    fn remove_participant(
        &mut self,
        match_id: MatchId,
        player: &PlayerName,
    ) -> Vec<PlayerName> {
        if self.current_match(player) == Some(match_id) {
            release(self, match_id, player);
        }
        self.remove_from_match(match_id, player)
    }

    fn current_match(&self, player: &PlayerName) -> Option<MatchId> {
        SessionRegistry::current_match(self, player)
    }
}

/// Clears `player`'s association. The caller has just seen them in
/// `match_id`, so a failure means the registry changed underneath us.
fn release(
    registry: &mut SessionRegistry,
    match_id: MatchId,
    player: &PlayerName,
) {
    if let Err(e) = registry.clear_match(player) {
        tracing::warn!(%match_id, %player, error = %e, "clear_match failed");
    }
}
