//! Error types for the match layer.

use tictac_game::GameError;
use tictac_protocol::MatchId;
use tictac_session::SessionError;

/// Errors that can occur while joining, playing, or leaving a match.
///
/// The display text is what the player sees after `Error: `, so it stays
/// short and free of internal ids.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// The move was rejected by the game rules.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A session lookup or update failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The match no longer exists (it ended between lookup and move).
    #[error("game not found")]
    NotFound(MatchId),

    /// The player sent `move` without being in a match.
    #[error("not in a game")]
    NotInGame,

    /// The player sent `join` while already in a match.
    #[error("already in a game")]
    AlreadyInGame,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_protocol::PlayerName;

    #[test]
    fn test_display_game_error_is_transparent() {
        let err = MatchError::from(GameError::CellOccupied);
        assert_eq!(err.to_string(), "cell already taken");
    }

    #[test]
    fn test_display_session_error_is_transparent() {
        let err =
            MatchError::from(SessionError::NotFound(PlayerName::new("x")));
        assert_eq!(err.to_string(), "session not found for player x");
    }

    #[test]
    fn test_display_not_found_hides_match_id() {
        assert_eq!(
            MatchError::NotFound(MatchId(3)).to_string(),
            "game not found"
        );
    }
}
