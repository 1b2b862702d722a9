//! Error types for the game rules.

/// Reasons a move is rejected by [`Game::apply_move`](crate::Game::apply_move).
///
/// A rejected move leaves the game untouched, so the player can simply
/// send a corrected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The game already has a winner or ended in a draw.
    #[error("game is already over")]
    GameOver,

    /// In a two-player game, it is the other player's move.
    #[error("not your turn")]
    NotYourTurn,

    /// The cell index is outside the 3x3 board.
    #[error("invalid position")]
    InvalidPosition,

    /// Somebody already played that cell.
    #[error("cell already taken")]
    CellOccupied,
}
