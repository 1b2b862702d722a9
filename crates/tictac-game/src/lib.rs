//! Pure game rules for the tic-tac-toe server.
//!
//! Nothing in this crate knows about connections, locks, or tasks. It is
//! plain single-threaded logic that the match coordinator drives:
//!
//! - [`Board`] / [`Mark`] — cells, lines, rendering
//! - [`Game`] — the per-match state machine ([`Outcome`], [`Seat`])
//! - [`MoveStrategy`] / [`Heuristic`] — the scripted opponent
//! - [`ScoreBook`] — points, win streaks, and the leaderboard

mod ai;
mod board;
mod error;
mod game;
mod score;

pub use ai::{Heuristic, MoveStrategy};
pub use board::{Board, CELLS, Mark};
pub use error::GameError;
pub use game::{AI_NAME, Game, Outcome, Seat};
pub use score::{
    HUMAN_WIN_POINTS, SCRIPTED_WIN_POINTS, ScoreBook, ScoreRecord, Standing,
};
