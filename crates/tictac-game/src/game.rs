//! The game state machine for one match.
//!
//! ```text
//!                  apply_move (line completed)
//!   InProgress ─────────────────────────────────→ Won(seat)
//!       │
//!       └──────── apply_move (board full) ───────→ Draw
//! ```
//!
//! Both terminal states are final: every later `apply_move` fails with
//! [`GameError::GameOver`].

use std::fmt;

use tictac_protocol::PlayerName;

use crate::{Board, GameError, Mark, CELLS};

/// The display name of the scripted opponent.
///
/// Humans may not register under this name.
pub const AI_NAME: &str = "AI";

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One side of a match: a registered player or the scripted opponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seat {
    Player(PlayerName),
    Ai,
}

impl Seat {
    /// Returns `true` for the scripted opponent.
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai)
    }

    /// The human behind this seat, if there is one.
    pub fn player(&self) -> Option<&PlayerName> {
        match self {
            Self::Player(name) => Some(name),
            Self::Ai => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(name) => write!(f, "{name}"),
            Self::Ai => f.write_str(AI_NAME),
        }
    }
}

impl From<PlayerName> for Seat {
    fn from(name: PlayerName) -> Self {
        Self::Player(name)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Where a game stands. Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Seat),
    Draw,
}

impl Outcome {
    /// Returns `true` once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// One game of tic-tac-toe between two seats.
///
/// The first seat is always a human and always plays [`Mark::X`]. The
/// second seat is either another human or [`Seat::Ai`].
#[derive(Debug, Clone)]
pub struct Game {
    seats: [Seat; 2],
    board: Board,
    /// Index into `seats` of whoever moves next.
    turn: usize,
    outcome: Outcome,
}

impl Game {
    /// Starts a game where `first` moves first.
    pub fn new(first: PlayerName, second: Seat) -> Self {
        Self {
            seats: [Seat::Player(first), second],
            board: Board::new(),
            turn: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Starts a game against the scripted opponent.
    pub fn scripted(player: PlayerName) -> Self {
        Self::new(player, Seat::Ai)
    }

    /// Starts a game between two humans.
    pub fn two_player(first: PlayerName, second: PlayerName) -> Self {
        Self::new(first, Seat::Player(second))
    }

    pub fn seats(&self) -> &[Seat; 2] {
        &self.seats
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns `true` if the second seat is the scripted opponent.
    pub fn is_scripted(&self) -> bool {
        self.seats[1].is_ai()
    }

    /// The seat that moves next.
    ///
    /// Only enforced in two-player games; in scripted games the
    /// coordinator sequences the moves itself.
    pub fn turn(&self) -> &Seat {
        &self.seats[self.turn]
    }

    /// The mark `seat` plays, or `None` if it isn't in this game.
    pub fn mark_of(&self, seat: &Seat) -> Option<Mark> {
        if &self.seats[0] == seat {
            Some(Mark::X)
        } else if &self.seats[1] == seat {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// The human players in this game, in seat order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerName> {
        self.seats.iter().filter_map(Seat::player)
    }

    /// The human opponent of `player`, if the game has one.
    pub fn opponent_of(&self, player: &PlayerName) -> Option<&PlayerName> {
        self.players().find(|p| *p != player)
    }

    /// Places `seat`'s mark in `cell` and advances the state machine.
    ///
    /// Checks run in this order: game over, turn (two-player games
    /// only), cell range, cell occupancy. Returns the new outcome.
    ///
    /// # Errors
    /// Any [`GameError`]; the game is unchanged when one is returned.
    pub fn apply_move(
        &mut self,
        seat: &Seat,
        cell: usize,
    ) -> Result<&Outcome, GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameOver);
        }

        let mark = self.mark_of(seat).ok_or(GameError::NotYourTurn)?;
        if !self.is_scripted() && self.turn() != seat {
            return Err(GameError::NotYourTurn);
        }

        if cell >= CELLS {
            return Err(GameError::InvalidPosition);
        }
        if !self.board.is_open(cell) {
            return Err(GameError::CellOccupied);
        }

        self.board.place(cell, mark);

        if self.board.has_line(mark) {
            self.outcome = Outcome::Won(seat.clone());
            tracing::debug!(winner = %seat, "game won");
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
            tracing::debug!("game drawn");
        } else {
            self.turn = 1 - self.turn;
        }

        Ok(&self.outcome)
    }

    /// Renders the board. See [`Board::render`].
    pub fn render(&self) -> String {
        self.board.render()
    }
}
