//! # tictac
//!
//! A concurrent tic-tac-toe server speaking a plain-text line protocol
//! over TCP.
//!
//! Clients register a username, then play either the scripted opponent
//! (`join ai`) or another human (`join two-player`). Scores and win
//! streaks are kept for the life of the process.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tictac::prelude::*;
//!
//! # async fn run() -> Result<(), TicTacError> {
//! let server = TicTacServer::builder()
//!     .bind("0.0.0.0:5000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::TicTacError;
pub use server::{TicTacServer, TicTacServerBuilder};

/// Everything needed to embed the server.
pub mod prelude {
    pub use crate::{TicTacError, TicTacServer, TicTacServerBuilder};
    pub use tictac_game::{Board, Heuristic, Mark, MoveStrategy};
    pub use tictac_protocol::{Command, MatchId, Mode, PlayerName};
    pub use tictac_transport::LineConfig;
}
