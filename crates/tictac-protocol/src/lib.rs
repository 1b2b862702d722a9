//! Wire protocol for the tic-tac-toe server.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`PlayerName`], [`MatchId`]) — the identities everything
//!   else is keyed by.
//! - **Commands** ([`Command`], [`Mode`]) — what a client line means.
//! - **Text** ([`text`]) — every fixed string the server sends back.
//! - **Errors** ([`ProtocolError`]) — what can be wrong with a line.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw lines) and the match
//! layer (game state). It doesn't know about connections or matches — it
//! only knows how to read commands and spell responses.
//!
//! ```text
//! Transport (lines) → Protocol (Command) → Match coordinator
//! ```

mod command;
mod error;
pub mod text;
mod types;

pub use command::{Command, Mode};
pub use error::ProtocolError;
pub use types::{MatchId, PlayerName};
