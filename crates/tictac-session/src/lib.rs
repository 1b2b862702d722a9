//! Player session management for the tic-tac-toe server.
//!
//! A session is the live binding between a registered username and the
//! connection it came from. This crate answers two questions for the rest
//! of the server:
//!
//! 1. **Who is online?** — [`SessionRegistry::register`] /
//!    [`SessionRegistry::remove`]
//! 2. **Who is in which match?** — the per-session match id plus the
//!    per-match broadcast lists.
//!
//! # How it fits in the stack
//!
//! ```text
//! Match Layer (above)  ← associates players with matches, broadcasts
//!     ↕
//! Session Layer (this crate)  ← player identity and outbound text
//!     ↕
//! Protocol Layer (below)  ← provides PlayerName, MatchId
//! ```

mod error;
mod registry;
mod session;

pub use error::SessionError;
pub use registry::SessionRegistry;
pub use session::{Outbox, Session};
