//! Matchmaking and match orchestration for the tic-tac-toe server.
//!
//! # Key types
//!
//! - [`MatchCoordinator`] — starts, plays, ends, and abandons matches
//! - [`MatchHost`] — what the coordinator needs from the session side
//! - [`MatchQueue`] — first-come, first-served two-player pairing
//! - [`MoveReport`] / [`JoinOutcome`] — results handed back to callers
//!
//! The coordinator is synchronous. The server holds it (together with the
//! session registry that implements [`MatchHost`]) behind one async
//! mutex, so each operation is a single critical section.

mod coordinator;
mod error;
mod host;
mod queue;

pub use coordinator::{JoinOutcome, MatchCoordinator, MoveReport};
pub use error::MatchError;
pub use host::MatchHost;
pub use queue::{MatchQueue, QueueOutcome};
