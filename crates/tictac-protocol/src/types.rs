//! Identity types shared by every layer of the server.
//!
//! Both are "newtype wrappers": a named struct around a primitive. You
//! can't accidentally pass a `MatchId` where a `PlayerName` is expected,
//! and signatures like `fn associate(id: MatchId, player: &PlayerName)`
//! say what they mean.

use std::fmt;

// ---------------------------------------------------------------------------
// PlayerName
// ---------------------------------------------------------------------------

/// The username a client registered with.
///
/// Usernames are the only identity in the system: unique among live
/// sessions, and the key for score records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerName(String);

impl PlayerName {
    /// Wraps a username. No validation happens here; the registration
    /// loop decides which names are acceptable.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrows the name as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// MatchId
// ---------------------------------------------------------------------------

/// A unique identifier for one match (one game of tic-tac-toe).
///
/// Ids are handed out by the match coordinator from its own counter, so
/// two coordinators (for example in two tests) never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}
