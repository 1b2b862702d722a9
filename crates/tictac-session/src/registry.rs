//! The session registry: tracks every live player session.
//!
//! This is the single source of truth for "who is online" and "who is in
//! which match". It's responsible for:
//! - Registering usernames (and rejecting duplicates)
//! - Recording each player's current match
//! - Keeping a broadcast list per match
//! - Delivering text to one player or to a whole match
//!
//! # Concurrency note
//!
//! `SessionRegistry` is NOT thread-safe by itself — it uses plain
//! `HashMap`s. The server keeps it behind the same mutex as the match
//! coordinator, so a registry update and the matching game update are
//! always applied together.

use std::collections::HashMap;

use tictac_protocol::{MatchId, PlayerName};

use crate::{Outbox, Session, SessionError};

/// Manages all live player sessions.
///
/// ## Lifecycle
///
/// ```text
/// register() ──→ set_match()/add_to_match() ──→ clear_match() ──→ remove()
///                         ↑                           │
///                         └───────────────────────────┘
///                              (next match)
/// ```
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// All live sessions, keyed by username.
    sessions: HashMap<PlayerName, Session>,

    /// Per-match broadcast lists: which players receive a match's
    /// announcements. Kept in sync with each session's `current_match`.
    members: HashMap<MatchId, Vec<PlayerName>>,
}

impl SessionRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session for `player`.
    ///
    /// # Errors
    /// Returns [`SessionError::NameTaken`] if `player` already has a live
    /// session.
    pub fn register(
        &mut self,
        player: PlayerName,
        outbox: Outbox,
    ) -> Result<&Session, SessionError> {
        // The entry API lets us check and insert with a single lookup.
        use std::collections::hash_map::Entry;

        match self.sessions.entry(player) {
            Entry::Occupied(entry) => {
                Err(SessionError::NameTaken(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                let player = entry.key().clone();
                tracing::info!(%player, "session registered");
                Ok(entry.insert(Session::new(player, outbox)))
            }
        }
    }

    /// Looks up a live session.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if `player` is not online.
    pub fn get(&self, player: &PlayerName) -> Result<&Session, SessionError> {
        self.sessions
            .get(player)
            .ok_or_else(|| SessionError::NotFound(player.clone()))
    }

    /// Returns `true` if `player` has a live session.
    pub fn contains(&self, player: &PlayerName) -> bool {
        self.sessions.contains_key(player)
    }

    /// The match `player` is currently in. `None` if they are in no
    /// match or not online at all.
    pub fn current_match(&self, player: &PlayerName) -> Option<MatchId> {
        self.sessions.get(player).and_then(|s| s.current_match)
    }

    /// Records that `player` is now in `match_id`.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if `player` is not online.
    pub fn set_match(
        &mut self,
        player: &PlayerName,
        match_id: MatchId,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(player)
            .ok_or_else(|| SessionError::NotFound(player.clone()))?;
        session.current_match = Some(match_id);
        Ok(())
    }

    /// Records that `player` is no longer in any match.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if `player` is not online.
    pub fn clear_match(
        &mut self,
        player: &PlayerName,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(player)
            .ok_or_else(|| SessionError::NotFound(player.clone()))?;
        session.current_match = None;
        Ok(())
    }

    /// Removes `player`'s session. Idempotent: removing a player who is
    /// not online returns `None`.
    ///
    /// The player is also dropped from every broadcast list.
    pub fn remove(&mut self, player: &PlayerName) -> Option<Session> {
        let session = self.sessions.remove(player)?;
        if let Some(match_id) = session.current_match {
            self.remove_from_match(match_id, player);
        }
        tracing::info!(%player, "session removed");
        Some(session)
    }

    /// Adds `player` to `match_id`'s broadcast list. Adding the same
    /// player twice has no effect.
    pub fn add_to_match(&mut self, match_id: MatchId, player: &PlayerName) {
        let list = self.members.entry(match_id).or_default();
        if !list.contains(player) {
            list.push(player.clone());
        }
    }

    /// Removes `player` from `match_id`'s broadcast list and returns the
    /// players still on it. An emptied list is dropped.
    pub fn remove_from_match(
        &mut self,
        match_id: MatchId,
        player: &PlayerName,
    ) -> Vec<PlayerName> {
        let Some(list) = self.members.get_mut(&match_id) else {
            return Vec::new();
        };
        list.retain(|p| p != player);
        let remaining = list.clone();
        if remaining.is_empty() {
            self.members.remove(&match_id);
        }
        remaining
    }

    /// The players on `match_id`'s broadcast list, in join order.
    pub fn members(&self, match_id: MatchId) -> &[PlayerName] {
        self.members
            .get(&match_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drops `match_id`'s broadcast list entirely and returns who was on
    /// it. Does not touch the sessions themselves.
    pub fn close_match(&mut self, match_id: MatchId) -> Vec<PlayerName> {
        self.members.remove(&match_id).unwrap_or_default()
    }

    /// Queues `text` for one player. Returns `false` if they are not
    /// online or their connection is already closing.
    pub fn send(&self, player: &PlayerName, text: &str) -> bool {
        self.sessions
            .get(player)
            .is_some_and(|session| session.send(text))
    }

    /// Queues `text` for every player on `match_id`'s broadcast list.
    /// Returns how many players it was delivered to.
    pub fn broadcast(&self, match_id: MatchId, text: &str) -> usize {
        self.members(match_id)
            .iter()
            .filter(|player| self.send(player, text))
            .count()
    }

    /// Names of every live session, in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerName> {
        self.sessions.keys()
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if nobody is online.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionRegistry`.
    //!
    //! Naming follows `test_{function}_{scenario}_{expected}`. Each test
    //! keeps the receiving end of every outbox so it can check exactly
    //! what a player would have been sent.

    use super::*;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    // -- Helpers ----------------------------------------------------------

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s)
    }

    /// Registers `player` and returns the receiving end of its outbox.
    fn join(
        registry: &mut SessionRegistry,
        player: &str,
    ) -> UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(name(player), tx).expect("should register");
        rx
    }

    /// Everything queued for a player so far.
    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    // =====================================================================
    // register() / get()
    // =====================================================================

    #[test]
    fn test_register_new_player_returns_session_without_match() {
        let mut registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let session = registry.register(name("alice"), tx).unwrap();

        assert_eq!(session.player, name("alice"));
        assert_eq!(session.current_match, None);
    }

    #[test]
    fn test_register_duplicate_name_returns_name_taken() {
        let mut registry = SessionRegistry::new();
        let _rx = join(&mut registry, "alice");
        let (tx, _rx2) = mpsc::unbounded_channel();

        let result = registry.register(name("alice"), tx);

        assert!(
            matches!(result, Err(SessionError::NameTaken(ref p)) if *p == name("alice")),
            "should reject duplicate live name"
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_after_remove_succeeds() {
        // Names are reserved only while the session is live.
        let mut registry = SessionRegistry::new();
        let _rx = join(&mut registry, "alice");
        registry.remove(&name("alice"));

        let (tx, _rx2) = mpsc::unbounded_channel();
        assert!(registry.register(name("alice"), tx).is_ok());
    }

    #[test]
    fn test_get_unknown_player_returns_not_found() {
        let registry = SessionRegistry::new();
        assert_eq!(
            registry.get(&name("ghost")).unwrap_err(),
            SessionError::NotFound(name("ghost"))
        );
    }

    // =====================================================================
    // set_match() / clear_match()
    // =====================================================================

    #[test]
    fn test_set_match_then_clear_match_round_trip() {
        let mut registry = SessionRegistry::new();
        let _rx = join(&mut registry, "alice");

        registry.set_match(&name("alice"), MatchId(1)).unwrap();
        assert_eq!(registry.current_match(&name("alice")), Some(MatchId(1)));

        registry.clear_match(&name("alice")).unwrap();
        assert_eq!(registry.current_match(&name("alice")), None);
    }

    #[test]
    fn test_set_match_unknown_player_returns_not_found() {
        let mut registry = SessionRegistry::new();
        assert!(matches!(
            registry.set_match(&name("ghost"), MatchId(1)),
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            registry.clear_match(&name("ghost")),
            Err(SessionError::NotFound(_))
        ));
    }

    // =====================================================================
    // remove()
    // =====================================================================

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = SessionRegistry::new();
        let _rx = join(&mut registry, "alice");

        assert!(registry.remove(&name("alice")).is_some());
        assert!(registry.remove(&name("alice")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_drops_player_from_broadcast_list() {
        let mut registry = SessionRegistry::new();
        let _a = join(&mut registry, "alice");
        let _b = join(&mut registry, "bob");
        for p in ["alice", "bob"] {
            registry.set_match(&name(p), MatchId(7)).unwrap();
            registry.add_to_match(MatchId(7), &name(p));
        }

        registry.remove(&name("alice"));

        assert_eq!(registry.members(MatchId(7)), &[name("bob")]);
    }

    // =====================================================================
    // Broadcast lists
    // =====================================================================

    #[test]
    fn test_add_to_match_twice_lists_player_once() {
        let mut registry = SessionRegistry::new();
        registry.add_to_match(MatchId(1), &name("alice"));
        registry.add_to_match(MatchId(1), &name("alice"));
        assert_eq!(registry.members(MatchId(1)).len(), 1);
    }

    #[test]
    fn test_remove_from_match_returns_remaining_members() {
        let mut registry = SessionRegistry::new();
        registry.add_to_match(MatchId(1), &name("alice"));
        registry.add_to_match(MatchId(1), &name("bob"));

        let remaining = registry.remove_from_match(MatchId(1), &name("alice"));
        assert_eq!(remaining, vec![name("bob")]);

        let remaining = registry.remove_from_match(MatchId(1), &name("bob"));
        assert!(remaining.is_empty());
        assert!(registry.members(MatchId(1)).is_empty());
    }

    #[test]
    fn test_close_match_returns_members_and_drops_list() {
        let mut registry = SessionRegistry::new();
        registry.add_to_match(MatchId(4), &name("alice"));
        registry.add_to_match(MatchId(4), &name("bob"));

        let members = registry.close_match(MatchId(4));

        assert_eq!(members, vec![name("alice"), name("bob")]);
        assert!(registry.members(MatchId(4)).is_empty());
    }

    // =====================================================================
    // send() / broadcast()
    // =====================================================================

    #[test]
    fn test_broadcast_reaches_only_match_members() {
        let mut registry = SessionRegistry::new();
        let mut a = join(&mut registry, "alice");
        let mut b = join(&mut registry, "bob");
        let mut c = join(&mut registry, "carol");
        registry.add_to_match(MatchId(1), &name("alice"));
        registry.add_to_match(MatchId(1), &name("bob"));

        let delivered = registry.broadcast(MatchId(1), "Game started.");

        assert_eq!(delivered, 2);
        assert_eq!(drain(&mut a), vec!["Game started."]);
        assert_eq!(drain(&mut b), vec!["Game started."]);
        assert!(drain(&mut c).is_empty());
    }

    #[test]
    fn test_broadcast_skips_closed_outbox() {
        let mut registry = SessionRegistry::new();
        let rx = join(&mut registry, "alice");
        let mut b = join(&mut registry, "bob");
        registry.add_to_match(MatchId(1), &name("alice"));
        registry.add_to_match(MatchId(1), &name("bob"));
        drop(rx);

        assert_eq!(registry.broadcast(MatchId(1), "hi"), 1);
        assert_eq!(drain(&mut b), vec!["hi"]);
    }

    #[test]
    fn test_send_unknown_player_returns_false() {
        let registry = SessionRegistry::new();
        assert!(!registry.send(&name("ghost"), "hello"));
    }
}
