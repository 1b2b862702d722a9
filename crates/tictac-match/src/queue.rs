//! First-come, first-served matchmaking for two-player games.

use std::collections::VecDeque;

use tictac_protocol::PlayerName;

/// What happened to a two-player join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueOutcome {
    /// Nobody was waiting; the requester is now at the back of the queue.
    Waiting,
    /// The longest-waiting player was taken off the queue to play.
    Paired(PlayerName),
}

/// Players waiting for a human opponent, oldest first.
///
/// A name appears at most once, so a player can never be paired with
/// themselves.
#[derive(Debug, Default)]
pub struct MatchQueue {
    waiting: VecDeque<PlayerName>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `player` with whoever has waited longest, or queues them.
    ///
    /// A player who is already waiting stays where they are.
    pub fn request(&mut self, player: &PlayerName) -> QueueOutcome {
        if self.contains(player) {
            return QueueOutcome::Waiting;
        }
        match self.waiting.pop_front() {
            Some(opponent) => QueueOutcome::Paired(opponent),
            None => {
                self.waiting.push_back(player.clone());
                QueueOutcome::Waiting
            }
        }
    }

    /// Removes `player` from the queue. Returns `true` if they were in it.
    pub fn cancel(&mut self, player: &PlayerName) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|p| p != player);
        self.waiting.len() != before
    }

    pub fn contains(&self, player: &PlayerName) -> bool {
        self.waiting.contains(player)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s)
    }

    #[test]
    fn test_request_empty_queue_returns_waiting() {
        let mut queue = MatchQueue::new();
        assert_eq!(queue.request(&name("bob")), QueueOutcome::Waiting);
        assert!(queue.contains(&name("bob")));
    }

    #[test]
    fn test_request_pairs_with_oldest_waiter() {
        let mut queue = MatchQueue::new();
        queue.request(&name("bob"));

        assert_eq!(
            queue.request(&name("carol")),
            QueueOutcome::Paired(name("bob"))
        );
        assert!(!queue.contains(&name("carol")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_request_twice_never_pairs_with_self() {
        let mut queue = MatchQueue::new();
        queue.request(&name("bob"));

        assert_eq!(queue.request(&name("bob")), QueueOutcome::Waiting);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_cancel_reports_whether_removed() {
        let mut queue = MatchQueue::new();
        queue.request(&name("bob"));

        assert!(queue.cancel(&name("bob")));
        assert!(!queue.cancel(&name("bob")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_request_never_pairs_one_waiter_twice() {
        // Two arrivals against one waiter: only the first gets the pair.
        let mut queue = MatchQueue::new();
        queue.request(&name("a"));

        assert_eq!(queue.request(&name("b")), QueueOutcome::Paired(name("a")));
        assert_eq!(queue.request(&name("c")), QueueOutcome::Waiting);
    }
}
