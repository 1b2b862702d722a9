//! Match coordinator: creates, plays, and tears down matches.
//!
//! The coordinator owns everything about matches that is not a
//! connection: the waiting queue, the live games, the score book, and the
//! scripted opponent. Anything it needs to do to players (associate them,
//! tell them things, release them) goes through a [`MatchHost`].
//!
//! # Match lifecycle
//!
//! ```text
//!  start_scripted_match ─┐
//!                        ├─→ live ──play()──→ terminal ──→ end_match()
//!  start_two_player_match┘      │
//!                               └── leave() ──→ handle_abandonment()
//! ```
//!
//! Like the session registry, the coordinator is plain data with `&mut
//! self` methods. The server keeps both behind one mutex, so every
//! operation here runs start to finish without interleaving.

use std::collections::HashMap;

use tictac_game::{
    AI_NAME, Game, Heuristic, Mark, MoveStrategy, Outcome, ScoreBook, Seat,
};
use tictac_protocol::{MatchId, PlayerName, text};

use crate::{MatchError, MatchHost, MatchQueue, QueueOutcome};

/// Result of a `join` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// No opponent yet; the player is in the queue.
    Waiting,
    /// A match was created and announced.
    Started(MatchId),
}

/// Everything a move produced, before it is announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The rendered board after the move (and the reply, if any).
    pub board: String,
    /// The win/draw line, or the scripted opponent's choice.
    pub result: Option<String>,
    /// A win-streak bonus message for the mover.
    pub bonus: Option<String>,
    /// Where the game stands now.
    pub outcome: Outcome,
}

/// Owns matchmaking, live games, and scores.
pub struct MatchCoordinator {
    queue: MatchQueue,
    games: HashMap<MatchId, Game>,
    scores: ScoreBook,
    strategy: Box<dyn MoveStrategy>,
    /// Next id to hand out. Ids are never reused.
    next_id: u64,
}

impl MatchCoordinator {
    /// Creates a coordinator whose scripted opponent plays `strategy`.
    pub fn new(strategy: Box<dyn MoveStrategy>) -> Self {
        Self {
            queue: MatchQueue::new(),
            games: HashMap::new(),
            scores: ScoreBook::new(),
            strategy,
            next_id: 1,
        }
    }

    // ---- Joining ----

    /// Starts a match between `player` and the scripted opponent.
    ///
    /// Cancels any two-player wait first. The player moves first.
    ///
    /// # Errors
    /// [`MatchError::AlreadyInGame`] if the player is in a match.
    pub fn start_scripted_match<H: MatchHost>(
        &mut self,
        host: &mut H,
        player: &PlayerName,
    ) -> Result<MatchId, MatchError> {
        if host.current_match(player).is_some() {
            return Err(MatchError::AlreadyInGame);
        }
        if self.queue.cancel(player) {
            tracing::debug!(%player, "left queue for scripted match");
        }

        let match_id = self.allocate_id();
        let game = Game::scripted(player.clone());
        let board = game.render();
        self.games.insert(match_id, game);
        if !host.associate(match_id, player) {
            tracing::warn!(%match_id, %player, "scripted match has no session");
        }

        tracing::info!(%match_id, %player, "scripted match created");
        host.broadcast(match_id, text::SCRIPTED_START);
        host.broadcast(match_id, &board);
        Ok(match_id)
    }

    /// Pairs `player` with the longest-waiting player, or queues them.
    ///
    /// The player who waited moves first. Queue entries whose session
    /// is gone are discarded and the next one is tried.
    ///
    /// # Errors
    /// [`MatchError::AlreadyInGame`] if the player is in a match.
    pub fn start_two_player_match<H: MatchHost>(
        &mut self,
        host: &mut H,
        player: &PlayerName,
    ) -> Result<JoinOutcome, MatchError> {
        if host.current_match(player).is_some() {
            return Err(MatchError::AlreadyInGame);
        }

        loop {
            let opponent = match self.queue.request(player) {
                QueueOutcome::Waiting => {
                    tracing::info!(%player, "player queued");
                    return Ok(JoinOutcome::Waiting);
                }
                QueueOutcome::Paired(opponent) => opponent,
            };

            // Peek the id so a stale entry doesn't burn one.
            let match_id = MatchId(self.next_id);
            if !host.associate(match_id, &opponent) {
                tracing::warn!(%opponent, "discarding stale queue entry");
                continue;
            }
            self.next_id += 1;
            if !host.associate(match_id, player) {
                tracing::warn!(%match_id, %player, "joiner has no session");
            }

            let game = Game::two_player(opponent.clone(), player.clone());
            let board = game.render();
            self.games.insert(match_id, game);

            tracing::info!(
                %match_id,
                first = %opponent,
                second = %player,
                "players paired"
            );
            host.broadcast(match_id, &text::game_started(&opponent));
            host.broadcast(match_id, &board);
            return Ok(JoinOutcome::Started(match_id));
        }
    }

    // ---- Playing ----

    /// Applies `player`'s move to `match_id` and settles the score.
    ///
    /// In a scripted match that is still running afterwards, the
    /// scripted opponent replies before this returns. Nothing is sent to
    /// anyone; see [`play`](Self::play) for the announcing version.
    ///
    /// # Errors
    /// [`MatchError::NotFound`] for an unknown match, or the
    /// [`GameError`](tictac_game::GameError) that rejected the move.
    pub fn submit_move(
        &mut self,
        match_id: MatchId,
        player: &PlayerName,
        cell: usize,
    ) -> Result<MoveReport, MatchError> {
        let game = self
            .games
            .get_mut(&match_id)
            .ok_or(MatchError::NotFound(match_id))?;
        let scripted = game.is_scripted();

        let outcome =
            game.apply_move(&Seat::Player(player.clone()), cell)?.clone();
        tracing::debug!(%match_id, %player, cell, "move applied");

        let mut result = None;
        let mut bonus = None;
        match outcome {
            Outcome::Won(_) => {
                bonus = self.scores.record_win(player, scripted);
                if let Some(loser) = game.opponent_of(player) {
                    self.scores.record_loss(loser);
                }
                result = Some(text::wins(player));
            }
            Outcome::Draw => {
                for p in game.players() {
                    self.scores.record_draw(p);
                }
                result = Some(text::DRAW.to_owned());
            }
            Outcome::InProgress if scripted => {
                result = Self::scripted_reply(
                    game,
                    self.strategy.as_mut(),
                    &mut self.scores,
                    player,
                );
            }
            Outcome::InProgress => {}
        }

        Ok(MoveReport {
            board: game.render(),
            result,
            bonus,
            outcome: game.outcome().clone(),
        })
    }

    /// Lets the scripted opponent move and returns the line describing
    /// it. `player` is the human on the other side.
    fn scripted_reply(
        game: &mut Game,
        strategy: &mut dyn MoveStrategy,
        scores: &mut ScoreBook,
        player: &PlayerName,
    ) -> Option<String> {
        let cell = strategy.choose(game.board(), Mark::O)?;
        let outcome = match game.apply_move(&Seat::Ai, cell) {
            Ok(outcome) => outcome.clone(),
            Err(e) => {
                tracing::warn!(cell, error = %e, "scripted move rejected");
                return None;
            }
        };

        match outcome {
            Outcome::Won(_) => {
                scores.record_loss(player);
                Some(text::wins(AI_NAME))
            }
            Outcome::Draw => {
                scores.record_draw(player);
                Some(text::DRAW.to_owned())
            }
            Outcome::InProgress => Some(text::scripted_choice(cell)),
        }
    }

    /// Plays `player`'s move in whatever match they are in and announces
    /// the result to the match.
    ///
    /// A finished match is ended; otherwise the next turn is announced.
    ///
    /// # Errors
    /// [`MatchError::NotInGame`] if the player has no match, or anything
    /// [`submit_move`](Self::submit_move) returns.
    pub fn play<H: MatchHost>(
        &mut self,
        host: &mut H,
        player: &PlayerName,
        cell: usize,
    ) -> Result<MoveReport, MatchError> {
        let match_id =
            host.current_match(player).ok_or(MatchError::NotInGame)?;
        let report = self.submit_move(match_id, player, cell)?;

        let mut message = format!("Board:\n{}", report.board);
        for line in [&report.result, &report.bonus].into_iter().flatten() {
            message.push('\n');
            message.push_str(line);
        }
        host.broadcast(match_id, &message);

        if report.outcome.is_terminal() {
            self.end_match(host, match_id, text::GAME_ENDED);
        } else if let Some(game) = self.games.get(&match_id) {
            let notice = if game.is_scripted() {
                text::YOUR_TURN.to_owned()
            } else {
                text::turn_of(game.turn())
            };
            host.broadcast(match_id, &notice);
        }
        Ok(report)
    }

    // ---- Ending ----

    /// Ends `match_id`: every member hears `reason` and is released, and
    /// the game is dropped.
    pub fn end_match<H: MatchHost>(
        &mut self,
        host: &mut H,
        match_id: MatchId,
        reason: &str,
    ) {
        host.end_match(match_id, reason);
        if self.games.remove(&match_id).is_some() {
            tracing::info!(%match_id, "match ended");
        }
    }

    /// Handles `player` walking out of `match_id`.
    ///
    /// The game is destroyed. If one human is left they are told, released,
    /// and sent back through two-player matchmaking (which pairs them at
    /// once if someone is already waiting).
    pub fn handle_abandonment<H: MatchHost>(
        &mut self,
        host: &mut H,
        match_id: MatchId,
        player: &PlayerName,
    ) -> Result<(), MatchError> {
        let remaining = host.remove_participant(match_id, player);
        self.games.remove(&match_id);
        tracing::info!(%match_id, %player, "match abandoned");

        if let [other] = remaining.as_slice() {
            host.broadcast(match_id, &text::left_game(player));
            host.end_match(match_id, text::OPPONENT_LEFT);
            self.start_two_player_match(host, other)?;
        } else {
            host.end_match(match_id, text::GAME_ENDED);
        }
        Ok(())
    }

    /// Tears down whatever `player` is doing: queue wait and match.
    pub fn leave<H: MatchHost>(
        &mut self,
        host: &mut H,
        player: &PlayerName,
    ) -> Result<(), MatchError> {
        if self.queue.cancel(player) {
            tracing::debug!(%player, "queue wait cancelled");
        }
        match host.current_match(player) {
            Some(match_id) => self.handle_abandonment(host, match_id, player),
            None => Ok(()),
        }
    }

    // ---- Scores ----

    /// Gives a newly registered player a leaderboard entry.
    pub fn enroll(&mut self, player: &PlayerName) {
        self.scores.enroll(player);
    }

    /// The rendered leaderboard report.
    pub fn leaderboard(&self) -> String {
        self.scores.render_leaderboard()
    }

    // ---- Queries ----

    pub fn game(&self, match_id: MatchId) -> Option<&Game> {
        self.games.get(&match_id)
    }

    pub fn live_matches(&self) -> usize {
        self.games.len()
    }

    pub fn is_queued(&self, player: &PlayerName) -> bool {
        self.queue.contains(player)
    }

    fn allocate_id(&mut self) -> MatchId {
        let id = MatchId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for MatchCoordinator {
    /// A coordinator with the OS-seeded heuristic opponent.
    fn default() -> Self {
        Self::new(Box::new(Heuristic::new()))
    }
}

impl std::fmt::Debug for MatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCoordinator")
            .field("queue", &self.queue)
            .field("games", &self.games.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
