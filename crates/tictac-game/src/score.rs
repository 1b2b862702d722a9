//! Score and win-streak bookkeeping, and the leaderboard.
//!
//! Scoring rules:
//!
//! | Event | Effect |
//! |---|---|
//! | win vs. human | +2, streak +1 |
//! | win vs. scripted opponent | +1, streak +1 |
//! | streak reaches exactly 3 | +5 bonus |
//! | streak reaches exactly 5 | +10 bonus |
//! | loss or draw | streak reset to 0 |

use std::collections::HashMap;

use tictac_protocol::PlayerName;

/// Points for beating another human.
pub const HUMAN_WIN_POINTS: u32 = 2;

/// Points for beating the scripted opponent.
pub const SCRIPTED_WIN_POINTS: u32 = 1;

/// One player's running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreRecord {
    pub score: u32,
    pub win_streak: u32,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerName,
    pub score: u32,
    pub win_streak: u32,
}

/// All score records, keyed by player.
///
/// Records are never removed: a player who disconnects and later
/// registers the same name again continues where they left off.
#[derive(Debug, Default)]
pub struct ScoreBook {
    records: HashMap<PlayerName, ScoreRecord>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `player` has a record (so they appear on the
    /// leaderboard with zero points).
    pub fn enroll(&mut self, player: &PlayerName) {
        self.records.entry(player.clone()).or_default();
    }

    pub fn get(&self, player: &PlayerName) -> Option<&ScoreRecord> {
        self.records.get(player)
    }

    /// Credits a win and returns the streak bonus message, if this win
    /// crossed a bonus threshold.
    pub fn record_win(
        &mut self,
        player: &PlayerName,
        against_scripted: bool,
    ) -> Option<String> {
        let record = self.records.entry(player.clone()).or_default();
        record.score += if against_scripted {
            SCRIPTED_WIN_POINTS
        } else {
            HUMAN_WIN_POINTS
        };
        record.win_streak += 1;

        let bonus = match record.win_streak {
            3 => Some(5),
            5 => Some(10),
            _ => None,
        }?;
        record.score += bonus;

        tracing::info!(
            %player,
            streak = record.win_streak,
            bonus,
            "win streak bonus awarded"
        );
        Some(format!(
            "You earned {bonus} bonus points for a {}-game win streak!",
            record.win_streak
        ))
    }

    /// Resets `player`'s streak after a loss.
    pub fn record_loss(&mut self, player: &PlayerName) {
        self.records.entry(player.clone()).or_default().win_streak = 0;
    }

    /// Resets `player`'s streak after a draw.
    pub fn record_draw(&mut self, player: &PlayerName) {
        self.records.entry(player.clone()).or_default().win_streak = 0;
    }

    /// Every record, highest score first; ties ordered by name.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .records
            .iter()
            .map(|(player, record)| Standing {
                player: player.clone(),
                score: record.score,
                win_streak: record.win_streak,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| a.player.cmp(&b.player))
        });
        rows
    }

    /// The leaderboard report: a `Leaderboard:` header and one
    /// `<name>: <score> points, <streak> win streak` line per player.
    pub fn render_leaderboard(&self) -> String {
        let mut out = String::from("Leaderboard:");
        for row in self.standings() {
            out.push_str(&format!(
                "\n{}: {} points, {} win streak",
                row.player, row.score, row.win_streak
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s)
    }

    #[test]
    fn test_record_win_against_human_awards_two_points() {
        let mut book = ScoreBook::new();

        let bonus = book.record_win(&name("p1"), false);

        assert_eq!(bonus, None);
        assert_eq!(
            book.get(&name("p1")),
            Some(&ScoreRecord { score: 2, win_streak: 1 })
        );
    }

    #[test]
    fn test_record_win_against_scripted_awards_one_point() {
        let mut book = ScoreBook::new();
        book.record_win(&name("alice"), true);
        assert_eq!(book.get(&name("alice")).unwrap().score, 1);
    }

    #[test]
    fn test_record_win_third_in_a_row_awards_five_bonus() {
        let mut book = ScoreBook::new();
        book.record_win(&name("p1"), false);
        book.record_win(&name("p1"), false);

        let bonus = book.record_win(&name("p1"), false);

        assert_eq!(
            bonus.as_deref(),
            Some("You earned 5 bonus points for a 3-game win streak!")
        );
        assert_eq!(book.get(&name("p1")).unwrap().score, 2 * 3 + 5);
    }

    #[test]
    fn test_record_win_fifth_in_a_row_awards_ten_bonus() {
        let mut book = ScoreBook::new();
        for _ in 0..4 {
            book.record_win(&name("p1"), true);
        }

        let bonus = book.record_win(&name("p1"), true);

        assert_eq!(
            bonus.as_deref(),
            Some("You earned 10 bonus points for a 5-game win streak!")
        );
        assert_eq!(book.get(&name("p1")).unwrap().score, 5 + 5 + 10);
    }

    #[test]
    fn test_record_win_bonus_fires_once_per_threshold() {
        // Streak 1..=7: bonuses only at 3 and 5.
        let mut book = ScoreBook::new();
        let bonuses: Vec<bool> = (0..7)
            .map(|_| book.record_win(&name("p1"), false).is_some())
            .collect();
        assert_eq!(
            bonuses,
            vec![false, false, true, false, true, false, false]
        );
    }

    #[test]
    fn test_record_win_bonus_again_after_streak_reset() {
        let mut book = ScoreBook::new();
        for _ in 0..3 {
            book.record_win(&name("p1"), false);
        }
        book.record_loss(&name("p1"));
        book.record_win(&name("p1"), false);
        book.record_win(&name("p1"), false);

        assert!(book.record_win(&name("p1"), false).is_some());
    }

    #[test]
    fn test_record_loss_and_draw_reset_streak_keep_score() {
        let mut book = ScoreBook::new();
        book.record_win(&name("p1"), false);
        book.record_win(&name("p1"), false);

        book.record_draw(&name("p1"));
        assert_eq!(
            book.get(&name("p1")),
            Some(&ScoreRecord { score: 4, win_streak: 0 })
        );

        book.record_win(&name("p1"), false);
        book.record_loss(&name("p1"));
        assert_eq!(book.get(&name("p1")).unwrap().win_streak, 0);
    }

    #[test]
    fn test_enroll_creates_zero_record_once() {
        let mut book = ScoreBook::new();
        book.record_win(&name("p1"), false);

        book.enroll(&name("p1"));
        book.enroll(&name("p2"));

        assert_eq!(book.get(&name("p1")).unwrap().score, 2);
        assert_eq!(book.get(&name("p2")), Some(&ScoreRecord::default()));
    }

    #[test]
    fn test_render_leaderboard_sorts_by_score_then_name() {
        let mut book = ScoreBook::new();
        book.enroll(&name("zed"));
        book.record_win(&name("bob"), true);
        book.record_win(&name("amy"), true);
        book.record_win(&name("carol"), false);

        assert_eq!(
            book.render_leaderboard(),
            "Leaderboard:\n\
             carol: 2 points, 1 win streak\n\
             amy: 1 points, 1 win streak\n\
             bob: 1 points, 1 win streak\n\
             zed: 0 points, 0 win streak"
        );
    }

    #[test]
    fn test_render_leaderboard_empty_book_is_header_only() {
        assert_eq!(ScoreBook::new().render_leaderboard(), "Leaderboard:");
    }
}
