//! The command grammar: one command per line, `<keyword> [args...]`.
//!
//! Parsing produces a closed [`Command`] enum. The supervisor matches on it
//! exhaustively, so adding a command is a compile error everywhere it
//! isn't handled yet.

use std::fmt;

use crate::ProtocolError;

/// Which kind of opponent a `join` asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Wait for (or pair with) another human.
    TwoPlayer,
    /// Play the scripted opponent right away.
    Ai,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoPlayer => write!(f, "two-player"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `join two-player` or `join ai`.
    Join(Mode),

    /// `move <n>`, where `n` is the 1-indexed cell as typed.
    ///
    /// Kept 1-indexed here; range checking belongs to the game.
    Move(usize),

    /// `leaderboard`.
    Leaderboard,

    /// `exit`.
    Exit,
}

impl Command {
    /// Parses one line of client input.
    ///
    /// Returns `Ok(None)` for a blank line. Words are split on any
    /// whitespace; arguments beyond the ones a command needs are ignored.
    ///
    /// # Errors
    /// Returns the [`ProtocolError`] describing what was wrong with the
    /// line. The error text is meant to be shown to the client verbatim.
    pub fn parse(line: &str) -> Result<Option<Self>, ProtocolError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };

        let command = match keyword {
            "join" => {
                let mode = words.next().ok_or(ProtocolError::MissingMode)?;
                match mode {
                    "two-player" => Self::Join(Mode::TwoPlayer),
                    "ai" => Self::Join(Mode::Ai),
                    other => {
                        return Err(ProtocolError::InvalidMode(other.into()));
                    }
                }
            }
            "move" => {
                let raw =
                    words.next().ok_or(ProtocolError::MissingPosition)?;
                let position = raw.parse::<usize>().map_err(|_| {
                    ProtocolError::MalformedPosition(raw.into())
                })?;
                Self::Move(position)
            }
            "leaderboard" => Self::Leaderboard,
            "exit" => Self::Exit,
            other => return Err(ProtocolError::UnknownCommand(other.into())),
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_two_player() {
        assert_eq!(
            Command::parse("join two-player"),
            Ok(Some(Command::Join(Mode::TwoPlayer)))
        );
    }

    #[test]
    fn test_parse_join_ai_with_extra_whitespace() {
        assert_eq!(
            Command::parse("  join   ai  "),
            Ok(Some(Command::Join(Mode::Ai)))
        );
    }

    #[test]
    fn test_parse_join_without_mode_returns_missing_mode() {
        let err = Command::parse("join").unwrap_err();
        assert_eq!(err, ProtocolError::MissingMode);
        assert_eq!(err.to_string(), "mode required: two-player or ai");
    }

    #[test]
    fn test_parse_join_unknown_mode_returns_invalid_mode() {
        let err = Command::parse("join solo").unwrap_err();
        assert_eq!(err, ProtocolError::InvalidMode("solo".into()));
        assert_eq!(err.to_string(), "invalid mode");
    }

    #[test]
    fn test_parse_move_keeps_one_indexed_position() {
        assert_eq!(Command::parse("move 5"), Ok(Some(Command::Move(5))));
    }

    #[test]
    fn test_parse_move_zero_is_left_for_the_game_to_reject() {
        // 0 is syntactically a number; the game reports it out of range.
        assert_eq!(Command::parse("move 0"), Ok(Some(Command::Move(0))));
    }

    #[test]
    fn test_parse_move_without_position_returns_missing_position() {
        let err = Command::parse("move").unwrap_err();
        assert_eq!(err.to_string(), "position required");
    }

    #[test]
    fn test_parse_move_non_numeric_returns_invalid_position() {
        let err = Command::parse("move center").unwrap_err();
        assert_eq!(err, ProtocolError::MalformedPosition("center".into()));
        assert_eq!(err.to_string(), "invalid position");
    }

    #[test]
    fn test_parse_move_negative_returns_invalid_position() {
        assert!(matches!(
            Command::parse("move -1"),
            Err(ProtocolError::MalformedPosition(_))
        ));
    }

    #[test]
    fn test_parse_leaderboard_and_exit() {
        assert_eq!(
            Command::parse("leaderboard"),
            Ok(Some(Command::Leaderboard))
        );
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Exit)));
    }

    #[test]
    fn test_parse_unknown_keyword_returns_unknown_command() {
        let err = Command::parse("resign").unwrap_err();
        assert_eq!(err, ProtocolError::UnknownCommand("resign".into()));
        assert_eq!(err.to_string(), "unknown command");
    }

    #[test]
    fn test_parse_keywords_are_case_sensitive() {
        assert!(Command::parse("JOIN ai").is_err());
    }

    #[test]
    fn test_parse_blank_line_returns_none() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   \t"), Ok(None));
    }

    #[test]
    fn test_mode_display_matches_wire_spelling() {
        assert_eq!(Mode::TwoPlayer.to_string(), "two-player");
        assert_eq!(Mode::Ai.to_string(), "ai");
    }
}
