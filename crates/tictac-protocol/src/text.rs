//! Every fixed string the server sends to clients.
//!
//! The protocol is human-readable text, so these strings *are* the wire
//! format. Clients (and the end-to-end tests) match on them.

use std::fmt::Display;

/// First thing a new connection sees.
pub const GREETING: &str = "Welcome to Tic Tac Toe!\nEnter username: ";

/// Sent when a registration attempt is rejected; the client just types
/// another name.
pub const NAME_TAKEN: &str =
    "Username already taken. Please choose another one:";

/// Sent right after a successful registration.
pub const HELP: &str =
    "Commands: join <two-player|ai>, move <1-9>, leaderboard, exit";

pub const WAITING: &str = "Waiting for an opponent...";

pub const OPPONENT_LEFT: &str =
    "Your opponent has left. Waiting for a new opponent...";

pub const GAME_ENDED: &str = "Game has ended. You can start a new game.";

pub const YOUR_TURN: &str = "Your turn.";

pub const SCRIPTED_START: &str = "Game started. Your turn.";

pub const DRAW: &str = "It's a draw!";

pub const GOODBYE: &str = "Goodbye!";

/// `Welcome, <name>`.
pub fn welcome(name: impl Display) -> String {
    format!("Welcome, {name}")
}

/// `Game started. <name>'s turn.`
pub fn game_started(first: impl Display) -> String {
    format!("Game started. {first}'s turn.")
}

/// `<name>'s turn.`
pub fn turn_of(name: impl Display) -> String {
    format!("{name}'s turn.")
}

/// `<name> wins!`
pub fn wins(name: impl Display) -> String {
    format!("{name} wins!")
}

/// `<name> has left the game.`
pub fn left_game(name: impl Display) -> String {
    format!("{name} has left the game.")
}

/// `AI chooses position <n>`, with `cell` 0-indexed.
pub fn scripted_choice(cell: usize) -> String {
    format!("AI chooses position {}", cell + 1)
}

/// `Error: <message>`.
pub fn error_line(err: impl Display) -> String {
    format!("Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_started_names_first_player() {
        assert_eq!(game_started("bob"), "Game started. bob's turn.");
    }

    #[test]
    fn test_scripted_choice_is_one_indexed() {
        assert_eq!(scripted_choice(0), "AI chooses position 1");
        assert_eq!(scripted_choice(8), "AI chooses position 9");
    }

    #[test]
    fn test_error_line_prefixes_message() {
        assert_eq!(error_line("not your turn"), "Error: not your turn");
    }

    #[test]
    fn test_greeting_ends_with_prompt() {
        assert!(GREETING.ends_with("Enter username: "));
    }
}
