//! Error types for the protocol layer.
//!
//! Each crate defines its own error enum. A `ProtocolError` always means
//! "the line could not be turned into a command" — the client typed
//! something malformed, and nothing in the game has changed.

/// Errors produced while parsing a command line.
///
/// The `#[error("...")]` strings are exactly what the client sees after
/// the `Error: ` prefix, so they double as the wire vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// `join` without a mode argument.
    #[error("mode required: two-player or ai")]
    MissingMode,

    /// `join` with a mode other than `two-player` or `ai`.
    #[error("invalid mode")]
    InvalidMode(String),

    /// `move` without a position argument.
    #[error("position required")]
    MissingPosition,

    /// `move` with an argument that is not a non-negative integer.
    ///
    /// Out-of-range numbers parse fine here and are rejected later by the
    /// game itself.
    #[error("invalid position")]
    MalformedPosition(String),

    /// The first word of the line is not a known command.
    #[error("unknown command")]
    UnknownCommand(String),
}
