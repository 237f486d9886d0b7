use thiserror::Error;

use crate::round::Letter;

/// Errors raised by the game-logic core.
///
/// Only `UnknownCategory` and the word bank errors ever reach a caller as a
/// real failure; the guess-related variants are swallowed by the controller.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GameError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("'{0}' is not a single letter A-Z")]
    InvalidGuessInput(String),
    #[error("round is already over, ignoring guess '{0}'")]
    StaleGuess(Letter),
    #[error("'{0}' must contain only letters and spaces, with at least one letter")]
    InvalidWord(String),
    #[error("invalid word bank: {0}")]
    InvalidWordBank(String),
    #[cfg(feature = "serde_json")]
    #[error("malformed word bank JSON: {0}")]
    Json(String),
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Json(err.to_string())
    }
}
