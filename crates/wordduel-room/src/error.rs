//! Error types for the room layer.
//!
//! Every variant is recoverable by the caller: these are reported to
//! the acting connection only and never tear down a room or the
//! process.

use wordduel_protocol::{PlayerId, RoomCode};

use crate::round::MIN_USERNAME_LEN;
use crate::WordError;

/// Errors that can occur during room and round operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No active room has that code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The room already has two players.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The player is already in an active room.
    #[error("player {0} is already in room {1}")]
    AlreadyInRoom(PlayerId, RoomCode),

    /// The acting player doesn't hold the role this action requires.
    #[error("it is not your turn")]
    NotYourTurn,

    /// A guess arrived before the setter committed a word.
    #[error("the secret word has not been set for this round yet")]
    WordNotSet,

    /// The setter tried to commit a second word mid-round.
    #[error("a word is already set for this round")]
    WordAlreadySet,

    /// The proposed secret word is malformed or not accepted.
    #[error("invalid word: {0}")]
    InvalidWord(#[from] WordError),

    /// The guess is malformed or not accepted. Does not consume an
    /// attempt.
    #[error("invalid guess")]
    InvalidGuess,

    /// Display name shorter than the minimum.
    #[error("username must be at least {MIN_USERNAME_LEN} characters")]
    UsernameTooShort,

    /// The room's command channel is closed (room shutting down).
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),
}
