//! Core wire types for wordduel.
//!
//! Every structure here is part of the wire contract with the browser
//! client. Variant and field names serialize in camelCase to match the
//! event vocabulary the client listens for (`roomCreated`, `gameStart`,
//! `lostOnGuessCount`, ...), so changing a name here is a breaking
//! protocol change.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of letters in a secret word and in every guess.
pub const WORD_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player, valid for the lifetime of one
/// connection.
///
/// Issued by the transport layer when the connection is accepted; the
/// client learns its own id from the `roomCreated` / `joinedRoom`
/// events. Serializes as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A short, human-shareable room code.
///
/// Codes are uppercase alphanumeric on the wire and case-insensitive on
/// input: construction normalizes to uppercase, so `"ab3kq"` and
/// `"AB3KQ"` name the same room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Creates a room code, normalizing to uppercase.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RoomCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Per-letter feedback for one guessed position.
///
/// Serializes lowercase (`"correct"` / `"present"` / `"absent"`) — the
/// client uses these strings directly as CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterMark {
    /// Right letter, right position.
    Correct,
    /// Letter occurs in the secret, but elsewhere.
    Present,
    /// Letter does not occur (or all its occurrences are spoken for).
    Absent,
}

// ---------------------------------------------------------------------------
// Recipient — who should receive an event?
// ---------------------------------------------------------------------------

/// Specifies who should receive a server event.
///
/// The engine returns `(Recipient, ServerEvent)` pairs; this enum tells
/// the delivery layer where each one goes. Routing metadata only — it
/// never appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every player currently in the room.
    All,
    /// One specific player (caller-only errors and acknowledgements).
    Player(PlayerId),
}

// ---------------------------------------------------------------------------
// ClientAction — inbound
// ---------------------------------------------------------------------------

/// An action sent by a client.
///
/// Disconnection is not an action — it is observed by the transport
/// layer when the socket closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientAction {
    /// Create a new room. The creator becomes the first setter and may
    /// optionally commit the first secret word up front.
    CreateRoom {
        username: String,
        #[serde(default)]
        secret_word: Option<String>,
    },

    /// Join an existing room by code.
    JoinRoom { code: RoomCode, username: String },

    /// Commit the secret word for the current round (setter only).
    SetNextWord { room: RoomCode, secret_word: String },

    /// Submit a guess against the current secret word (guesser only).
    Guess { room: RoomCode, guess: String },
}

// ---------------------------------------------------------------------------
// ServerEvent — outbound
// ---------------------------------------------------------------------------

/// An event emitted by the server.
///
/// Caller-only events acknowledge or reject the triggering action;
/// room-wide events keep both clients synchronized to the authoritative
/// room state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Caller: the room was created and is awaiting an opponent.
    RoomCreated {
        code: RoomCode,
        player_id: PlayerId,
        usernames: HashMap<PlayerId, String>,
    },

    /// Caller: successfully joined the room.
    JoinedRoom {
        code: RoomCode,
        player_id: PlayerId,
        usernames: HashMap<PlayerId, String>,
    },

    /// Caller: no active room has that code.
    RoomNotFound,

    /// Caller: the room already has two players.
    RoomFull,

    /// Room: both players are present; the match begins.
    GameStart {
        setter_id: PlayerId,
        guesser_id: PlayerId,
        usernames: HashMap<PlayerId, String>,
    },

    /// Room: the setter committed a word; guessing may begin.
    WordSet { setter_id: PlayerId },

    /// Room: feedback for one accepted guess.
    #[serde(rename = "result")]
    GuessResult {
        guess: String,
        feedback: [LetterMark; WORD_LEN],
    },

    /// Room: the round ended — by a correct guess (`winner_id` set) or
    /// by exhausting all attempts (`lost_on_guess_count`). Roles have
    /// already swapped; `new_setter_id` owes the next word.
    GameOver {
        winner_id: Option<PlayerId>,
        new_setter_id: PlayerId,
        scores: HashMap<PlayerId, u32>,
        usernames: HashMap<PlayerId, String>,
        lost_on_guess_count: bool,
    },

    /// Caller: a recoverable error described in prose.
    ErrorMsg { message: String },

    /// Caller: the guess was malformed or not a dictionary word. Does
    /// not consume an attempt.
    InvalidGuess,

    /// Room: the opponent disconnected; the room is gone.
    OpponentLeft,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The client depends on exact JSON shapes. These tests pin the
    //! serde attributes so a refactor can't silently change the wire
    //! format.

    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_room_code_normalizes_to_uppercase() {
        assert_eq!(RoomCode::new("ab3kq").as_str(), "AB3KQ");
        assert_eq!(RoomCode::new("AB3KQ"), RoomCode::new("ab3kq"));
    }

    #[test]
    fn test_room_code_deserialization_normalizes() {
        let code: RoomCode = serde_json::from_str("\"xk29a\"").unwrap();
        assert_eq!(code.as_str(), "XK29A");
    }

    #[test]
    fn test_letter_mark_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LetterMark::Correct).unwrap(),
            "\"correct\""
        );
        assert_eq!(
            serde_json::to_string(&LetterMark::Present).unwrap(),
            "\"present\""
        );
        assert_eq!(
            serde_json::to_string(&LetterMark::Absent).unwrap(),
            "\"absent\""
        );
    }

    #[test]
    fn test_create_room_json_format() {
        let action = ClientAction::CreateRoom {
            username: "Alice".into(),
            secret_word: Some("apple".into()),
        };
        let json: serde_json::Value = serde_json::to_value(&action).unwrap();

        assert_eq!(json["type"], "createRoom");
        assert_eq!(json["username"], "Alice");
        assert_eq!(json["secretWord"], "apple");
    }

    #[test]
    fn test_create_room_secret_word_defaults_to_none() {
        // Clients that set the word later omit the field entirely.
        let json = r#"{"type": "createRoom", "username": "Alice"}"#;
        let action: ClientAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            ClientAction::CreateRoom {
                username: "Alice".into(),
                secret_word: None,
            }
        );
    }

    #[test]
    fn test_join_room_round_trip() {
        let action = ClientAction::JoinRoom {
            code: RoomCode::new("AB3KQ"),
            username: "Bob".into(),
        };
        let bytes = serde_json::to_vec(&action).unwrap();
        let decoded: ClientAction = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn test_set_next_word_json_format() {
        let action = ClientAction::SetNextWord {
            room: RoomCode::new("AB3KQ"),
            secret_word: "crane".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&action).unwrap();

        assert_eq!(json["type"], "setNextWord");
        assert_eq!(json["room"], "AB3KQ");
        assert_eq!(json["secretWord"], "crane");
    }

    #[test]
    fn test_guess_round_trip() {
        let action = ClientAction::Guess {
            room: RoomCode::new("AB3KQ"),
            guess: "slate".into(),
        };
        let bytes = serde_json::to_vec(&action).unwrap();
        let decoded: ClientAction = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn test_room_created_json_format() {
        let event = ServerEvent::RoomCreated {
            code: RoomCode::new("AB3KQ"),
            player_id: PlayerId(1),
            usernames: HashMap::from([(PlayerId(1), "Alice".to_string())]),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "roomCreated");
        assert_eq!(json["code"], "AB3KQ");
        assert_eq!(json["playerId"], 1);
        // Integer map keys become JSON object keys (strings).
        assert_eq!(json["usernames"]["1"], "Alice");
    }

    #[test]
    fn test_room_full_is_bare_tag() {
        let json = serde_json::to_string(&ServerEvent::RoomFull).unwrap();
        assert_eq!(json, r#"{"type":"roomFull"}"#);
    }

    #[test]
    fn test_room_not_found_is_bare_tag() {
        let json = serde_json::to_string(&ServerEvent::RoomNotFound).unwrap();
        assert_eq!(json, r#"{"type":"roomNotFound"}"#);
    }

    #[test]
    fn test_game_start_json_format() {
        let event = ServerEvent::GameStart {
            setter_id: PlayerId(1),
            guesser_id: PlayerId(2),
            usernames: HashMap::from([
                (PlayerId(1), "Alice".to_string()),
                (PlayerId(2), "Bob".to_string()),
            ]),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "gameStart");
        assert_eq!(json["setterId"], 1);
        assert_eq!(json["guesserId"], 2);
        assert_eq!(json["usernames"]["2"], "Bob");
    }

    #[test]
    fn test_guess_result_uses_result_tag() {
        let event = ServerEvent::GuessResult {
            guess: "APPLY".into(),
            feedback: [
                LetterMark::Correct,
                LetterMark::Correct,
                LetterMark::Correct,
                LetterMark::Correct,
                LetterMark::Absent,
            ],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "result");
        assert_eq!(json["guess"], "APPLY");
        assert_eq!(json["feedback"][0], "correct");
        assert_eq!(json["feedback"][4], "absent");
    }

    #[test]
    fn test_game_over_json_format() {
        let event = ServerEvent::GameOver {
            winner_id: Some(PlayerId(2)),
            new_setter_id: PlayerId(2),
            scores: HashMap::from([(PlayerId(1), 0), (PlayerId(2), 5)]),
            usernames: HashMap::from([
                (PlayerId(1), "Alice".to_string()),
                (PlayerId(2), "Bob".to_string()),
            ]),
            lost_on_guess_count: false,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "gameOver");
        assert_eq!(json["winnerId"], 2);
        assert_eq!(json["newSetterId"], 2);
        assert_eq!(json["scores"]["2"], 5);
        assert_eq!(json["lostOnGuessCount"], false);
    }

    #[test]
    fn test_game_over_null_winner_on_loss() {
        let event = ServerEvent::GameOver {
            winner_id: None,
            new_setter_id: PlayerId(2),
            scores: HashMap::new(),
            usernames: HashMap::new(),
            lost_on_guess_count: true,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert!(json["winnerId"].is_null());
        assert_eq!(json["lostOnGuessCount"], true);
    }

    #[test]
    fn test_error_msg_round_trip() {
        let event = ServerEvent::ErrorMsg {
            message: "A word is already set for this round".into(),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_opponent_left_round_trip() {
        let bytes = serde_json::to_vec(&ServerEvent::OpponentLeft).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, ServerEvent::OpponentLeft);
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<ClientAction, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_unknown_action_type_returns_error() {
        let unknown = r#"{"type": "launchMissiles", "target": "moon"}"#;
        let result: Result<ClientAction, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_field_returns_error() {
        let missing = r#"{"type": "joinRoom", "code": "AB3KQ"}"#;
        let result: Result<ClientAction, _> = serde_json::from_str(missing);
        assert!(result.is_err());
    }
}
