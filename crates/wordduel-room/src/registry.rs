//! Room registry: owns all active rooms and routes players to them.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use wordduel_protocol::{PlayerId, RoomCode};

use crate::dictionary::validate_word;
use crate::room::{spawn_room, PlayerSender, RoomHandle};
use crate::round::{validate_username, Room};
use crate::{Dictionary, GameError};

/// Characters a room code is drawn from. Uppercase alphanumeric,
/// matching what clients type in.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated room code.
const CODE_LEN: usize = 5;

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns every active room and the player-to-room index.
///
/// This is the entry point for room operations from the connection
/// layer. Rooms themselves live in their actor tasks; the registry
/// holds handles keyed by code plus the index used by disconnect
/// handling. A player can be in at most one room at a time.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, RoomHandle>,
    player_rooms: HashMap<PlayerId, RoomCode>,
    dictionary: Arc<dyn Dictionary>,
}

impl RoomRegistry {
    /// Creates an empty registry using the given word validator.
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            dictionary,
        }
    }

    /// Generates a code no active room is using.
    ///
    /// Collisions are vanishingly rare at this scale, but re-roll
    /// rather than overwrite an existing room.
    fn generate_code(&self) -> RoomCode {
        let mut rng = rand::rng();
        loop {
            let raw: String = (0..CODE_LEN)
                .map(|_| {
                    let i = rng.random_range(0..CODE_ALPHABET.len());
                    CODE_ALPHABET[i] as char
                })
                .collect();
            let code = RoomCode::new(raw);
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }

    /// Creates a room with `player` as creator and first setter.
    ///
    /// The creator may commit the first secret word up front; it is
    /// validated here so a bad word fails the whole create. The
    /// `roomCreated` acknowledgement arrives through `sender`.
    pub fn create_room(
        &mut self,
        player: PlayerId,
        username: &str,
        initial_word: Option<&str>,
        sender: PlayerSender,
    ) -> Result<RoomCode, GameError> {
        validate_username(username)?;
        if let Some(code) = self.player_rooms.get(&player) {
            return Err(GameError::AlreadyInRoom(player, code.clone()));
        }
        let pending = initial_word
            .map(|raw| validate_word(raw, self.dictionary.as_ref()))
            .transpose()?;

        let code = self.generate_code();
        let (room, events) =
            Room::create(code.clone(), player, username.to_string(), pending);
        let handle = spawn_room(
            room,
            player,
            sender,
            events,
            Arc::clone(&self.dictionary),
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(code.clone(), handle);
        self.player_rooms.insert(player, code.clone());
        tracing::info!(%code, %player, "room created");
        Ok(code)
    }

    /// Adds `player` to the room with `code` as the guesser.
    pub async fn join_room(
        &mut self,
        player: PlayerId,
        code: &RoomCode,
        username: &str,
        sender: PlayerSender,
    ) -> Result<(), GameError> {
        validate_username(username)?;
        if let Some(current) = self.player_rooms.get(&player) {
            return Err(GameError::AlreadyInRoom(player, current.clone()));
        }
        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| GameError::RoomNotFound(code.clone()))?;

        handle.join(player, username.to_string(), sender).await?;
        self.player_rooms.insert(player, code.clone());
        tracing::info!(%code, %player, "player joined");
        Ok(())
    }

    /// Returns a clone of the handle for the room with `code`.
    ///
    /// Handles are cheap to clone, so callers that hold the registry
    /// behind a lock can take one out and release the lock before
    /// awaiting the room actor.
    pub fn handle(&self, code: &RoomCode) -> Result<RoomHandle, GameError> {
        self.rooms
            .get(code)
            .cloned()
            .ok_or_else(|| GameError::RoomNotFound(code.clone()))
    }

    /// Routes a set-word action to the room with `code`.
    pub async fn set_word(
        &self,
        player: PlayerId,
        code: &RoomCode,
        word: String,
    ) -> Result<(), GameError> {
        self.handle(code)?.set_word(player, word).await
    }

    /// Routes a guess to the room with `code`.
    pub async fn guess(
        &self,
        player: PlayerId,
        code: &RoomCode,
        guess: String,
    ) -> Result<(), GameError> {
        self.handle(code)?.guess(player, guess).await
    }

    /// Handles a terminated connection.
    ///
    /// Removes the player from their room; the remaining player (if
    /// any) is notified and the room is destroyed either way — a
    /// departed two-player match is not resumable. Idempotent: a
    /// second disconnect for the same player is a no-op.
    pub async fn disconnect(&mut self, player: PlayerId) {
        let Some(code) = self.player_rooms.remove(&player) else {
            return;
        };
        let Some(handle) = self.rooms.remove(&code) else {
            return;
        };
        handle.leave(player).await;
        // Clear index entries for everyone who was in this room.
        self.player_rooms.retain(|_, c| *c != code);
        tracing::info!(%code, %player, "room destroyed after departure");
    }

    /// Returns the room code a player is currently in, if any.
    pub fn player_room(&self, player: &PlayerId) -> Option<&RoomCode> {
        self.player_rooms.get(player)
    }

    /// Returns `true` if a room with this code is active.
    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
