//! The per-room round engine.
//!
//! [`Room`] is a synchronous state machine: every player action is a
//! method that validates, mutates, and returns the ordered list of
//! outbound events the transition produces. Delivery is someone else's
//! job (the room actor), which keeps every rule in this module testable
//! without a network.

use std::collections::HashMap;

use wordduel_protocol::{PlayerId, Recipient, RoomCode, ServerEvent};

use crate::dictionary::{validate_word, Dictionary};
use crate::feedback::{is_all_correct, score_guess};
use crate::{GameError, Word};

/// Attempts the guesser gets per round.
pub const MAX_GUESSES: u8 = 6;

/// Minimum display-name length.
pub const MIN_USERNAME_LEN: usize = 3;

/// An outbound event paired with its audience.
pub type Outbound = (Recipient, ServerEvent);

/// Where a room is in its round cycle.
///
/// The phase carries exactly the fields valid in that state, so the
/// impossible combinations (a guesser with no opponent, a guess count
/// without a secret) cannot be represented.
#[derive(Debug, Clone)]
pub enum RoundPhase {
    /// One player; waiting for an opponent to join. The creator may
    /// have committed the first word up front.
    AwaitingOpponent { pending_word: Option<Word> },

    /// Two players; the setter owes a word.
    AwaitingWord { guesser: PlayerId },

    /// Two players; guessing is under way.
    Guessing {
        guesser: PlayerId,
        secret: Word,
        guess_count: u8,
    },
}

/// One match between exactly two players, across consecutive rounds.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    /// Creator first. Length 0 is transient — an empty room is removed
    /// immediately by the registry.
    players: Vec<PlayerId>,
    usernames: HashMap<PlayerId, String>,
    scores: HashMap<PlayerId, u32>,
    /// The player who owes the current/next secret word.
    setter: PlayerId,
    phase: RoundPhase,
}

/// Checks the display-name rule shared by create and join.
pub(crate) fn validate_username(username: &str) -> Result<(), GameError> {
    if username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(GameError::UsernameTooShort);
    }
    Ok(())
}

impl Room {
    /// Creates a room with its creator as the first setter.
    ///
    /// Returns the room and the events the creation produces (the
    /// `roomCreated` acknowledgement for the creator).
    pub fn create(
        code: RoomCode,
        creator: PlayerId,
        username: String,
        pending_word: Option<Word>,
    ) -> (Self, Vec<Outbound>) {
        let room = Self {
            code: code.clone(),
            players: vec![creator],
            usernames: HashMap::from([(creator, username)]),
            scores: HashMap::from([(creator, 0)]),
            setter: creator,
            phase: RoundPhase::AwaitingOpponent { pending_word },
        };
        let events = vec![(
            Recipient::Player(creator),
            ServerEvent::RoomCreated {
                code,
                player_id: creator,
                usernames: room.usernames.clone(),
            },
        )];
        (room, events)
    }

    /// Adds the second player as guesser and starts the match.
    ///
    /// The room enters `AwaitingWord`, or `Guessing` directly when the
    /// creator committed a word at creation time.
    pub fn join(
        &mut self,
        player: PlayerId,
        username: String,
    ) -> Result<Vec<Outbound>, GameError> {
        if self.players.contains(&player) {
            return Err(GameError::AlreadyInRoom(player, self.code.clone()));
        }
        let RoundPhase::AwaitingOpponent { pending_word } = &self.phase
        else {
            return Err(GameError::RoomFull(self.code.clone()));
        };
        let pending_word = *pending_word;

        self.players.push(player);
        self.usernames.insert(player, username);
        self.scores.insert(player, 0);
        self.phase = match pending_word {
            Some(secret) => RoundPhase::Guessing {
                guesser: player,
                secret,
                guess_count: 0,
            },
            None => RoundPhase::AwaitingWord { guesser: player },
        };

        Ok(vec![
            (
                Recipient::Player(player),
                ServerEvent::JoinedRoom {
                    code: self.code.clone(),
                    player_id: player,
                    usernames: self.usernames.clone(),
                },
            ),
            (
                Recipient::All,
                ServerEvent::GameStart {
                    setter_id: self.setter,
                    guesser_id: player,
                    usernames: self.usernames.clone(),
                },
            ),
        ])
    }

    /// Commits the secret word for the current round. Setter only, and
    /// only while no word is set.
    pub fn set_word(
        &mut self,
        caller: PlayerId,
        raw: &str,
        dict: &dyn Dictionary,
    ) -> Result<Vec<Outbound>, GameError> {
        if caller != self.setter {
            return Err(GameError::NotYourTurn);
        }

        match &mut self.phase {
            RoundPhase::Guessing { .. }
            | RoundPhase::AwaitingOpponent {
                pending_word: Some(_),
            } => Err(GameError::WordAlreadySet),

            RoundPhase::AwaitingOpponent { pending_word } => {
                *pending_word = Some(validate_word(raw, dict)?);
                Ok(vec![(
                    Recipient::All,
                    ServerEvent::WordSet {
                        setter_id: caller,
                    },
                )])
            }

            RoundPhase::AwaitingWord { guesser } => {
                let guesser = *guesser;
                let secret = validate_word(raw, dict)?;
                self.phase = RoundPhase::Guessing {
                    guesser,
                    secret,
                    guess_count: 0,
                };
                Ok(vec![(
                    Recipient::All,
                    ServerEvent::WordSet {
                        setter_id: caller,
                    },
                )])
            }
        }
    }

    /// Evaluates one guess from the current guesser.
    ///
    /// A malformed or non-dictionary guess fails with `InvalidGuess`
    /// and does not consume an attempt. An accepted guess always emits
    /// a `result`; a win or the sixth miss additionally ends the round,
    /// swaps the roles, and emits `gameOver`.
    pub fn guess(
        &mut self,
        caller: PlayerId,
        raw: &str,
        dict: &dyn Dictionary,
    ) -> Result<Vec<Outbound>, GameError> {
        let mut events = Vec::with_capacity(2);
        let round_guesser;
        // None while the round continues; Some(winner) once it ends.
        let mut outcome = None;

        match &mut self.phase {
            RoundPhase::AwaitingOpponent { .. } => {
                return Err(GameError::NotYourTurn);
            }
            RoundPhase::AwaitingWord { guesser } => {
                return Err(if caller == *guesser {
                    GameError::WordNotSet
                } else {
                    GameError::NotYourTurn
                });
            }
            RoundPhase::Guessing {
                guesser,
                secret,
                guess_count,
            } => {
                if caller != *guesser {
                    return Err(GameError::NotYourTurn);
                }
                round_guesser = *guesser;

                let word = validate_word(raw, dict)
                    .map_err(|_| GameError::InvalidGuess)?;

                *guess_count += 1;
                let feedback = score_guess(&word, secret);
                events.push((
                    Recipient::All,
                    ServerEvent::GuessResult {
                        guess: word.to_string(),
                        feedback,
                    },
                ));

                if is_all_correct(&feedback) {
                    let points = u32::from(MAX_GUESSES) + 1
                        - u32::from(*guess_count);
                    *self.scores.entry(caller).or_insert(0) += points;
                    outcome = Some(Some(caller));
                } else if *guess_count >= MAX_GUESSES {
                    outcome = Some(None);
                }
            }
        }

        if let Some(winner) = outcome {
            events.push(self.finish_round(winner, round_guesser));
        }
        Ok(events)
    }

    /// Ends the round: swaps roles, clears the secret, and builds the
    /// room-wide `gameOver` event. The round's guesser becomes the next
    /// setter.
    fn finish_round(
        &mut self,
        winner: Option<PlayerId>,
        round_guesser: PlayerId,
    ) -> Outbound {
        let next_guesser = self.setter;
        self.setter = round_guesser;
        self.phase = RoundPhase::AwaitingWord {
            guesser: next_guesser,
        };
        tracing::info!(
            code = %self.code,
            winner = ?winner,
            new_setter = %self.setter,
            "round over"
        );
        (
            Recipient::All,
            ServerEvent::GameOver {
                winner_id: winner,
                new_setter_id: self.setter,
                scores: self.scores.clone(),
                usernames: self.usernames.clone(),
                lost_on_guess_count: winner.is_none(),
            },
        )
    }

    /// Removes a player, notifying the remaining one if any.
    ///
    /// A departed two-player match is not resumable — the registry
    /// destroys the room after this returns, whether or not it still
    /// has a member.
    pub fn remove_player(&mut self, player: PlayerId) -> Vec<Outbound> {
        let before = self.players.len();
        self.players.retain(|p| *p != player);
        if self.players.len() == before {
            return Vec::new();
        }
        self.usernames.remove(&player);
        self.scores.remove(&player);

        if self.players.is_empty() {
            Vec::new()
        } else {
            vec![(Recipient::All, ServerEvent::OpponentLeft)]
        }
    }

    /// The room's code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Players currently in the room, creator first.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Returns `true` if no players remain.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The player who owes the current/next secret word.
    pub fn setter(&self) -> PlayerId {
        self.setter
    }

    /// Current round phase.
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    /// A player's accumulated score.
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores.get(&player).copied().unwrap_or(0)
    }
}
