//! Room actor: an isolated Tokio task that owns one [`Room`].
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. One inbound action is fully processed
//! (state mutated, events dispatched) before the next is handled, which
//! is the serialization guarantee the engine needs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use wordduel_protocol::{PlayerId, Recipient, RoomCode, ServerEvent};

use crate::round::{Outbound, Room};
use crate::{Dictionary, GameError};

/// Channel sender for delivering outbound events to a player's
/// connection task.
pub type PlayerSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in each variant is a reply channel: the caller
/// awaits the engine's verdict so caller-only errors can be turned into
/// events on the right connection.
pub(crate) enum RoomCommand {
    /// Add the second player to the room.
    Join {
        player: PlayerId,
        username: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), GameError>>,
    },

    /// Commit the secret word for the current round.
    SetWord {
        player: PlayerId,
        word: String,
        reply: oneshot::Sender<Result<(), GameError>>,
    },

    /// Evaluate a guess.
    Guess {
        player: PlayerId,
        guess: String,
        reply: oneshot::Sender<Result<(), GameError>>,
    },

    /// Remove a departing player. The actor notifies whoever remains
    /// and then stops — a departed match is not resumable.
    Leave {
        player: PlayerId,
        reply: oneshot::Sender<()>,
    },
}

/// Handle to a running room actor. Cheap to clone; the
/// [`RoomRegistry`](crate::RoomRegistry) holds one per room.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// The room's code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Sends a join request to the room.
    pub async fn join(
        &self,
        player: PlayerId,
        username: String,
        sender: PlayerSender,
    ) -> Result<(), GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player,
                username,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.code.clone()))?
    }

    /// Sends a set-word request to the room.
    pub async fn set_word(
        &self,
        player: PlayerId,
        word: String,
    ) -> Result<(), GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::SetWord {
                player,
                word,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.code.clone()))?
    }

    /// Sends a guess to the room.
    pub async fn guess(
        &self,
        player: PlayerId,
        guess: String,
    ) -> Result<(), GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Guess {
                player,
                guess,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.code.clone()))?
    }

    /// Removes a player and shuts the room down. Idempotent from the
    /// caller's point of view: a closed channel means the room is
    /// already gone.
    pub async fn leave(&self, player: PlayerId) {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .sender
            .send(RoomCommand::Leave {
                player,
                reply: reply_tx,
            })
            .await
            .is_err()
        {
            return;
        }
        let _ = reply_rx.await;
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room: Room,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    dictionary: Arc<dyn Dictionary>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop until the room is destroyed.
    async fn run(mut self, created_events: Vec<Outbound>) {
        tracing::info!(code = %self.room.code(), "room actor started");
        self.dispatch(created_events);

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player,
                    username,
                    sender,
                    reply,
                } => {
                    let result = self.room.join(player, username);
                    match result {
                        Ok(events) => {
                            // Register the sender before dispatch so the
                            // joiner sees its own acknowledgement.
                            self.senders.insert(player, sender);
                            self.dispatch(events);
                            let _ = reply.send(Ok(()));
                        }
                        Err(e) => {
                            let _ = reply.send(Err(e));
                        }
                    }
                }

                RoomCommand::SetWord {
                    player,
                    word,
                    reply,
                } => {
                    let result = self
                        .room
                        .set_word(player, &word, self.dictionary.as_ref());
                    let _ = reply.send(self.finish(player, result));
                }

                RoomCommand::Guess {
                    player,
                    guess,
                    reply,
                } => {
                    let result = self
                        .room
                        .guess(player, &guess, self.dictionary.as_ref());
                    let _ = reply.send(self.finish(player, result));
                }

                RoomCommand::Leave { player, reply } => {
                    let events = self.room.remove_player(player);
                    self.senders.remove(&player);
                    self.dispatch(events);
                    let _ = reply.send(());
                    // One departure ends the match either way.
                    break;
                }
            }
        }

        tracing::info!(code = %self.room.code(), "room actor stopped");
    }

    /// Dispatches the events of a successful transition, or logs and
    /// forwards the rejection.
    fn finish(
        &mut self,
        player: PlayerId,
        result: Result<Vec<Outbound>, GameError>,
    ) -> Result<(), GameError> {
        match result {
            Ok(events) => {
                self.dispatch(events);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(
                    code = %self.room.code(),
                    %player,
                    error = %e,
                    "action rejected"
                );
                Err(e)
            }
        }
    }

    /// Delivers outbound events to their recipients. Silently drops
    /// events for players whose receiver is gone.
    fn dispatch(&self, events: Vec<Outbound>) {
        for (recipient, event) in events {
            match recipient {
                Recipient::All => {
                    for sender in self.senders.values() {
                        let _ = sender.send(event.clone());
                    }
                }
                Recipient::Player(pid) => {
                    if let Some(sender) = self.senders.get(&pid) {
                        let _ = sender.send(event);
                    }
                }
            }
        }
    }
}

/// Spawns a room actor for a freshly created room and returns the
/// handle to it.
pub(crate) fn spawn_room(
    room: Room,
    creator: PlayerId,
    creator_sender: PlayerSender,
    created_events: Vec<Outbound>,
    dictionary: Arc<dyn Dictionary>,
    channel_size: usize,
) -> RoomHandle {
    let code = room.code().clone();
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room,
        senders: HashMap::from([(creator, creator_sender)]),
        dictionary,
        receiver: rx,
    };

    tokio::spawn(actor.run(created_events));

    RoomHandle { code, sender: tx }
}
