//! Per-connection handler: action routing and disconnect cleanup.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The connection is the player: its ID becomes the
//! [`PlayerId`], and the handler owns the outbound event channel the
//! rooms deliver into. The flow is:
//!   1. Spawn a writer task draining game events to the socket
//!   2. Loop: receive actions → route to the room registry
//!   3. On any exit, sweep the player out of their room

use std::sync::Arc;

use tokio::sync::mpsc;
use wordduel_protocol::{Codec, ClientAction, PlayerId, ServerEvent};
use wordduel_room::{GameError, PlayerSender};
use wordduel_transport::{Connection, WebSocketConnection};

use crate::server::ServerState;
use crate::DuelError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), DuelError> {
    let conn = Arc::new(conn);
    let player = PlayerId(conn.id().into_inner());
    tracing::debug!(%player, "handling new connection");

    // Events for this player flow through one channel, whether they
    // come from a room broadcast or a local rejection. The writer task
    // is the only place that touches the socket's send half, so wire
    // order matches event order.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let writer_conn = Arc::clone(&conn);
    let writer_state = Arc::clone(&state);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match writer_state.codec.encode(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode event");
                    continue;
                }
            };
            if writer_conn.send(&text).await.is_err() {
                break;
            }
        }
    });

    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::info!(%player, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%player, error = %e, "recv error");
                break;
            }
        };

        let action: ClientAction = match state.codec.decode(&text) {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(
                    %player, error = %e, "failed to decode action"
                );
                let _ = tx.send(ServerEvent::ErrorMsg {
                    message: "invalid message".to_string(),
                });
                continue;
            }
        };

        dispatch_action(&state, player, &tx, action).await;
    }

    // The player is gone; their room (if any) goes with them.
    state.registry.lock().await.disconnect(player).await;
    Ok(())
}

/// Routes one action to the registry; rejections come back to the
/// acting player as events on their own channel.
async fn dispatch_action<C: Codec>(
    state: &Arc<ServerState<C>>,
    player: PlayerId,
    tx: &PlayerSender,
    action: ClientAction,
) {
    let result = match action {
        ClientAction::CreateRoom {
            username,
            secret_word,
        } => state
            .registry
            .lock()
            .await
            .create_room(
                player,
                &username,
                secret_word.as_deref(),
                tx.clone(),
            )
            .map(|_| ()),

        ClientAction::JoinRoom { code, username } => {
            state
                .registry
                .lock()
                .await
                .join_room(player, &code, &username, tx.clone())
                .await
        }

        // For in-room actions, clone the handle out and release the
        // registry lock before awaiting the room actor, so one slow
        // room can't stall action routing for every other room. The
        // guard is a temporary of the `let`, dropped before the await.
        ClientAction::SetNextWord { room, secret_word } => {
            let handle = state.registry.lock().await.handle(&room);
            match handle {
                Ok(handle) => handle.set_word(player, secret_word).await,
                Err(e) => Err(e),
            }
        }

        ClientAction::Guess { room, guess } => {
            let handle = state.registry.lock().await.handle(&room);
            match handle {
                Ok(handle) => handle.guess(player, guess).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        let _ = tx.send(rejection_event(e));
    }
}

/// Maps a rejected action to the event the client expects. Most
/// rejections collapse into `errorMsg`; a few have dedicated events
/// the client renders specially.
fn rejection_event(error: GameError) -> ServerEvent {
    match error {
        GameError::RoomNotFound(_) => ServerEvent::RoomNotFound,
        GameError::RoomFull(_) => ServerEvent::RoomFull,
        GameError::InvalidGuess => ServerEvent::InvalidGuess,
        other => ServerEvent::ErrorMsg {
            message: other.to_string(),
        },
    }
}
