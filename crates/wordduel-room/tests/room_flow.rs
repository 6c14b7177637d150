//! Integration tests for the registry and room actors: full rounds
//! played through player channels, exactly as the connection layer
//! drives them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use wordduel_protocol::{LetterMark, PlayerId, RoomCode, ServerEvent};
use wordduel_room::{AnyWord, GameError, PlayerSender, RoomRegistry, WordList};

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn registry() -> RoomRegistry {
    RoomRegistry::new(Arc::new(AnyWord))
}

fn channel() -> (PlayerSender, mpsc::UnboundedReceiver<ServerEvent>) {
    mpsc::unbounded_channel()
}

/// Collects everything currently queued for a player.
async fn drain(
    rx: &mut mpsc::UnboundedReceiver<ServerEvent>,
) -> Vec<ServerEvent> {
    // Give the actor task a moment to dispatch.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Creates a room for Alice and joins Bob, draining both channels up
/// to and including `gameStart`.
async fn start_match(
    reg: &mut RoomRegistry,
) -> (
    RoomCode,
    mpsc::UnboundedReceiver<ServerEvent>,
    mpsc::UnboundedReceiver<ServerEvent>,
) {
    let (tx1, mut rx1) = channel();
    let (tx2, mut rx2) = channel();

    let code = reg.create_room(pid(1), "Alice", None, tx1).unwrap();
    reg.join_room(pid(2), &code, "Bob", tx2).await.unwrap();

    let _ = drain(&mut rx1).await; // roomCreated, gameStart
    let _ = drain(&mut rx2).await; // joinedRoom, gameStart
    (code, rx1, rx2)
}

#[tokio::test]
async fn test_create_room_acknowledges_creator() {
    let mut reg = registry();
    let (tx, mut rx) = channel();

    let code = reg.create_room(pid(1), "Alice", None, tx).unwrap();
    assert_eq!(code.as_str().len(), 5);
    assert_eq!(reg.room_count(), 1);

    let events = drain(&mut rx).await;
    match events.as_slice() {
        [ServerEvent::RoomCreated {
            code: ack_code,
            player_id,
            usernames,
        }] => {
            assert_eq!(ack_code, &code);
            assert_eq!(*player_id, pid(1));
            assert_eq!(usernames[&pid(1)], "Alice");
        }
        other => panic!("expected roomCreated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generated_codes_are_unique() {
    let mut reg = registry();
    let mut codes = std::collections::HashSet::new();
    for i in 0..50 {
        let (tx, _rx) = channel();
        let code = reg
            .create_room(pid(i), &format!("player{i}"), None, tx)
            .unwrap();
        assert!(codes.insert(code), "duplicate room code");
    }
    assert_eq!(reg.room_count(), 50);
}

#[tokio::test]
async fn test_create_room_rejects_short_username() {
    let mut reg = registry();
    let (tx, _rx) = channel();
    let result = reg.create_room(pid(1), "ab", None, tx);
    assert!(matches!(result, Err(GameError::UsernameTooShort)));
    assert_eq!(reg.room_count(), 0);
}

#[tokio::test]
async fn test_create_room_rejects_bad_initial_word() {
    let mut reg =
        RoomRegistry::new(Arc::new(WordList::new(["apple", "crane"])));
    let (tx, _rx) = channel();
    let result = reg.create_room(pid(1), "Alice", Some("zzzzz"), tx);
    assert!(matches!(result, Err(GameError::InvalidWord(_))));
    assert_eq!(reg.room_count(), 0);
}

#[tokio::test]
async fn test_join_unknown_code_is_room_not_found() {
    let mut reg = registry();
    let (tx, _rx) = channel();
    let result = reg
        .join_room(pid(1), &RoomCode::new("XXXXX"), "Bob", tx)
        .await;
    assert!(matches!(result, Err(GameError::RoomNotFound(_))));
}

#[tokio::test]
async fn test_join_is_case_insensitive_on_code() {
    let mut reg = registry();
    let (tx1, _rx1) = channel();
    let (tx2, _rx2) = channel();

    let code = reg.create_room(pid(1), "Alice", None, tx1).unwrap();
    let lowered = RoomCode::new(code.as_str().to_ascii_lowercase());
    reg.join_room(pid(2), &lowered, "Bob", tx2).await.unwrap();
    assert_eq!(reg.player_room(&pid(2)), Some(&code));
}

#[tokio::test]
async fn test_third_player_gets_room_full() {
    let mut reg = registry();
    let (code, mut rx1, mut rx2) = start_match(&mut reg).await;

    let (tx3, _rx3) = channel();
    let result = reg.join_room(pid(3), &code, "Carol", tx3).await;
    assert!(matches!(result, Err(GameError::RoomFull(_))));

    // The room itself is untouched.
    assert!(drain(&mut rx1).await.is_empty());
    assert!(drain(&mut rx2).await.is_empty());
}

#[tokio::test]
async fn test_game_start_broadcast_to_both_players() {
    let mut reg = registry();
    let (tx1, mut rx1) = channel();
    let (tx2, mut rx2) = channel();

    let code = reg.create_room(pid(1), "Alice", None, tx1).unwrap();
    reg.join_room(pid(2), &code, "Bob", tx2).await.unwrap();

    let events1 = drain(&mut rx1).await;
    assert!(matches!(events1[0], ServerEvent::RoomCreated { .. }));
    assert!(matches!(
        events1[1],
        ServerEvent::GameStart {
            setter_id: PlayerId(1),
            guesser_id: PlayerId(2),
            ..
        }
    ));

    let events2 = drain(&mut rx2).await;
    assert!(matches!(events2[0], ServerEvent::JoinedRoom { .. }));
    assert!(matches!(events2[1], ServerEvent::GameStart { .. }));
}

#[tokio::test]
async fn test_full_round_events_in_order() {
    let mut reg = registry();
    let (code, mut rx1, mut rx2) = start_match(&mut reg).await;

    reg.set_word(pid(1), &code, "apple".into()).await.unwrap();
    reg.guess(pid(2), &code, "apply".into()).await.unwrap();
    reg.guess(pid(2), &code, "apple".into()).await.unwrap();

    // Both players observe the same sequence: wordSet, result, result,
    // gameOver.
    for rx in [&mut rx1, &mut rx2] {
        let events = drain(rx).await;
        assert_eq!(events.len(), 4, "events: {events:?}");
        assert!(matches!(
            events[0],
            ServerEvent::WordSet { setter_id: PlayerId(1) }
        ));
        match &events[1] {
            ServerEvent::GuessResult { guess, feedback } => {
                assert_eq!(guess, "APPLY");
                assert_eq!(feedback[4], LetterMark::Absent);
            }
            other => panic!("expected result, got {other:?}"),
        }
        assert!(matches!(events[2], ServerEvent::GuessResult { .. }));
        match &events[3] {
            ServerEvent::GameOver {
                winner_id,
                new_setter_id,
                scores,
                lost_on_guess_count,
                ..
            } => {
                assert_eq!(*winner_id, Some(pid(2)));
                assert_eq!(*new_setter_id, pid(2));
                assert_eq!(scores[&pid(2)], 5);
                assert!(!lost_on_guess_count);
            }
            other => panic!("expected gameOver, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_guess_before_word_set_reported_to_caller_only() {
    let mut reg = registry();
    let (code, mut rx1, mut rx2) = start_match(&mut reg).await;

    let result = reg.guess(pid(2), &code, "crane".into()).await;
    assert!(matches!(result, Err(GameError::WordNotSet)));

    // Nothing was broadcast.
    assert!(drain(&mut rx1).await.is_empty());
    assert!(drain(&mut rx2).await.is_empty());
}

#[tokio::test]
async fn test_set_word_by_wrong_player_rejected() {
    let mut reg = registry();
    let (code, _rx1, _rx2) = start_match(&mut reg).await;

    let result = reg.set_word(pid(2), &code, "crane".into()).await;
    assert!(matches!(result, Err(GameError::NotYourTurn)));
}

#[tokio::test]
async fn test_initial_word_allows_immediate_guessing() {
    let mut reg = registry();
    let (tx1, mut rx1) = channel();
    let (tx2, mut rx2) = channel();

    let code = reg
        .create_room(pid(1), "Alice", Some("crane"), tx1)
        .unwrap();
    reg.join_room(pid(2), &code, "Bob", tx2).await.unwrap();
    let _ = drain(&mut rx1).await;
    let _ = drain(&mut rx2).await;

    reg.guess(pid(2), &code, "crane".into()).await.unwrap();
    let events = drain(&mut rx2).await;
    assert!(matches!(events[0], ServerEvent::GuessResult { .. }));
    assert!(matches!(
        events[1],
        ServerEvent::GameOver { winner_id: Some(PlayerId(2)), .. }
    ));
}

#[tokio::test]
async fn test_disconnect_notifies_and_destroys_room() {
    let mut reg = registry();
    let (code, _rx1, mut rx2) = start_match(&mut reg).await;

    reg.disconnect(pid(1)).await;

    let events = drain(&mut rx2).await;
    assert_eq!(events, vec![ServerEvent::OpponentLeft]);
    assert!(!reg.contains(&code));
    assert_eq!(reg.player_room(&pid(2)), None);

    // The survivor's next guess hits a dead code.
    let result = reg.guess(pid(2), &code, "crane".into()).await;
    assert!(matches!(result, Err(GameError::RoomNotFound(_))));
}

#[tokio::test]
async fn test_disconnect_of_solo_creator_removes_room() {
    let mut reg = registry();
    let (tx, _rx) = channel();
    let code = reg.create_room(pid(1), "Alice", None, tx).unwrap();

    reg.disconnect(pid(1)).await;
    assert!(!reg.contains(&code));
    assert_eq!(reg.room_count(), 0);
}

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let mut reg = registry();
    let (_code, _rx1, mut rx2) = start_match(&mut reg).await;

    reg.disconnect(pid(1)).await;
    let _ = drain(&mut rx2).await;
    reg.disconnect(pid(1)).await;

    // No duplicate opponentLeft for the survivor.
    assert!(drain(&mut rx2).await.is_empty());
}

#[tokio::test]
async fn test_player_cannot_be_in_two_rooms() {
    let mut reg = registry();
    let (tx1, _rx1) = channel();
    let (tx1b, _rx1b) = channel();

    reg.create_room(pid(1), "Alice", None, tx1).unwrap();
    let result = reg.create_room(pid(1), "Alice", None, tx1b);
    assert!(matches!(result, Err(GameError::AlreadyInRoom(..))));
    assert_eq!(reg.room_count(), 1);
}

#[tokio::test]
async fn test_cloned_handle_routes_without_the_registry() {
    let mut reg = registry();
    let (code, _rx1, mut rx2) = start_match(&mut reg).await;

    // The connection layer takes a handle out and drops the registry
    // lock before awaiting; actions through the clone still reach the
    // live room.
    let handle = reg.handle(&code).unwrap();
    handle.set_word(pid(1), "apple".into()).await.unwrap();
    handle.guess(pid(2), "apple".into()).await.unwrap();

    let events = drain(&mut rx2).await;
    assert!(matches!(events[0], ServerEvent::WordSet { .. }));
    assert!(matches!(events[1], ServerEvent::GuessResult { .. }));
    assert!(matches!(events[2], ServerEvent::GameOver { .. }));
}

#[tokio::test]
async fn test_handle_for_unknown_code_is_room_not_found() {
    let reg = registry();
    let result = reg.handle(&RoomCode::new("XXXXX"));
    assert!(matches!(result, Err(GameError::RoomNotFound(_))));
}

#[tokio::test]
async fn test_roles_swap_for_next_round() {
    let mut reg = registry();
    let (code, mut rx1, mut rx2) = start_match(&mut reg).await;

    reg.set_word(pid(1), &code, "apple".into()).await.unwrap();
    reg.guess(pid(2), &code, "apple".into()).await.unwrap();
    let _ = drain(&mut rx1).await;
    let _ = drain(&mut rx2).await;

    // Round two: Bob owes the word, Alice guesses.
    let result = reg.set_word(pid(1), &code, "crane".into()).await;
    assert!(matches!(result, Err(GameError::NotYourTurn)));

    reg.set_word(pid(2), &code, "crane".into()).await.unwrap();
    reg.guess(pid(1), &code, "crane".into()).await.unwrap();

    let events = drain(&mut rx1).await;
    match events.last() {
        Some(ServerEvent::GameOver { winner_id, scores, .. }) => {
            assert_eq!(*winner_id, Some(pid(1)));
            assert_eq!(scores[&pid(1)], 6);
            assert_eq!(scores[&pid(2)], 6);
        }
        other => panic!("expected gameOver, got {other:?}"),
    }
}
