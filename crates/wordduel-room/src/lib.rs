//! Room registry and round engine for wordduel.
//!
//! This crate owns everything with real invariants: room lifecycle,
//! turn and role rotation, the secret-word lifecycle, guess scoring,
//! and the event sequence that keeps two clients synchronized to one
//! authoritative server state.
//!
//! Each room runs as an isolated Tokio task (actor model), so no two
//! actions on the same room ever interleave partially.
//!
//! # Key types
//!
//! - [`Room`] / [`RoundPhase`] — the per-room state machine
//! - [`RoomRegistry`] — creates/destroys rooms, routes players
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`Dictionary`] — pluggable word validator
//! - [`score_guess`] — the two-pass letter-matching function

mod dictionary;
mod error;
mod feedback;
mod registry;
mod room;
mod round;
mod word;

pub use dictionary::{AnyWord, Dictionary, WordList};
pub use error::GameError;
pub use feedback::score_guess;
pub use registry::RoomRegistry;
pub use room::{PlayerSender, RoomHandle};
pub use round::{Outbound, Room, RoundPhase, MAX_GUESSES, MIN_USERNAME_LEN};
pub use word::{Word, WordError};
