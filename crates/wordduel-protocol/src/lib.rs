//! Wire protocol for wordduel.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientAction`], [`ServerEvent`], [`LetterMark`], etc.) —
//!   the message structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages
//!   are converted to/from wire text.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! The protocol layer sits between transport (raw frames) and the room
//! layer (game state). It doesn't know about connections or rooms — it
//! only knows how to name and serialize messages.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientAction, LetterMark, PlayerId, Recipient, RoomCode, ServerEvent,
    WORD_LEN,
};
